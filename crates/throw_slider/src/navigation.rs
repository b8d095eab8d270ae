//! Navigation planning
//!
//! Turns "go to item N" into a playhead destination that travels the short
//! way round and keeps moving in the direction the index moves.

use throw_animation::Easing;

use crate::config::NavigationDefaults;
use crate::error::Result;

/// Per-call overrides for `next`, `previous` and `go_to`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationOptions {
    /// Seconds; `Some(0.0)` jumps, `None` uses the caller's default
    pub duration: Option<f32>,
    pub ease: Option<Easing>,
}

impl NavigationOptions {
    /// Jump without animating
    pub fn instant() -> Self {
        Self {
            duration: Some(0.0),
            ease: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_ease(mut self, ease: Easing) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Fill unset fields from configured defaults
    pub fn merged_with(self, defaults: &NavigationDefaults) -> Result<Self> {
        Ok(Self {
            duration: self.duration.or(Some(defaults.duration)),
            ease: match self.ease {
                Some(ease) => Some(ease),
                None => Some(defaults.easing()?),
            },
        })
    }
}

/// Where the playhead should go for a navigation request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationPlan {
    /// Wrapped destination index
    pub index: usize,
    /// Destination time, possibly outside `[0, duration]`
    pub time: f32,
    /// Rendered times must be wrapped while travelling
    pub needs_wrap: bool,
    /// Signed index distance actually travelled
    pub delta: isize,
}

/// Plan a move from `current` towards `target`
///
/// `target` may lie outside `0..times.len()`; it is brought within half a
/// lap of `current` before the marker is looked up.
/// `now` is the timeline's iteration-local time and `duration` its length.
/// `times` must not be empty.
pub fn plan(target: isize, current: usize, times: &[f32], now: f32, duration: f32) -> NavigationPlan {
    let count = times.len().max(1) as isize;
    let current = current as isize % count;

    // Shorter arc; an exact half turn keeps the requested direction
    let mut delta = (target.rem_euclid(count) - current).rem_euclid(count);
    if 2 * delta > count || (2 * delta == count && target < current) {
        delta -= count;
    }

    let index = (current + delta).rem_euclid(count) as usize;
    let mut time = times[index];
    let forward = delta > 0;
    if (time > now) != forward && delta != 0 {
        time += if forward { duration } else { -duration };
    }

    NavigationPlan {
        index,
        time,
        needs_wrap: time < 0.0 || time > duration,
        delta,
    }
}
