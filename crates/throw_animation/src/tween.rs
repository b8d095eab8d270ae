//! Tweens
//!
//! Two kinds of tween live here:
//! - [`Tween`] interpolates one scalar property of a target and is placed
//!   on a [`Timeline`](crate::Timeline) at an absolute start time.
//! - [`PlayheadTween`] scrubs a timeline's playhead from one time to another,
//!   optionally wrapping every rendered value into the loop period.

use crate::easing::Easing;
use crate::utils::wrap;

/// Identifies the animated element of a tween (an item index)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

/// Interpolates one scalar property of a target
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: TargetId,
    pub from: f32,
    pub to: f32,
    /// Duration in seconds
    pub duration: f32,
    pub easing: Easing,
    /// Whether the start value is applied while the playhead is still before
    /// the tween's start time
    pub immediate_render: bool,
}

impl Tween {
    /// Create a linear tween that renders its start value immediately
    pub fn new(target: TargetId, from: f32, to: f32, duration: f32) -> Self {
        Self {
            target,
            from,
            to,
            duration: duration.max(0.0),
            easing: Easing::Linear,
            immediate_render: true,
        }
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether the start value renders before the tween starts
    pub fn immediate_render(mut self, enabled: bool) -> Self {
        self.immediate_render = enabled;
        self
    }

    /// Value at `local` seconds after the tween's start
    pub fn value_at(&self, local: f32) -> f32 {
        if self.duration <= 0.0 {
            return if local < 0.0 { self.from } else { self.to };
        }
        let t = (local / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

/// Moves a timeline's playhead from `from` to `to` over `duration` seconds
///
/// When `wrap_period` is set, every value is wrapped into `[0, period)`, so
/// a tween that crosses the loop seam renders correctly mid-flight.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayheadTween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    wrap_period: Option<f32>,
}

impl PlayheadTween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
            wrap_period: None,
        }
    }

    /// Wrap every rendered value into `[0, period)`
    pub fn wrapping(mut self, period: f32) -> Self {
        self.wrap_period = Some(period);
        self
    }

    /// Advance by `dt` seconds and return the new playhead time
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Current playhead time
    pub fn value(&self) -> f32 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        };
        let raw = self.from + (self.to - self.from) * self.easing.apply(t);
        match self.wrap_period {
            Some(period) => wrap(raw, period),
            None => raw,
        }
    }

    /// Unwrapped destination time
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds left before the destination is reached
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
