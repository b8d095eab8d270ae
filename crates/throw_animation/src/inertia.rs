//! Inertial throws
//!
//! [`VelocityTracker`] estimates pointer velocity from recent samples. A
//! [`Throw`] decelerates from that velocity at a constant resistance and
//! lands exactly on a target picked by a snap function, so the motion looks
//! like friction while still finishing on a marker.
//!
//! The motion is a quadratic ease-out: its initial speed matches the release
//! velocity and it reaches zero speed at the target.

use crate::easing::Easing;

/// Number of samples kept by the tracker
const HISTORY_SIZE: usize = 20;

/// Only samples this recent contribute to the velocity
const HORIZON_MS: f64 = 100.0;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: f64,
    position: f32,
}

/// Estimates 1D velocity from timestamped positions
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a position at `time_ms`
    pub fn add(&mut self, time_ms: f64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Forget every sample
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Velocity at `now_ms`, zero when the newest sample is older than the
    /// tracking window (the pointer stopped before it was released)
    pub fn velocity_at(&self, now_ms: f64) -> f32 {
        match self.samples[self.index] {
            Some(newest) if now_ms - newest.time_ms <= HORIZON_MS => self.velocity(),
            _ => 0.0,
        }
    }

    /// Velocity in units per second over the recent window
    ///
    /// Returns `0.0` with fewer than two samples in the window.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut oldest = newest;
        let mut cursor = self.index;
        for _ in 1..HISTORY_SIZE {
            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            if newest.time_ms - sample.time_ms > HORIZON_MS || sample.time_ms > newest.time_ms {
                break;
            }
            oldest = sample;
        }

        let elapsed_ms = newest.time_ms - oldest.time_ms;
        if elapsed_ms <= 0.0 {
            return 0.0;
        }
        ((newest.position - oldest.position) as f64 / elapsed_ms * 1000.0) as f32
    }
}

/// Tuning for inertial throws
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaConfig {
    /// Deceleration in units per second squared
    pub resistance: f32,
    /// Release speeds below this are treated as zero
    pub min_velocity: f32,
    /// Shortest throw in seconds
    pub min_duration: f32,
    /// Longest throw in seconds
    pub max_duration: f32,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            resistance: 3500.0,
            min_velocity: 20.0,
            min_duration: 0.2,
            max_duration: 3.0,
        }
    }
}

impl InertiaConfig {
    pub fn with_resistance(mut self, resistance: f32) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity;
        self
    }
}

/// A decelerating motion from a release point to a snapped target
#[derive(Clone, Debug, PartialEq)]
pub struct Throw {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Throw {
    /// Where a free throw would stop without snapping
    pub fn natural_end(start: f32, velocity: f32, resistance: f32) -> f32 {
        if resistance <= 0.0 {
            return start;
        }
        start + velocity * velocity.abs() / (2.0 * resistance)
    }

    /// Launch a throw and let `snap` choose where it lands
    ///
    /// `snap` receives the natural end point and returns the landing point.
    pub fn launch(
        from: f32,
        velocity: f32,
        config: &InertiaConfig,
        snap: impl FnOnce(f32) -> f32,
    ) -> Self {
        let velocity = if velocity.abs() < config.min_velocity {
            0.0
        } else {
            velocity
        };
        let natural = Self::natural_end(from, velocity, config.resistance);
        Self::towards(from, snap(natural), velocity, config)
    }

    /// Throw from `from` to a known target with the given release velocity
    pub fn towards(from: f32, to: f32, velocity: f32, config: &InertiaConfig) -> Self {
        let distance = to - from;
        let duration = if distance == 0.0 {
            0.0
        } else if velocity != 0.0 && velocity.signum() == distance.signum() {
            // Quadratic ease-out starts at 2 * distance / duration
            2.0 * distance / velocity
        } else if config.resistance > 0.0 {
            (2.0 * distance.abs() / config.resistance).sqrt()
        } else {
            config.min_duration
        };

        let duration = if distance == 0.0 {
            0.0
        } else {
            duration.clamp(config.min_duration, config.max_duration)
        };

        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the new position
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.position()
    }

    pub fn position(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * Easing::POWER1_OUT.apply(t)
    }

    /// Landing point
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
