//! Timeline orchestration
//!
//! A timeline holds tweens at absolute start times plus named labels. Its
//! playhead has two readings:
//!
//! - `total_time`: seconds played across every repeat (the raw time)
//! - `time`: position inside the current iteration, in `[0, duration]`
//!
//! ```text
//!   total_time: 0 ────── D ────── 2D ────── 3D ...   (Repeat::Infinite)
//!   time:       0 ──── D|0 ──── D|0 ──── D|0 ...
//! ```
//!
//! Timelines are advanced with [`Timeline::tick`] and rendered with
//! [`Timeline::render`], which reports the current value of every target.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::tween::{TargetId, Tween};
use crate::utils::wrap;

/// How many times a timeline plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Loop forever
    #[default]
    Infinite,
    /// Play once plus this many repeats
    Count(u32),
}

/// Notifications produced by [`Timeline::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The playhead moved
    Update,
    /// Forward playback reached the end of the last iteration
    Complete,
    /// Reverse playback reached time zero
    ReverseComplete,
}

/// Events emitted by a single tick
pub type TickEvents = SmallVec<[TimelineEvent; 2]>;

#[derive(Clone, Debug)]
struct Entry {
    start: f32,
    tween: Tween,
}

/// A sequence of tweens with labels, repeat and reverse playback
#[derive(Clone, Debug)]
pub struct Timeline {
    entries: Vec<Entry>,
    labels: IndexMap<String, f32>,
    duration: f32,
    total_time: f32,
    repeat: Repeat,
    paused: bool,
    reversed: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty, paused timeline that repeats forever
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            labels: IndexMap::new(),
            duration: 0.0,
            total_time: 0.0,
            repeat: Repeat::Infinite,
            paused: true,
            reversed: false,
        }
    }

    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.repeat = repeat;
        self.clamp_total_time();
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Place a tween at `at` seconds
    pub fn insert(&mut self, at: f32, tween: Tween) -> &mut Self {
        let start = at.max(0.0);
        self.duration = self.duration.max(start + tween.duration);
        self.entries.push(Entry { start, tween });
        self
    }

    /// Add (or move) a named label
    pub fn add_label(&mut self, name: impl Into<String>, at: f32) -> &mut Self {
        self.labels.insert(name.into(), at);
        self
    }

    /// Time of a label, if present
    pub fn label(&self, name: &str) -> Option<f32> {
        self.labels.get(name).copied()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = (&str, f32)> {
        self.labels.iter().map(|(name, time)| (name.as_str(), *time))
    }

    /// Remove every tween and label
    ///
    /// The playhead is kept; its iteration-local time is re-read against
    /// the new duration once tweens are added again.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.labels.clear();
        self.duration = 0.0;
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    // =========================================================================
    // Playhead
    // =========================================================================

    /// Length of one iteration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Length of every iteration together, `None` when repeating forever
    pub fn total_duration(&self) -> Option<f32> {
        match self.repeat {
            Repeat::Infinite => None,
            Repeat::Count(count) => Some(self.duration * (count as f32 + 1.0)),
        }
    }

    /// Seconds played across every iteration
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Unclamped playhead, identical to [`total_time`](Self::total_time)
    pub fn raw_time(&self) -> f32 {
        self.total_time
    }

    /// Move the playhead across iterations
    pub fn set_total_time(&mut self, total_time: f32) {
        self.total_time = total_time.max(0.0);
        self.clamp_total_time();
    }

    /// Position inside the current iteration
    pub fn time(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        if let Some(end) = self.total_duration() {
            if self.total_time >= end {
                return self.duration;
            }
        }
        wrap(self.total_time, self.duration)
    }

    /// Move the playhead inside the current iteration
    pub fn set_time(&mut self, time: f32) {
        if self.duration <= 0.0 {
            self.total_time = 0.0;
            return;
        }
        let mut iteration = (self.total_time / self.duration).floor();
        if let Repeat::Count(count) = self.repeat {
            iteration = iteration.min(count as f32);
        }
        self.total_time = iteration * self.duration + time.clamp(0.0, self.duration);
        self.clamp_total_time();
    }

    /// Iteration-local progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            self.time() / self.duration
        }
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.set_time(progress.clamp(0.0, 1.0) * self.duration);
    }

    fn clamp_total_time(&mut self) {
        if let Some(end) = self.total_duration() {
            self.total_time = self.total_time.min(end);
        }
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Play forward
    pub fn play(&mut self) {
        self.reversed = false;
        self.paused = false;
    }

    /// Play backward
    pub fn reverse(&mut self) {
        self.reversed = true;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Set the direction without changing the paused state
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether a tick would move the playhead
    pub fn is_active(&self) -> bool {
        if self.paused || self.duration <= 0.0 {
            return false;
        }
        if self.reversed {
            self.total_time > 0.0
        } else {
            match self.total_duration() {
                Some(end) => self.total_time < end,
                None => true,
            }
        }
    }

    /// Stop playback and drop every tween and label
    pub fn kill(&mut self) {
        self.pause();
        self.clear();
        self.total_time = 0.0;
    }

    /// Advance the playhead by `dt` seconds in the current direction
    pub fn tick(&mut self, dt: f32) -> TickEvents {
        let mut events = TickEvents::new();
        if !self.is_active() || dt <= 0.0 {
            return events;
        }

        if self.reversed {
            self.total_time -= dt;
            events.push(TimelineEvent::Update);
            if self.total_time <= 0.0 {
                self.total_time = 0.0;
                tracing::trace!("timeline reverse complete");
                events.push(TimelineEvent::ReverseComplete);
            }
        } else {
            self.total_time += dt;
            events.push(TimelineEvent::Update);
            if let Some(end) = self.total_duration() {
                if self.total_time >= end {
                    self.total_time = end;
                    tracing::trace!(end, "timeline complete");
                    events.push(TimelineEvent::Complete);
                }
            }
        }
        events
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Report the value of every target at the current playhead
    ///
    /// Tweens are applied in insertion order, so a later tween that has
    /// started overrides an earlier one on the same target. A tween that has
    /// not started only contributes its start value, and only when it
    /// renders immediately and nothing else has touched the target yet.
    pub fn render(&self, mut apply: impl FnMut(TargetId, f32)) {
        let Some(max_target) = self.entries.iter().map(|e| e.tween.target.0).max() else {
            return;
        };
        let local = self.time();
        let mut values: Vec<Option<f32>> = vec![None; max_target + 1];

        for entry in &self.entries {
            let slot = &mut values[entry.tween.target.0];
            if entry.start <= local {
                *slot = Some(entry.tween.value_at(local - entry.start));
            } else if entry.tween.immediate_render && slot.is_none() {
                *slot = Some(entry.tween.from);
            }
        }

        for (index, value) in values.into_iter().enumerate() {
            if let Some(value) = value {
                apply(TargetId(index), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segment_timeline() -> Timeline {
        // One target sliding out for 2s then re-entering for 3s
        let mut timeline = Timeline::new();
        timeline
            .insert(0.0, Tween::new(TargetId(0), 0.0, -200.0, 2.0))
            .insert(
                2.0,
                Tween::new(TargetId(0), 300.0, 0.0, 3.0).immediate_render(false),
            )
            .add_label("label0", 0.0);
        timeline
    }

    fn value_of(timeline: &Timeline, target: usize) -> Option<f32> {
        let mut found = None;
        timeline.render(|id, value| {
            if id.0 == target {
                found = Some(value);
            }
        });
        found
    }

    #[test]
    fn test_duration_is_latest_end() {
        let timeline = two_segment_timeline();
        assert_eq!(timeline.duration(), 5.0);
        assert_eq!(timeline.entry_count(), 2);
        assert_eq!(timeline.label("label0"), Some(0.0));
    }

    #[test]
    fn test_render_switches_segments() {
        let mut timeline = two_segment_timeline();
        timeline.set_time(1.0);
        assert_eq!(value_of(&timeline, 0), Some(-100.0));
        timeline.set_time(2.0);
        assert_eq!(value_of(&timeline, 0), Some(300.0));
        timeline.set_time(3.5);
        assert_eq!(value_of(&timeline, 0), Some(150.0));
    }

    #[test]
    fn test_infinite_tick_wraps_time() {
        let mut timeline = two_segment_timeline();
        timeline.play();
        let events = timeline.tick(6.0);
        assert_eq!(events.as_slice(), &[TimelineEvent::Update]);
        assert_eq!(timeline.total_time(), 6.0);
        assert_eq!(timeline.time(), 1.0);
        assert!((timeline.progress() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_finite_timeline_completes() {
        let mut timeline = two_segment_timeline();
        timeline.set_repeat(Repeat::Count(0));
        timeline.play();
        let events = timeline.tick(7.0);
        assert!(events.contains(&TimelineEvent::Complete));
        assert_eq!(timeline.time(), 5.0);
        assert!(!timeline.is_active());
        assert!(timeline.tick(1.0).is_empty());
    }

    #[test]
    fn test_reverse_complete_fires_at_zero() {
        let mut timeline = two_segment_timeline();
        timeline.set_total_time(1.0);
        timeline.reverse();
        let events = timeline.tick(2.0);
        assert!(events.contains(&TimelineEvent::ReverseComplete));
        assert_eq!(timeline.total_time(), 0.0);
        assert!(!timeline.is_active());
    }

    #[test]
    fn test_set_time_keeps_iteration() {
        let mut timeline = two_segment_timeline();
        timeline.set_total_time(12.0);
        timeline.set_time(4.0);
        assert_eq!(timeline.total_time(), 14.0);
        assert_eq!(timeline.time(), 4.0);
    }

    #[test]
    fn test_paused_timeline_does_not_move() {
        let mut timeline = two_segment_timeline();
        assert!(timeline.is_paused());
        assert!(timeline.tick(1.0).is_empty());
        assert_eq!(timeline.time(), 0.0);
    }

    #[test]
    fn test_clear_drops_tweens_and_labels() {
        let mut timeline = two_segment_timeline();
        timeline.clear();
        assert_eq!(timeline.duration(), 0.0);
        assert_eq!(timeline.label("label0"), None);
        assert_eq!(value_of(&timeline, 0), None);
    }
}
