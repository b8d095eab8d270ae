//! The infinite loop
//!
//! [`InfiniteLoop`] owns the loop timeline, the marker table and the index
//! state. It is the only place where geometry, timeline time and item
//! indices meet:
//!
//! ```text
//!  surface ──sample──▶ GeometrySnapshot ──build_loop──▶ Timeline + labels
//!                                                          │
//!                               OffsetStrategy::correct ◀──┘
//!                                          │
//!                                        times ──▶ closest_index / to_index
//! ```
//!
//! The loop never reads a clock. The host calls [`InfiniteLoop::tick`] and
//! then [`InfiniteLoop::render`] to push transforms to the surface.

use throw_animation::{
    wrap, wrap_range, Easing, PlayheadTween, Repeat, TickEvents, Timeline, TimelineEvent,
};

use crate::builder::build_loop;
use crate::config::SliderConfig;
use crate::error::{Result, SliderError};
use crate::geometry::{GeometrySnapshot, SnapStrategy};
use crate::index::{closest_index, IndexState};
use crate::navigation::{self, NavigationOptions, NavigationPlan};
use crate::offsets::OffsetStrategy;
use crate::surface::{ItemTransform, SlideSurface};

/// Laps added to the playhead whenever reverse playback reaches zero
const REVERSE_LAPS: f32 = 100.0;

/// How the loop is built and played
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopOptions {
    pub pixels_per_second: f32,
    pub snap: SnapStrategy,
    pub offsets: OffsetStrategy,
    pub repeat: Repeat,
    pub reversed: bool,
    /// Deep refreshes re-seek to the current marker instead of restoring
    /// progress
    pub draggable: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self::from_config(&SliderConfig::default())
    }
}

impl LoopOptions {
    pub fn from_config(config: &SliderConfig) -> Self {
        Self {
            pixels_per_second: config.pixels_per_second(),
            snap: config.snap_strategy(),
            offsets: OffsetStrategy::from_center(config.center),
            repeat: config.repeat_mode(),
            reversed: config.reversed,
            draggable: config.draggable,
        }
    }
}

/// What happened during one [`InfiniteLoop::tick`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoopTick {
    pub events: TickEvents,
    /// A navigation transition reached its destination this frame
    pub navigation_finished: bool,
}

impl LoopTick {
    pub fn moved(&self) -> bool {
        self.events.contains(&TimelineEvent::Update)
    }
}

/// Seamless loop over a row of items
#[derive(Debug)]
pub struct InfiniteLoop {
    timeline: Timeline,
    geometry: GeometrySnapshot,
    /// Raw marker times, one per item
    labels: Vec<f32>,
    /// Marker times after offset correction, in `[0, duration)`
    times: Vec<f32>,
    index: IndexState,
    navigation: Option<PlayheadTween>,
    options: LoopOptions,
}

impl InfiniteLoop {
    /// Measure the surface and build the loop
    ///
    /// Nothing on the surface is touched unless it can be measured.
    pub fn build(surface: &mut impl SlideSurface, options: LoopOptions) -> Result<Self> {
        GeometrySnapshot::check(surface)?;
        for index in 0..surface.item_count() {
            let transform = surface.transform(index);
            surface.set_transform(index, ItemTransform { x: 0.0, ..transform });
        }

        let geometry = GeometrySnapshot::sample(surface, options.snap)?;
        let mut timeline = Timeline::new();
        timeline.set_repeat(options.repeat);
        let labels = build_loop(
            &mut timeline,
            &geometry,
            options.pixels_per_second,
            options.snap,
        )?;
        geometry.apply(surface);
        let times = options
            .offsets
            .correct(&labels, &geometry, timeline.duration());

        let mut infinite_loop = Self {
            timeline,
            geometry,
            labels,
            times,
            index: IndexState::default(),
            navigation: None,
            options,
        };

        if options.reversed {
            infinite_loop.push_reverse_laps();
            infinite_loop.timeline.set_reversed(true);
        }
        infinite_loop.closest_index(true);
        infinite_loop.render(surface);

        tracing::debug!(
            items = infinite_loop.len(),
            total_width = infinite_loop.total_width(),
            duration = infinite_loop.duration(),
            "built infinite loop"
        );
        Ok(infinite_loop)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Re-measure the surface
    ///
    /// A shallow refresh resamples geometry and recomputes markers. A deep
    /// refresh also rebuilds the timeline segments. The playhead is restored
    /// afterwards (or, for a deep refresh of a draggable loop, moved to the
    /// current item's marker). On error the previous loop is kept.
    pub fn refresh(&mut self, surface: &mut impl SlideSurface, deep: bool) -> Result<()> {
        let progress = self.timeline.progress();
        self.timeline.set_progress(0.0);
        self.render(surface);

        let result = self.remeasure(surface, deep);
        match (&result, deep && self.options.draggable) {
            (Ok(()), true) => {
                let time = self.times[self.index.raw()];
                self.timeline.set_time(time);
            }
            _ => self.timeline.set_progress(progress),
        }
        if result.is_ok() {
            self.retarget_navigation();
        }
        self.render(surface);

        tracing::debug!(deep, ok = result.is_ok(), "refreshed loop");
        result
    }

    /// Point a transition in flight at the stored index's new marker
    ///
    /// The playhead takes the short way from where the refresh left it and
    /// arrives in the time the transition had left.
    fn retarget_navigation(&mut self) {
        let Some(tween) = self.navigation.take() else {
            return;
        };
        let duration = self.timeline.duration();
        let now = self.timeline.time();
        let half = duration / 2.0;
        let to = wrap_range(now - half, now + half, self.times[self.index.raw()]);

        let mut retargeted = PlayheadTween::new(now, to, tween.remaining(), tween.easing());
        if to < 0.0 || to > duration {
            retargeted = retargeted.wrapping(duration);
        }
        tracing::trace!(from = now, to, "retargeted navigation");
        self.navigation = Some(retargeted);
    }

    fn remeasure(&mut self, surface: &mut impl SlideSurface, deep: bool) -> Result<()> {
        let geometry = GeometrySnapshot::sample(surface, self.options.snap)?;
        if geometry.len() != self.len() && !deep {
            return Err(SliderError::InvalidConfiguration(format!(
                "item count changed from {} to {} without a deep refresh",
                self.len(),
                geometry.len()
            )));
        }
        if deep {
            self.labels = build_loop(
                &mut self.timeline,
                &geometry,
                self.options.pixels_per_second,
                self.options.snap,
            )?;
        }
        geometry.apply(surface);
        self.times = self
            .options
            .offsets
            .correct(&self.labels, &geometry, self.timeline.duration());
        self.geometry = geometry;

        if self.index.raw() >= self.times.len() {
            self.closest_index(true);
        }
        Ok(())
    }

    // =========================================================================
    // Index
    // =========================================================================

    /// Index of the marker nearest to the playhead, optionally stored
    pub fn closest_index(&mut self, set_current: bool) -> usize {
        let index = closest_index(&self.times, self.timeline.time(), self.timeline.duration());
        if set_current {
            self.index.set(index);
        }
        index
    }

    /// Current index, resolved from the playhead if a throw left it stale
    pub fn current(&mut self) -> usize {
        let times = &self.times;
        let timeline = &self.timeline;
        self.index
            .resolve_with(|| closest_index(times, timeline.time(), timeline.duration()))
    }

    /// Defer index resolution to the next [`current`](Self::current) call
    pub fn mark_index_dirty(&mut self) {
        self.index.mark_dirty();
    }

    pub fn is_index_dirty(&self) -> bool {
        self.index.is_dirty()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to item `target` (any integer, wrapped into range)
    ///
    /// Replaces any transition in flight. A zero duration jumps; otherwise
    /// the timeline is paused and its playhead tweened to the destination,
    /// over `|Δtime|` seconds when no duration is given.
    pub fn to_index(&mut self, target: isize, options: NavigationOptions) -> NavigationPlan {
        let duration = self.timeline.duration();
        let now = self.timeline.time();
        let plan = navigation::plan(target, self.index.raw(), &self.times, now, duration);

        self.navigation = None;
        self.index.set(plan.index);

        match options.duration {
            Some(length) if length <= 0.0 => self.timeline.set_time(wrap(plan.time, duration)),
            length => {
                let length = length.unwrap_or_else(|| (plan.time - now).abs());
                let mut tween = PlayheadTween::new(
                    now,
                    plan.time,
                    length,
                    options.ease.unwrap_or(Easing::Linear),
                );
                if plan.needs_wrap {
                    tween = tween.wrapping(duration);
                }
                self.timeline.pause();
                self.navigation = Some(tween);
            }
        }

        tracing::trace!(
            index = plan.index,
            time = plan.time,
            delta = plan.delta,
            "navigating"
        );
        plan
    }

    pub fn next(&mut self, options: NavigationOptions) -> NavigationPlan {
        let current = self.current() as isize;
        self.to_index(current + 1, options)
    }

    pub fn previous(&mut self, options: NavigationOptions) -> NavigationPlan {
        let current = self.current() as isize;
        self.to_index(current - 1, options)
    }

    pub fn cancel_navigation(&mut self) {
        self.navigation = None;
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.is_some()
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Advance a navigation transition, or the timeline itself
    pub fn tick(&mut self, dt: f32) -> LoopTick {
        let mut tick = LoopTick::default();

        if let Some(tween) = self.navigation.as_mut() {
            let time = tween.tick(dt);
            let finished = tween.is_finished();
            self.timeline.set_time(time);
            tick.events.push(TimelineEvent::Update);
            if finished {
                self.navigation = None;
                tick.navigation_finished = true;
            }
            return tick;
        }

        tick.events = self.timeline.tick(dt);
        if tick.events.contains(&TimelineEvent::ReverseComplete) {
            self.push_reverse_laps();
        }
        tick
    }

    /// Keep reverse playback from ever reaching time zero
    fn push_reverse_laps(&mut self) {
        let pushed = self.timeline.raw_time() + self.timeline.duration() * REVERSE_LAPS;
        self.timeline.set_total_time(pushed);
    }

    /// Play in the configured direction
    pub fn play(&mut self) {
        if self.options.reversed {
            self.timeline.reverse();
        } else {
            self.timeline.play();
        }
    }

    pub fn pause(&mut self) {
        self.timeline.pause();
    }

    pub fn is_playing(&self) -> bool {
        !self.timeline.is_paused()
    }

    /// Stop for good and drop every segment
    pub fn kill(&mut self) {
        self.navigation = None;
        self.timeline.kill();
    }

    /// Push the current item transforms to the surface
    pub fn render(&self, surface: &mut impl SlideSurface) {
        self.timeline
            .render(|target, x_percent| surface.set_x_percent(target.0, x_percent));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn progress(&self) -> f32 {
        self.timeline.progress()
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.timeline.set_progress(progress);
    }

    pub fn time(&self) -> f32 {
        self.timeline.time()
    }

    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    pub fn total_width(&self) -> f32 {
        self.geometry.total_width
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.geometry
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn options(&self) -> &LoopOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
