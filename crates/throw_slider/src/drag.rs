//! Drag and throw
//!
//! A drag moves a virtual "proxy" position in px. The proxy maps onto loop
//! progress with a fixed ratio of one loop per `total_width` px:
//!
//! ```text
//!   progress = wrap01(start_progress + (start_x - proxy_x) / total_width)
//! ```
//!
//! Dragging left (proxy decreasing) plays the loop forward. On release the
//! proxy is thrown with the tracked velocity and lands on a position whose
//! progress is exactly a marker, so the slider never rests between items.

use throw_animation::{wrap, InertiaConfig, Throw, VelocityTracker};

use crate::config::SliderConfig;
use crate::index::closest_index;
use crate::infinite_loop::InfiniteLoop;
use crate::state::StateTransitions;
use crate::surface::SlideSurface;

/// Landing points closer than this (px) count as already reached
const SETTLE_EPSILON: f32 = 0.5;

/// Pointer session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer down, not moved yet
    Pressed,
    /// Pointer down and moving
    Dragging,
    /// Released with a throw still travelling
    Throwing,
}

impl DragState {
    /// Whether a pointer is down
    pub fn is_held(&self) -> bool {
        matches!(self, DragState::Pressed | DragState::Dragging)
    }

    /// Whether the adapter currently drives the loop
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

/// Pointer session events
pub mod drag_events {
    pub const PRESS: u32 = 1;
    pub const MOVE: u32 = 2;
    pub const RELEASE: u32 = 3;
    /// Released with a throw to run
    pub const THROW: u32 = 4;
    /// A throw reached its target
    pub const SETTLED: u32 = 5;
}

impl StateTransitions for DragState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use drag_events::*;
        match (self, event) {
            // A press also interrupts a running throw
            (DragState::Idle | DragState::Throwing, PRESS) => Some(DragState::Pressed),
            (DragState::Pressed, MOVE) => Some(DragState::Dragging),
            (DragState::Pressed | DragState::Dragging, RELEASE) => Some(DragState::Idle),
            (DragState::Pressed | DragState::Dragging, THROW) => Some(DragState::Throwing),
            (DragState::Throwing, SETTLED) => Some(DragState::Idle),
            _ => None,
        }
    }
}

/// Outcome of a pointer release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// No pointer session was active
    Ignored,
    /// Already on the snapped position
    Settled,
    /// A throw is running; the index resolves lazily
    Thrown,
}

/// Outcome of one throw frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrowStep {
    pub moved: bool,
    pub settled: bool,
}

/// Turns pointer input into loop progress
#[derive(Debug, Clone)]
pub struct DragAdapter {
    state: DragState,
    tracker: VelocityTracker,
    inertia: InertiaConfig,
    small_movement_threshold: f32,
    /// Progress per px, `1 / total_width` at press time
    ratio: f32,
    start_progress: f32,
    /// Proxy position at press time
    start_x: f32,
    proxy_x: f32,
    pointer_start: f32,
    /// Shift between the proxy frame of the previous session and this one
    init_change_x: f32,
    last_snap: Option<f32>,
    throw: Option<Throw>,
}

impl DragAdapter {
    pub fn new(inertia: InertiaConfig, small_movement_threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            tracker: VelocityTracker::new(),
            inertia,
            small_movement_threshold,
            ratio: 0.0,
            start_progress: 0.0,
            start_x: 0.0,
            proxy_x: 0.0,
            pointer_start: 0.0,
            init_change_x: 0.0,
            last_snap: None,
            throw: None,
        }
    }

    pub fn from_config(config: &SliderConfig) -> Self {
        let inertia = InertiaConfig::default()
            .with_resistance(config.throw_resistance)
            .with_min_velocity(config.min_throw_velocity);
        Self::new(inertia, config.small_movement_threshold)
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_throwing(&self) -> bool {
        self.throw.is_some()
    }

    pub fn proxy_x(&self) -> f32 {
        self.proxy_x
    }

    /// Start a pointer session at `pointer_x`
    ///
    /// Stops any navigation or throw, re-measures the surface and rebases
    /// the proxy so the first move does not jump.
    pub fn press(
        &mut self,
        infinite_loop: &mut InfiniteLoop,
        surface: &mut impl SlideSurface,
        pointer_x: f32,
        time_ms: f64,
    ) {
        if !self.state.apply(drag_events::PRESS) {
            return;
        }
        infinite_loop.cancel_navigation();
        self.throw = None;

        let previous_x = self.proxy_x;
        self.start_progress = infinite_loop.progress();
        if let Err(err) = infinite_loop.refresh(surface, false) {
            tracing::warn!(%err, "refresh on press failed, keeping previous geometry");
        }
        self.ratio = 1.0 / infinite_loop.total_width();
        self.start_x = self.start_progress / -self.ratio;
        self.init_change_x = self.start_x - previous_x;
        self.proxy_x = self.start_x;
        self.pointer_start = pointer_x;

        self.tracker.reset();
        self.tracker.add(time_ms, self.proxy_x);
        tracing::trace!(start_progress = self.start_progress, "drag pressed");
    }

    /// Follow the pointer; returns whether the loop moved
    pub fn drag(&mut self, infinite_loop: &mut InfiniteLoop, pointer_x: f32, time_ms: f64) -> bool {
        if !self.state.is_held() {
            return false;
        }
        self.state.apply(drag_events::MOVE);
        self.proxy_x = self.start_x + (pointer_x - self.pointer_start);
        self.tracker.add(time_ms, self.proxy_x);
        infinite_loop.set_progress(self.progress_at(self.proxy_x));
        true
    }

    /// End the pointer session and throw towards the nearest marker
    pub fn release(&mut self, infinite_loop: &mut InfiniteLoop, time_ms: f64) -> Release {
        if !self.state.is_held() {
            return Release::Ignored;
        }
        let velocity = self.tracker.velocity_at(time_ms);
        infinite_loop.closest_index(true);

        let throw = self.launch(infinite_loop, velocity);
        if throw.is_finished() || (throw.target() - self.proxy_x).abs() < SETTLE_EPSILON {
            self.proxy_x = throw.target();
            infinite_loop.set_progress(self.progress_at(self.proxy_x));
            infinite_loop.closest_index(true);
            self.state.apply(drag_events::RELEASE);
            return Release::Settled;
        }

        tracing::trace!(
            velocity,
            from = self.proxy_x,
            to = throw.target(),
            "throwing"
        );
        self.throw = Some(throw);
        infinite_loop.mark_index_dirty();
        self.state.apply(drag_events::THROW);
        Release::Thrown
    }

    fn launch(&mut self, infinite_loop: &InfiniteLoop, velocity: f32) -> Throw {
        let barely_moved = (self.start_x - self.proxy_x).abs() < self.small_movement_threshold;
        match self.last_snap {
            // A press during a throw rebases the proxy; keep the old landing
            // point instead of reading the rebase as velocity
            Some(last_snap) if barely_moved => {
                let target = last_snap + self.init_change_x;
                Throw::launch(self.proxy_x, velocity, &self.inertia, |_| target)
            }
            _ => {
                let throw = Throw::launch(self.proxy_x, velocity, &self.inertia, |value| {
                    self.snap_value(infinite_loop, value)
                });
                self.last_snap = Some(throw.target());
                throw
            }
        }
    }

    /// Proxy position nearest to `value` whose loop time is a marker
    ///
    /// The landing point is reached the short way round, so it may lie
    /// outside the current lap.
    pub fn snap_value(&self, infinite_loop: &InfiniteLoop, value: f32) -> f32 {
        let duration = infinite_loop.duration();
        if duration <= 0.0 || self.ratio == 0.0 {
            return value;
        }
        let times = infinite_loop.times();
        let time = -(value * self.ratio) * duration;
        let wrapped = wrap(time, duration);
        let snap_time = times[closest_index(times, wrapped, duration)];
        let mut dif = snap_time - wrapped;
        if dif.abs() > duration / 2.0 {
            dif += if dif < 0.0 { duration } else { -duration };
        }
        (time + dif) / duration / -self.ratio
    }

    /// Advance a running throw
    pub fn tick(&mut self, infinite_loop: &mut InfiniteLoop, dt: f32) -> ThrowStep {
        let Some(throw) = self.throw.as_mut() else {
            return ThrowStep::default();
        };
        let x = throw.tick(dt);
        let settled = throw.is_finished();
        self.proxy_x = x;
        infinite_loop.set_progress(self.progress_at(x));

        if settled {
            self.throw = None;
            self.state.apply(drag_events::SETTLED);
            infinite_loop.closest_index(true);
        }
        ThrowStep {
            moved: true,
            settled,
        }
    }

    /// Drop the session and any throw
    pub fn cancel(&mut self) {
        self.throw = None;
        self.state = DragState::Idle;
        self.tracker.reset();
    }

    fn progress_at(&self, x: f32) -> f32 {
        wrap(self.start_progress + (self.start_x - x) * self.ratio, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::RowSurface;
    use crate::infinite_loop::LoopOptions;

    fn setup() -> (RowSurface, InfiniteLoop, DragAdapter) {
        let mut surface = RowSurface::uniform(5, 100.0);
        let infinite_loop = InfiniteLoop::build(&mut surface, LoopOptions::default()).unwrap();
        let adapter = DragAdapter::from_config(&SliderConfig::default());
        (surface, infinite_loop, adapter)
    }

    fn settle(adapter: &mut DragAdapter, lp: &mut InfiniteLoop) {
        for _ in 0..400 {
            if adapter.tick(lp, 1.0 / 60.0).settled {
                return;
            }
        }
        panic!("throw never settled");
    }

    #[test]
    fn test_drag_state_transitions() {
        use drag_events::*;
        let mut state = DragState::Idle;
        assert_eq!(state.on_event(MOVE), None);
        assert!(state.apply(PRESS));
        assert!(state.apply(MOVE));
        assert_eq!(state, DragState::Dragging);
        // Further moves keep dragging
        assert!(!state.apply(MOVE));
        assert!(state.apply(THROW));
        assert!(state.apply(PRESS));
        assert_eq!(state, DragState::Pressed);
        assert!(state.apply(RELEASE));
        assert_eq!(state, DragState::Idle);
        assert_eq!(DragState::Idle.on_event(SETTLED), None);
    }

    #[test]
    fn test_throw_landing_at_7_2_snaps_to_marker_2() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 0.0, 0.0);
        // Proxy -720 is time 7.2 on a 5 s loop, i.e. 2.2 in the second lap
        let snapped = adapter.snap_value(&lp, -720.0);
        assert!((snapped + 700.0).abs() < 1e-2, "snapped to {snapped}");
    }

    #[test]
    fn test_snap_takes_short_way_round_the_seam() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 0.0, 0.0);
        // Time 4.8 is nearest marker 0 one lap later, at 5.0
        let snapped = adapter.snap_value(&lp, -480.0);
        assert!((snapped + 500.0).abs() < 1e-2, "snapped to {snapped}");
    }

    #[test]
    fn test_drag_maps_pointer_to_progress() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 300.0, 0.0);
        assert_eq!(adapter.state(), DragState::Pressed);

        assert!(adapter.drag(&mut lp, 250.0, 16.0));
        assert_eq!(adapter.state(), DragState::Dragging);
        assert!((lp.progress() - 0.1).abs() < 1e-5);
        assert!((lp.time() - 0.5).abs() < 1e-4);

        // Dragging right past the start wraps to the end of the loop
        adapter.drag(&mut lp, 350.0, 32.0);
        assert!((lp.progress() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_fast_release_throws_to_a_marker() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 300.0, 0.0);
        for step in 1..=5 {
            adapter.drag(&mut lp, 300.0 - 20.0 * step as f32, 16.0 * step as f64);
        }
        // 20 px per 16 ms to the left
        assert_eq!(adapter.release(&mut lp, 80.0), Release::Thrown);
        assert_eq!(adapter.state(), DragState::Throwing);
        assert!(lp.is_index_dirty());

        settle(&mut adapter, &mut lp);
        assert_eq!(adapter.state(), DragState::Idle);
        assert!((lp.time() - 3.0).abs() < 1e-3, "landed at {}", lp.time());
        assert!(!lp.is_index_dirty());
        assert_eq!(lp.current(), 3);
    }

    #[test]
    fn test_slow_release_settles_on_nearest_marker() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 300.0, 0.0);
        adapter.drag(&mut lp, 170.0, 50.0);
        // Pointer held still for a while before letting go
        assert_eq!(adapter.release(&mut lp, 600.0), Release::Thrown);
        settle(&mut adapter, &mut lp);
        assert!((lp.time() - 1.0).abs() < 1e-3, "landed at {}", lp.time());
        assert_eq!(lp.current(), 1);
    }

    #[test]
    fn test_release_on_marker_settles_immediately() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 300.0, 0.0);
        adapter.drag(&mut lp, 200.0, 400.0);
        assert_eq!(adapter.release(&mut lp, 900.0), Release::Settled);
        assert_eq!(adapter.state(), DragState::Idle);
        assert_eq!(lp.current(), 1);
    }

    #[test]
    fn test_small_movement_reuses_last_snap() {
        let (mut surface, mut lp, mut adapter) = setup();
        adapter.press(&mut lp, &mut surface, 300.0, 0.0);
        for step in 1..=5 {
            adapter.drag(&mut lp, 300.0 - 20.0 * step as f32, 16.0 * step as f64);
        }
        // Heading for marker 3
        adapter.release(&mut lp, 80.0);
        adapter.tick(&mut lp, 0.05);
        assert!(adapter.is_throwing());
        assert!(lp.time() < 2.0);

        // Catch it and let go almost in place
        adapter.press(&mut lp, &mut surface, 100.0, 200.0);
        assert!(!adapter.is_throwing());
        adapter.drag(&mut lp, 104.0, 216.0);
        assert_eq!(adapter.release(&mut lp, 220.0), Release::Thrown);
        settle(&mut adapter, &mut lp);
        // Still lands where the first throw was heading
        assert!((lp.time() - 3.0).abs() < 1e-3, "landed at {}", lp.time());
        assert_eq!(lp.current(), 3);
    }

    #[test]
    fn test_small_movement_without_history_snaps_normally() {
        let (mut surface, mut lp, mut adapter) = setup();
        lp.set_progress(0.46);
        adapter.press(&mut lp, &mut surface, 100.0, 0.0);
        adapter.drag(&mut lp, 97.0, 30.0);
        adapter.release(&mut lp, 500.0);
        settle(&mut adapter, &mut lp);
        assert!((lp.time() - 2.0).abs() < 1e-3, "landed at {}", lp.time());
    }

    #[test]
    fn test_press_cancels_navigation() {
        let (mut surface, mut lp, mut adapter) = setup();
        lp.next(crate::navigation::NavigationOptions::default().with_duration(1.0));
        assert!(lp.is_navigating());
        adapter.press(&mut lp, &mut surface, 0.0, 0.0);
        assert!(!lp.is_navigating());
    }

    #[test]
    fn test_input_without_press_is_ignored() {
        let (_, mut lp, mut adapter) = setup();
        assert!(!adapter.drag(&mut lp, 10.0, 0.0));
        assert_eq!(adapter.release(&mut lp, 0.0), Release::Ignored);
        assert_eq!(adapter.tick(&mut lp, 0.1), ThrowStep::default());
    }
}
