//! Throw slider component
//!
//! [`ThrowSlider`] is the host-facing component. It owns a surface, waits
//! for images before measuring, builds the [`InfiniteLoop`], and turns host
//! input (frames, resizes, hover, viewport progress, pointer events) into
//! loop operations. Observers are told about the active item through
//! [`ChangeEvent`]s.
//!
//! # Example
//!
//! ```ignore
//! let config = SliderConfig::new().with_autoplay(true);
//! let mut slider = ThrowSlider::new(surface, config)?
//!     .on_change(|event| println!("now at {}", event.index))
//!     .mount()?;
//!
//! // every frame
//! slider.tick(dt);
//! ```

use serde::Serialize;
use smallvec::SmallVec;

use crate::config::SliderConfig;
use crate::drag::{DragAdapter, Release};
use crate::error::Result;
use crate::gate::{ImageLoad, LayoutGate};
use crate::infinite_loop::{InfiniteLoop, LoopOptions};
use crate::listeners::{ListenerKind, Listeners};
use crate::navigation::{NavigationOptions, NavigationPlan};
use crate::state::{lifecycle_events, Lifecycle, StateTransitions};
use crate::surface::SlideSurface;

/// The active item changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub index: usize,
    /// `None` for the first notification after the loop is built
    pub previous: Option<usize>,
}

type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;

/// Infinite-loop carousel over a [`SlideSurface`]
pub struct ThrowSlider<S: SlideSurface> {
    surface: S,
    config: SliderConfig,
    lifecycle: Lifecycle,
    gate: LayoutGate,
    infinite_loop: Option<InfiniteLoop>,
    drag: DragAdapter,
    listeners: Listeners,
    callbacks: SmallVec<[ChangeCallback; 2]>,
    last_index: usize,
    /// Autoplay intent; hover, viewport and toggles flip it
    playing: bool,
    viewport_width: f32,
}

impl<S: SlideSurface> ThrowSlider<S> {
    /// Create an unmounted slider
    ///
    /// Fails on invalid configuration, including an unknown navigation ease.
    pub fn new(surface: S, config: SliderConfig) -> Result<Self> {
        config.validate()?;
        let viewport_width = surface.viewport_width();

        Ok(Self {
            surface,
            drag: DragAdapter::from_config(&config),
            playing: config.autoplay,
            config,
            lifecycle: Lifecycle::Waiting,
            gate: LayoutGate::default(),
            infinite_loop: None,
            listeners: Listeners::new(),
            callbacks: SmallVec::new(),
            last_index: 0,
            viewport_width,
        })
    }

    /// Register a change observer
    pub fn on_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Subscribe to host events and build the loop once images allow it
    ///
    /// Auto-width items holding images gate the first measurement; the loop
    /// is then built from [`image_settled`](Self::image_settled).
    pub fn mount(mut self) -> Result<Self> {
        self.listeners.register(ListenerKind::Resize);
        if self.config.autoplay {
            self.listeners.register(ListenerKind::Viewport);
            if self.config.pause_on_hover {
                self.listeners.register(ListenerKind::PointerEnter);
                self.listeners.register(ListenerKind::PointerLeave);
                self.listeners.register(ListenerKind::TouchStart);
                self.listeners.register(ListenerKind::TouchEnd);
            }
        }
        if self.config.draggable {
            self.listeners.register(ListenerKind::Drag);
        }

        if self.surface.is_auto_width() {
            let surface = &self.surface;
            let with_images = (0..surface.item_count()).filter(|&i| surface.item_has_image(i));
            self.gate = LayoutGate::new(with_images);
        }

        if self.gate.is_open() {
            self.build()?;
        } else {
            tracing::debug!(pending = self.gate.pending(), "waiting for images");
        }
        Ok(self)
    }

    /// An item's image loaded or failed; builds the loop after the last one
    pub fn image_settled(&mut self, item: usize, load: ImageLoad) -> Result<()> {
        if self.lifecycle != Lifecycle::Waiting {
            return Ok(());
        }
        if self.gate.settle(item, load) {
            self.build()?;
        }
        Ok(())
    }

    fn build(&mut self) -> Result<()> {
        let mut infinite_loop =
            InfiniteLoop::build(&mut self.surface, LoopOptions::from_config(&self.config))?;
        if self.playing {
            infinite_loop.play();
        }
        let index = infinite_loop.current();
        self.infinite_loop = Some(infinite_loop);
        self.lifecycle.apply(lifecycle_events::GATE_OPEN);

        tracing::debug!(items = self.surface.item_count(), "slider ready");
        self.last_index = index;
        self.surface.set_active(index, true);
        self.notify(ChangeEvent {
            index,
            previous: None,
        });
        Ok(())
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance by `dt` seconds and render
    ///
    /// While a pointer is down or a throw runs, the throw drives the loop
    /// instead of autoplay.
    pub fn tick(&mut self, dt: f32) -> Option<ChangeEvent> {
        if !self.lifecycle.is_ready() {
            return None;
        }
        let infinite_loop = self.infinite_loop.as_mut()?;

        if self.drag.state().is_active() {
            let step = self.drag.tick(infinite_loop, dt);
            if step.settled && self.playing {
                infinite_loop.play();
            }
            if step.moved {
                infinite_loop.render(&mut self.surface);
            }
        } else {
            let tick = infinite_loop.tick(dt);
            if tick.navigation_finished && self.playing {
                infinite_loop.play();
            }
            if tick.moved() {
                infinite_loop.render(&mut self.surface);
            }
        }
        self.check_change()
    }

    /// Emit a change event if the item under the playhead changed
    fn check_change(&mut self) -> Option<ChangeEvent> {
        let index = self.infinite_loop.as_mut()?.closest_index(false);
        if index == self.last_index {
            return None;
        }
        let event = ChangeEvent {
            index,
            previous: Some(self.last_index),
        };
        self.surface.set_active(self.last_index, false);
        self.surface.set_active(index, true);
        self.last_index = index;
        self.notify(event);
        Some(event)
    }

    fn notify(&mut self, event: ChangeEvent) {
        tracing::trace!(index = event.index, previous = ?event.previous, "active item changed");
        for callback in self.callbacks.iter_mut() {
            callback(&event);
        }
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Window resized; only a width change triggers a deep refresh
    ///
    /// Returns whether the loop was rebuilt. A failed refresh is logged and
    /// the previous loop kept.
    pub fn on_resize(&mut self, viewport_width: f32) -> bool {
        if !self.lifecycle.is_ready() || !self.listeners.contains(ListenerKind::Resize) {
            return false;
        }
        if viewport_width == self.viewport_width {
            return false;
        }
        self.viewport_width = viewport_width;

        let Some(infinite_loop) = self.infinite_loop.as_mut() else {
            return false;
        };
        match infinite_loop.refresh(&mut self.surface, true) {
            Ok(()) => {
                self.check_change();
                true
            }
            Err(err) => {
                tracing::warn!(%err, "resize refresh failed, keeping previous layout");
                false
            }
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.listeners.contains(ListenerKind::PointerEnter) {
            self.pause_timeline();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.listeners.contains(ListenerKind::PointerLeave) {
            self.play_timeline();
        }
    }

    pub fn touch_start(&mut self) {
        if self.listeners.contains(ListenerKind::TouchStart) {
            self.pause_timeline();
        }
    }

    pub fn touch_end(&mut self) {
        if self.listeners.contains(ListenerKind::TouchEnd) {
            self.play_timeline();
        }
    }

    /// Viewport observer recalculated; `progress` is how far the slider has
    /// scrolled through the viewport
    pub fn viewport_refresh(&mut self, progress: f32) {
        if self.listeners.contains(ListenerKind::Viewport) && progress <= 0.0 {
            self.pause_timeline();
        }
    }

    /// Viewport observer update; plays only while partly scrolled into view
    pub fn viewport_update(&mut self, progress: f32) {
        if !self.listeners.contains(ListenerKind::Viewport) {
            return;
        }
        if progress > 0.0 && progress < 1.0 {
            if !self.playing {
                self.play_timeline();
            }
        } else {
            self.pause_timeline();
        }
    }

    pub fn pointer_down(&mut self, x: f32, time_ms: f64) {
        if !self.accepts_drag() {
            return;
        }
        if let Some(infinite_loop) = self.infinite_loop.as_mut() {
            self.drag.press(infinite_loop, &mut self.surface, x, time_ms);
        }
    }

    pub fn pointer_move(&mut self, x: f32, time_ms: f64) -> Option<ChangeEvent> {
        if !self.accepts_drag() {
            return None;
        }
        let infinite_loop = self.infinite_loop.as_mut()?;
        if self.drag.drag(infinite_loop, x, time_ms) {
            infinite_loop.render(&mut self.surface);
        }
        self.check_change()
    }

    pub fn pointer_up(&mut self, time_ms: f64) -> Option<ChangeEvent> {
        if !self.accepts_drag() {
            return None;
        }
        let infinite_loop = self.infinite_loop.as_mut()?;
        if self.drag.release(infinite_loop, time_ms) == Release::Settled {
            infinite_loop.render(&mut self.surface);
            if self.playing {
                infinite_loop.play();
            }
        }
        self.check_change()
    }

    fn accepts_drag(&self) -> bool {
        self.lifecycle.is_ready() && self.listeners.contains(ListenerKind::Drag)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Go to the next item; unset options fall back to the configured defaults
    pub fn next(&mut self, options: Option<NavigationOptions>) -> Result<Option<NavigationPlan>> {
        self.navigate(options, |lp, opts| lp.next(opts))
    }

    pub fn previous(
        &mut self,
        options: Option<NavigationOptions>,
    ) -> Result<Option<NavigationPlan>> {
        self.navigate(options, |lp, opts| lp.previous(opts))
    }

    /// Go to item `index`; any integer is accepted and wrapped
    pub fn go_to(
        &mut self,
        index: isize,
        options: Option<NavigationOptions>,
    ) -> Result<Option<NavigationPlan>> {
        self.navigate(options, |lp, opts| lp.to_index(index, opts))
    }

    fn navigate(
        &mut self,
        options: Option<NavigationOptions>,
        go: impl FnOnce(&mut InfiniteLoop, NavigationOptions) -> NavigationPlan,
    ) -> Result<Option<NavigationPlan>> {
        if !self.lifecycle.is_ready() {
            return Ok(None);
        }
        let options = options
            .unwrap_or_default()
            .merged_with(&self.config.navigation)?;
        let Some(infinite_loop) = self.infinite_loop.as_mut() else {
            return Ok(None);
        };

        self.drag.cancel();
        let plan = go(infinite_loop, options);
        if !infinite_loop.is_navigating() {
            // Jumped
            infinite_loop.render(&mut self.surface);
            if self.playing {
                infinite_loop.play();
            }
            self.check_change();
        }
        Ok(Some(plan))
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Flip autoplay, or force it on or off
    pub fn toggle_autoplay(&mut self, force: Option<bool>) {
        match force.unwrap_or(!self.playing) {
            true => self.play_timeline(),
            false => self.pause_timeline(),
        }
    }

    fn play_timeline(&mut self) {
        self.playing = true;
        if let Some(infinite_loop) = self.infinite_loop.as_mut() {
            if !infinite_loop.is_navigating() {
                infinite_loop.play();
            }
        }
    }

    fn pause_timeline(&mut self) {
        self.playing = false;
        if let Some(infinite_loop) = self.infinite_loop.as_mut() {
            infinite_loop.pause();
        }
    }

    /// Index of the active item, once the loop is built
    pub fn current_index(&mut self) -> Option<usize> {
        if !self.lifecycle.is_ready() {
            return None;
        }
        self.infinite_loop.as_mut().map(InfiniteLoop::current)
    }

    /// Tear down: stop the loop and drop every listener and observer
    pub fn dispose(&mut self) {
        if !self.lifecycle.apply(lifecycle_events::DISPOSE) {
            return;
        }
        if let Some(infinite_loop) = self.infinite_loop.as_mut() {
            infinite_loop.kill();
        }
        self.drag.cancel();
        self.playing = false;
        self.callbacks.clear();
        let removed = self.listeners.clear();
        tracing::debug!(listeners = removed, "slider disposed");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn infinite_loop(&self) -> Option<&InfiniteLoop> {
        self.infinite_loop.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::SlideWidth;
    use crate::flex_row::FlexRowSurface;

    fn row(count: usize) -> FlexRowSurface {
        let mut surface = FlexRowSurface::new(300.0, 0.0, SlideWidth::Auto).unwrap();
        for _ in 0..count {
            surface.push_item(100.0).unwrap();
        }
        surface
    }

    fn recorded(
        surface: FlexRowSurface,
        config: SliderConfig,
    ) -> (ThrowSlider<FlexRowSurface>, Rc<RefCell<Vec<ChangeEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let slider = ThrowSlider::new(surface, config)
            .unwrap()
            .on_change(move |event| sink.borrow_mut().push(*event))
            .mount()
            .unwrap();
        (slider, events)
    }

    fn time(slider: &ThrowSlider<FlexRowSurface>) -> f32 {
        slider.infinite_loop().unwrap().time()
    }

    #[test]
    fn test_mount_emits_initial_change() {
        let (mut slider, events) = recorded(row(5), SliderConfig::default());
        assert!(slider.lifecycle().is_ready());
        assert_eq!(
            events.borrow().as_slice(),
            &[ChangeEvent {
                index: 0,
                previous: None
            }]
        );
        assert_eq!(slider.surface().active_index(), Some(0));
        assert_eq!(slider.current_index(), Some(0));
        assert!(!slider.is_playing());
    }

    #[test]
    fn test_autoplay_advances_and_reports_changes() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, events) = recorded(row(5), config);
        assert!(slider.is_playing());
        for _ in 0..6 {
            slider.tick(0.1);
        }
        assert!((time(&slider) - 0.6).abs() < 1e-4);
        assert_eq!(
            events.borrow().last(),
            Some(&ChangeEvent {
                index: 1,
                previous: Some(0)
            })
        );
        assert_eq!(slider.surface().active_index(), Some(1));
    }

    #[test]
    fn test_without_autoplay_nothing_moves() {
        let (mut slider, events) = recorded(row(5), SliderConfig::default());
        assert_eq!(slider.tick(1.0), None);
        assert_eq!(time(&slider), 0.0);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_hover_pauses_autoplay() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, _) = recorded(row(5), config);
        slider.pointer_enter();
        assert!(!slider.is_playing());
        slider.tick(0.5);
        assert_eq!(time(&slider), 0.0);

        slider.pointer_leave();
        assert!(slider.is_playing());
        slider.tick(0.5);
        assert!((time(&slider) - 0.5).abs() < 1e-4);

        slider.touch_start();
        assert!(!slider.is_playing());
        slider.touch_end();
        assert!(slider.is_playing());
    }

    #[test]
    fn test_hover_ignored_without_autoplay_or_when_disabled() {
        let (mut slider, _) = recorded(row(5), SliderConfig::default());
        slider.pointer_leave();
        assert!(!slider.is_playing());

        let config = SliderConfig::default()
            .with_autoplay(true)
            .with_pause_on_hover(false);
        let (mut slider, _) = recorded(row(5), config);
        slider.pointer_enter();
        assert!(slider.is_playing());
    }

    #[test]
    fn test_viewport_pause_and_resume() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, _) = recorded(row(5), config);
        slider.viewport_refresh(0.0);
        assert!(!slider.is_playing());
        slider.viewport_update(0.4);
        assert!(slider.is_playing());
        slider.viewport_update(1.0);
        assert!(!slider.is_playing());
    }

    #[test]
    fn test_image_gate_defers_build() {
        let mut surface = row(4);
        surface.set_has_image(1, true);
        surface.set_has_image(3, true);
        let (mut slider, events) = recorded(surface, SliderConfig::default());
        assert_eq!(slider.lifecycle(), Lifecycle::Waiting);
        assert_eq!(slider.current_index(), None);
        assert_eq!(slider.next(None).unwrap(), None);
        assert!(events.borrow().is_empty());

        slider.image_settled(1, ImageLoad::Failed).unwrap();
        assert_eq!(slider.lifecycle(), Lifecycle::Waiting);
        slider.image_settled(3, ImageLoad::Loaded).unwrap();
        assert!(slider.lifecycle().is_ready());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_fixed_width_slides_skip_image_gate() {
        let mut surface = FlexRowSurface::new(300.0, 0.0, SlideWidth::Px(100.0)).unwrap();
        for _ in 0..4 {
            surface.push_item(0.0).unwrap();
        }
        surface.set_has_image(0, true);
        let (slider, _) = recorded(surface, SliderConfig::default());
        assert!(slider.lifecycle().is_ready());
    }

    #[test]
    fn test_next_uses_configured_defaults() {
        let (mut slider, events) = recorded(row(5), SliderConfig::default());
        let plan = slider.next(None).unwrap().unwrap();
        assert_eq!(plan.index, 1);

        // power1.inOut is halfway at half time
        slider.tick(0.2);
        assert!((time(&slider) - 0.5).abs() < 1e-3);
        slider.tick(0.2);
        assert!((time(&slider) - 1.0).abs() < 1e-4);
        assert_eq!(slider.current_index(), Some(1));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_go_to_instant_jumps() {
        let (mut slider, events) = recorded(row(5), SliderConfig::default());
        slider
            .go_to(3, Some(NavigationOptions::instant()))
            .unwrap();
        assert_eq!(time(&slider), 3.0);
        assert_eq!(
            events.borrow().last(),
            Some(&ChangeEvent {
                index: 3,
                previous: Some(0)
            })
        );
        slider.previous(Some(NavigationOptions::instant())).unwrap();
        assert_eq!(slider.current_index(), Some(2));
    }

    #[test]
    fn test_unknown_ease_is_rejected() {
        let config = SliderConfig::default().with_navigation(0.4, "bounce.sideways");
        assert!(ThrowSlider::new(row(3), config).is_err());
    }

    #[test]
    fn test_autoplay_resumes_after_navigation() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, _) = recorded(row(5), config);
        slider.go_to(2, Some(NavigationOptions::default().with_duration(0.5))).unwrap();
        slider.tick(0.5);
        assert!((time(&slider) - 2.0).abs() < 1e-4);
        slider.tick(0.25);
        assert!((time(&slider) - 2.25).abs() < 1e-4);
    }

    #[test]
    fn test_toggle_autoplay() {
        let (mut slider, _) = recorded(row(5), SliderConfig::default());
        slider.toggle_autoplay(None);
        assert!(slider.is_playing());
        slider.toggle_autoplay(Some(true));
        assert!(slider.is_playing());
        slider.toggle_autoplay(None);
        assert!(!slider.is_playing());
        slider.toggle_autoplay(Some(false));
        assert!(!slider.is_playing());
    }

    #[test]
    fn test_drag_and_throw_lands_on_item() {
        let (mut slider, events) = recorded(row(5), SliderConfig::default());
        slider.pointer_down(300.0, 0.0);
        for step in 1..=5 {
            slider.pointer_move(300.0 - 20.0 * step as f32, 16.0 * step as f64);
        }
        slider.pointer_up(80.0);
        for _ in 0..120 {
            slider.tick(1.0 / 60.0);
        }
        assert!((time(&slider) - 3.0).abs() < 1e-3);
        assert_eq!(slider.current_index(), Some(3));
        assert_eq!(events.borrow().last().map(|e| e.index), Some(3));
        assert_eq!(slider.surface().active_index(), Some(3));
    }

    #[test]
    fn test_autoplay_holds_while_pressed() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, _) = recorded(row(5), config);
        slider.pointer_down(100.0, 0.0);
        slider.tick(1.0);
        assert_eq!(time(&slider), 0.0);
    }

    #[test]
    fn test_not_draggable_ignores_pointer() {
        let config = SliderConfig::default().with_draggable(false);
        let (mut slider, _) = recorded(row(5), config);
        slider.pointer_down(300.0, 0.0);
        assert_eq!(slider.pointer_move(200.0, 16.0), None);
        assert_eq!(time(&slider), 0.0);
    }

    #[test]
    fn test_resize_refreshes_on_width_change_only() {
        let mut surface = FlexRowSurface::new(600.0, 0.0, SlideWidth::Auto).unwrap();
        for _ in 0..3 {
            surface.push_item(100.0).unwrap();
        }
        surface.set_viewport_width(600.0);
        let (mut slider, _) = recorded(surface, SliderConfig::default());
        assert_eq!(slider.infinite_loop().unwrap().total_width(), 600.0);

        slider.surface_mut().set_container_width(900.0).unwrap();
        assert!(!slider.on_resize(600.0));
        assert!(slider.on_resize(900.0));
        assert_eq!(slider.infinite_loop().unwrap().total_width(), 900.0);
        assert!(!slider.on_resize(900.0));
    }

    fn five_wide() -> FlexRowSurface {
        let mut surface = FlexRowSurface::new(500.0, 0.0, SlideWidth::Auto).unwrap();
        for _ in 0..5 {
            surface.push_item(100.0).unwrap();
        }
        surface.set_viewport_width(500.0);
        surface
    }

    #[test]
    fn test_resize_during_navigation_lands_on_target() {
        for draggable in [true, false] {
            let config = SliderConfig::default().with_draggable(draggable);
            let (mut slider, events) = recorded(five_wide(), config);
            slider
                .go_to(2, Some(NavigationOptions::default().with_duration(1.0)))
                .unwrap();
            slider.tick(0.3);

            slider.surface_mut().set_container_width(1000.0).unwrap();
            assert!(slider.on_resize(1000.0));
            assert_eq!(slider.infinite_loop().unwrap().duration(), 10.0);
            assert!(slider.infinite_loop().unwrap().is_navigating());

            for _ in 0..120 {
                slider.tick(1.0 / 60.0);
            }
            assert!(
                (time(&slider) - 4.0).abs() < 1e-3,
                "draggable={draggable} time={}",
                time(&slider)
            );
            assert!(!slider.infinite_loop().unwrap().is_navigating());
            assert_eq!(slider.current_index(), Some(2));
            assert_eq!(slider.surface().active_index(), Some(2));
            assert_eq!(events.borrow().last().map(|e| e.index), Some(2));

            slider.next(Some(NavigationOptions::instant())).unwrap();
            assert_eq!(time(&slider), 6.0);
            assert_eq!(slider.current_index(), Some(3));
        }
    }

    #[test]
    fn test_resize_during_drag_settles_on_marker() {
        let (mut slider, _) = recorded(five_wide(), SliderConfig::default());
        slider.pointer_down(300.0, 0.0);
        slider.pointer_move(280.0, 16.0);
        slider.pointer_move(260.0, 32.0);

        slider.surface_mut().set_container_width(1000.0).unwrap();
        assert!(slider.on_resize(1000.0));

        slider.pointer_move(240.0, 48.0);
        slider.pointer_move(220.0, 64.0);
        slider.pointer_up(80.0);
        for _ in 0..300 {
            slider.tick(1.0 / 60.0);
        }

        let marker = time(&slider) / 2.0;
        assert!((marker - marker.round()).abs() < 1e-3, "time={}", time(&slider));
        let index = slider.current_index();
        assert_eq!(index, Some(marker.round() as usize % 5));
        assert_eq!(slider.surface().active_index(), index);
    }

    #[test]
    fn test_failed_resize_keeps_loop() {
        let (mut slider, _) = recorded(row(5), SliderConfig::default());
        slider.surface_mut().detach();
        assert!(!slider.on_resize(1280.0));
        assert_eq!(slider.infinite_loop().unwrap().duration(), 5.0);
    }

    #[test]
    fn test_dispose_removes_listeners() {
        let config = SliderConfig::default().with_autoplay(true);
        let (mut slider, events) = recorded(row(5), config);
        // resize, viewport, four hover/touch, drag
        assert_eq!(slider.listeners().len(), 7);

        slider.dispose();
        assert!(slider.lifecycle().is_disposed());
        assert!(slider.listeners().is_empty());
        assert!(!slider.is_playing());
        assert_eq!(slider.tick(1.0), None);
        assert_eq!(slider.next(None).unwrap(), None);
        assert_eq!(slider.current_index(), None);
        slider.pointer_leave();
        assert!(!slider.is_playing());
        assert_eq!(events.borrow().len(), 1);
        // Twice is fine
        slider.dispose();
    }

    #[test]
    fn test_mount_fails_without_items() {
        let result = ThrowSlider::new(row(0), SliderConfig::default())
            .unwrap()
            .mount();
        assert!(result.is_err());
    }
}
