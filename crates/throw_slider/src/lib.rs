//! Throw Slider
//!
//! A draggable, infinite-loop carousel core. Items in a row are turned into
//! one seamless wrapping timeline; the slider keeps timeline time and item
//! index in step while it autoplays, navigates, is dragged and thrown, and
//! is re-laid out.
//!
//! # Features
//!
//! - **Infinite Loop**: Two segments per item plus a marker per item, repeat-forever playback
//! - **Index Tracking**: Nearest marker on a circular track with lazy resync after throws
//! - **Navigation**: `next`, `previous` and `go_to` along the shortest arc
//! - **Drag & Throw**: Pointer drag mapped onto progress, inertial throws snapped to items
//! - **Centered Mode**: Markers shifted so the active item sits mid-container
//! - **Headless Layout**: A taffy flex-row surface for hosts without a DOM
//!
//! Hosts implement [`SlideSurface`] (or use [`FlexRowSurface`]), mount a
//! [`ThrowSlider`] and call [`ThrowSlider::tick`] once per frame.

pub mod builder;
pub mod config;
pub mod drag;
pub mod error;
pub mod flex_row;
pub mod gate;
pub mod geometry;
pub mod index;
pub mod infinite_loop;
pub mod listeners;
pub mod navigation;
pub mod offsets;
pub mod slider;
pub mod state;
pub mod surface;

pub use config::{NavigationDefaults, SlideWidth, SliderConfig};
pub use drag::{DragAdapter, DragState, Release, ThrowStep};
pub use error::{Result, SliderError};
pub use flex_row::FlexRowSurface;
pub use gate::{ImageLoad, LayoutGate};
pub use geometry::{GeometrySnapshot, SnapStrategy};
pub use index::{circular_distance, closest_index, IndexState};
pub use infinite_loop::{InfiniteLoop, LoopOptions, LoopTick};
pub use listeners::{ListenerId, ListenerKind, Listeners};
pub use navigation::{NavigationOptions, NavigationPlan};
pub use offsets::OffsetStrategy;
pub use slider::{ChangeEvent, ThrowSlider};
pub use state::{Lifecycle, StateTransitions};
pub use surface::{ItemBox, ItemTransform, SlideSurface, Span};

/// Common imports for hosts
pub mod prelude {
    pub use crate::config::{SlideWidth, SliderConfig};
    pub use crate::flex_row::FlexRowSurface;
    pub use crate::gate::ImageLoad;
    pub use crate::navigation::NavigationOptions;
    pub use crate::slider::{ChangeEvent, ThrowSlider};
    pub use crate::surface::SlideSurface;
    pub use throw_animation::Easing;
}
