//! Throw Animation
//!
//! Headless animation primitives used by the throw slider.
//!
//! # Features
//!
//! - **Timelines**: Tweens placed at absolute times, named labels, repeat and reverse
//! - **Playhead Tweens**: Scrub a timeline's time with easing and optional wrapping
//! - **Easing**: `power`, `sine` and `expo` families with parseable names
//! - **Inertia**: Velocity tracking and decelerating throws that land on a snapped value
//!
//! Nothing here touches a clock. Hosts advance everything with `tick(dt)` in
//! seconds, once per frame.

pub mod easing;
pub mod inertia;
pub mod timeline;
pub mod tween;
pub mod utils;

pub use easing::{EaseDirection, Easing, EasingParseError};
pub use inertia::{InertiaConfig, Throw, VelocityTracker};
pub use timeline::{Repeat, TickEvents, Timeline, TimelineEvent};
pub use tween::{PlayheadTween, TargetId, Tween};
pub use utils::{snap, wrap, wrap_range};
