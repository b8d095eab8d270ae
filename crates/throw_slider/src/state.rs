//! Event-driven state machines
//!
//! Slider states change only through numbered events, in the same
//! `(state, event) -> Option<state>` form for every machine:
//!
//! ```ignore
//! match (self, event) {
//!     (DragState::Idle, PRESS) => Some(DragState::Pressed),
//!     _ => None,
//! }
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// A state that reacts to numbered events
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply `event` in place, returning whether the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }
}

/// Slider lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Waiting for images before the first measurement
    #[default]
    Waiting,
    /// Loop built, input accepted
    Ready,
    /// Torn down; every operation is a no-op
    Disposed,
}

/// Lifecycle events
pub mod lifecycle_events {
    /// Every pending image settled
    pub const GATE_OPEN: u32 = 1;
    /// The component is being torn down
    pub const DISPOSE: u32 = 2;
}

impl Lifecycle {
    pub fn is_ready(&self) -> bool {
        matches!(self, Lifecycle::Ready)
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, Lifecycle::Disposed)
    }
}

impl StateTransitions for Lifecycle {
    fn on_event(&self, event: u32) -> Option<Self> {
        use lifecycle_events::*;
        match (self, event) {
            (Lifecycle::Waiting, GATE_OPEN) => Some(Lifecycle::Ready),
            (Lifecycle::Waiting | Lifecycle::Ready, DISPOSE) => Some(Lifecycle::Disposed),
            _ => None,
        }
    }
}
