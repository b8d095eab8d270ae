//! Registered host listeners
//!
//! The slider asks its host for a handful of event sources (resize,
//! hover, touch, viewport, drag). Each registration gets a [`ListenerId`]
//! so teardown can remove exactly what was added, and nothing else.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// Event sources a slider can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerEnter,
    PointerLeave,
    TouchStart,
    TouchEnd,
    /// Viewport enter/leave observer
    Viewport,
    Drag,
}

/// Set of live registrations
#[derive(Debug, Default)]
pub struct Listeners {
    entries: SlotMap<ListenerId, ListenerKind>,
}

impl Listeners {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    pub fn register(&mut self, kind: ListenerKind) -> ListenerId {
        let id = self.entries.insert(kind);
        tracing::trace!(?kind, "listener registered");
        id
    }

    /// Remove one registration, returning its kind if it was live
    pub fn remove(&mut self, id: ListenerId) -> Option<ListenerKind> {
        self.entries.remove(id)
    }

    /// Remove everything and return how many registrations were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.entries.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
