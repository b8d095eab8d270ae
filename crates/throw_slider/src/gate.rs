//! Image-load gate
//!
//! Item widths are only final once their images are decoded, so the first
//! measurement waits until every pending image has either loaded or failed.
//! A failed image still counts as settled: a broken image must not keep
//! the slider from starting.

use rustc_hash::FxHashSet;

/// How a pending image settled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageLoad {
    Loaded,
    Failed,
}

/// Tracks items whose images have not settled yet
#[derive(Debug, Default)]
pub struct LayoutGate {
    pending: FxHashSet<usize>,
}

impl LayoutGate {
    /// Gate on every item index reported as holding an image
    pub fn new(items_with_images: impl IntoIterator<Item = usize>) -> Self {
        Self {
            pending: items_with_images.into_iter().collect(),
        }
    }

    /// Mark an item's image as settled; returns true when this opened the gate
    pub fn settle(&mut self, item: usize, load: ImageLoad) -> bool {
        if !self.pending.remove(&item) {
            return false;
        }
        if load == ImageLoad::Failed {
            tracing::debug!(item, "image failed to load, measuring anyway");
        }
        self.pending.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
