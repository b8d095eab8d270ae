//! Measurement surface
//!
//! The slider never measures anything itself. A [`SlideSurface`] reports the
//! container and item boxes and accepts the per-item horizontal transforms
//! the loop renders. All positions share one horizontal frame whose origin
//! is arbitrary but fixed; only differences between them matter.

/// Layout box of an item before any transform
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ItemBox {
    /// Left edge relative to the container's left edge
    pub offset_left: f32,
    pub width: f32,
}

/// Horizontal transform applied on top of an item's layout box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTransform {
    /// Translation in px
    pub x: f32,
    /// Translation in percent of the item's own width
    pub x_percent: f32,
    /// Horizontal scale around the item's center
    pub scale_x: f32,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            x_percent: 0.0,
            scale_x: 1.0,
        }
    }
}

impl ItemTransform {
    /// Total translation in px for an item `width` wide
    pub fn translation(&self, width: f32) -> f32 {
        self.x + self.x_percent / 100.0 * width
    }
}

/// Visual horizontal extent
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Host-side view of the slider's container and items
///
/// Measurements return `None` when the container or item is not attached
/// to a laid-out tree.
pub trait SlideSurface {
    fn item_count(&self) -> usize;

    /// Visual extent of the container
    fn container_span(&self) -> Option<Span>;

    /// Layout box of item `index`
    fn item_box(&self, index: usize) -> Option<ItemBox>;

    /// Current transform of item `index`
    fn transform(&self, index: usize) -> ItemTransform;

    fn set_transform(&mut self, index: usize, transform: ItemTransform);

    /// Width of the host window, used to ignore height-only resizes
    fn viewport_width(&self) -> f32;

    /// Padding after the last item, part of one loop's length
    fn end_padding(&self) -> f32 {
        0.0
    }

    /// Mark item `index` as the active one (or not)
    fn set_active(&mut self, _index: usize, _active: bool) {}

    /// Whether item `index` waits on an image before its size is final
    fn item_has_image(&self, _index: usize) -> bool {
        false
    }

    /// Whether items size to their content
    fn is_auto_width(&self) -> bool {
        true
    }

    /// Visual extent of item `index`, transform included
    fn item_span(&self, index: usize) -> Option<Span> {
        let container = self.container_span()?;
        let item = self.item_box(index)?;
        let transform = self.transform(index);
        let scaled = item.width * transform.scale_x;
        let left = container.left
            + item.offset_left
            + transform.translation(item.width)
            + (item.width - scaled) / 2.0;
        Some(Span::new(left, left + scaled))
    }

    /// Replace only the percentage translation of item `index`
    fn set_x_percent(&mut self, index: usize, x_percent: f32) {
        let transform = self.transform(index);
        self.set_transform(
            index,
            ItemTransform {
                x_percent,
                ..transform
            },
        );
    }
}
