//! Flex row surface
//!
//! A [`SlideSurface`] backed by a taffy flex layout: the container is a
//! single non-wrapping row of fixed width, items grow to fill it but never
//! shrink, and consecutive items are separated by the slide gap.
//!
//! ```text
//!  ┌──────────── container ────────────┐
//!  │ [item 0] gap [item 1] gap [item 2]│ gap [item 3] ...
//!  └───────────────────────────────────┘
//! ```
//!
//! Useful for headless hosts (the CLI, tests) and as the reference for what
//! a real host surface reports.

use taffy::prelude::*;

use crate::config::{SlideWidth, SliderConfig};
use crate::error::{Result, SliderError};
use crate::surface::{ItemBox, ItemTransform, SlideSurface, Span};

#[derive(Clone, Debug)]
struct FlexItem {
    node: NodeId,
    transform: ItemTransform,
    has_image: bool,
}

/// Headless flex-row layout of slider items
pub struct FlexRowSurface {
    taffy: TaffyTree<()>,
    container: NodeId,
    items: Vec<FlexItem>,
    /// Laid-out boxes, recomputed after every change
    boxes: Vec<ItemBox>,
    container_width: f32,
    viewport_width: f32,
    gap: f32,
    slide_width: SlideWidth,
    attached: bool,
    active: Option<usize>,
}

impl FlexRowSurface {
    /// Empty row `container_width` px wide
    pub fn new(container_width: f32, gap: f32, slide_width: SlideWidth) -> Result<Self> {
        let mut taffy = TaffyTree::new();
        let container = taffy
            .new_leaf(container_style(container_width, gap))
            .map_err(layout_error)?;

        Ok(Self {
            taffy,
            container,
            items: Vec::new(),
            boxes: Vec::new(),
            container_width,
            viewport_width: container_width,
            gap,
            slide_width,
            attached: true,
            active: None,
        })
    }

    /// Row sized and spaced from a slider configuration
    pub fn from_config(container_width: f32, config: &SliderConfig) -> Result<Self> {
        Self::new(container_width, config.slide_gap, config.slide_width)
    }

    /// Append an item whose content is `content_width` px wide
    ///
    /// With a fixed slide width the content width is ignored.
    pub fn push_item(&mut self, content_width: f32) -> Result<usize> {
        let basis = match self.slide_width {
            SlideWidth::Px(px) => px,
            SlideWidth::Auto => content_width,
        };
        let node = self
            .taffy
            .new_leaf(item_style(basis))
            .map_err(layout_error)?;
        self.taffy
            .add_child(self.container, node)
            .map_err(layout_error)?;
        self.items.push(FlexItem {
            node,
            transform: ItemTransform::default(),
            has_image: false,
        });
        self.relayout()?;
        Ok(self.items.len() - 1)
    }

    pub fn set_container_width(&mut self, width: f32) -> Result<()> {
        self.container_width = width;
        self.taffy
            .set_style(self.container, container_style(width, self.gap))
            .map_err(layout_error)?;
        self.relayout()
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Take the row out of the tree; measurements fail until reattached
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn set_has_image(&mut self, index: usize, has_image: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.has_image = has_image;
        }
    }

    /// Item currently marked active, if any
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    fn relayout(&mut self) -> Result<()> {
        self.taffy
            .compute_layout(
                self.container,
                Size {
                    width: AvailableSpace::Definite(self.container_width),
                    height: AvailableSpace::MaxContent,
                },
            )
            .map_err(layout_error)?;

        self.boxes.clear();
        for item in &self.items {
            let layout = self.taffy.layout(item.node).map_err(layout_error)?;
            self.boxes.push(ItemBox {
                offset_left: layout.location.x,
                width: layout.size.width,
            });
        }
        Ok(())
    }
}

fn container_style(width: f32, gap: f32) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::NoWrap,
        gap: Size {
            width: LengthPercentage::Length(gap),
            height: LengthPercentage::Length(0.0),
        },
        size: Size {
            width: Dimension::Length(width),
            height: Dimension::Auto,
        },
        ..Default::default()
    }
}

fn item_style(basis: f32) -> Style {
    Style {
        flex_grow: 1.0,
        flex_shrink: 0.0,
        flex_basis: Dimension::Length(basis),
        ..Default::default()
    }
}

fn layout_error(err: taffy::TaffyError) -> SliderError {
    SliderError::Layout(err.to_string())
}

impl SlideSurface for FlexRowSurface {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn container_span(&self) -> Option<Span> {
        self.attached
            .then(|| Span::new(0.0, self.container_width))
    }

    fn item_box(&self, index: usize) -> Option<ItemBox> {
        if !self.attached {
            return None;
        }
        self.boxes.get(index).copied()
    }

    fn transform(&self, index: usize) -> ItemTransform {
        self.items
            .get(index)
            .map(|item| item.transform)
            .unwrap_or_default()
    }

    fn set_transform(&mut self, index: usize, transform: ItemTransform) {
        if let Some(item) = self.items.get_mut(index) {
            item.transform = transform;
        }
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn end_padding(&self) -> f32 {
        self.gap
    }

    fn set_active(&mut self, index: usize, active: bool) {
        if active {
            self.active = Some(index);
        } else if self.active == Some(index) {
            self.active = None;
        }
    }

    fn item_has_image(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.has_image)
    }

    fn is_auto_width(&self) -> bool {
        self.slide_width.is_auto()
    }
}
