//! Geometry sampling
//!
//! Reads widths, offsets and spacing off a [`SlideSurface`] and derives the
//! length of one loop. Translations are folded into a snapped percentage of
//! each item's own width so later layout changes scale with the items.

use throw_animation::snap;

use crate::error::{Result, SliderError};
use crate::surface::{ItemBox, ItemTransform, SlideSurface};

/// How sampled and built percentages are rounded
///
/// Flex layouts can alternate item widths by a pixel (242, 243, 242, ...);
/// rounding to a grid keeps those from showing up as jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapStrategy {
    /// Round to the nearest multiple of the increment
    Grid(f32),
    /// Keep values as they are
    Identity,
}

impl Default for SnapStrategy {
    fn default() -> Self {
        SnapStrategy::Grid(1.0)
    }
}

impl SnapStrategy {
    pub fn apply(&self, value: f32) -> f32 {
        match *self {
            SnapStrategy::Grid(increment) => snap(increment, value),
            SnapStrategy::Identity => value,
        }
    }
}

/// Everything the loop needs to know about the items' layout
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GeometrySnapshot {
    pub widths: Vec<f32>,
    /// Snapped translation of each item in percent of its width
    pub x_percents: Vec<f32>,
    /// Gap between an item's left edge and the previous right edge (the
    /// container's left edge for the first item)
    pub space_before: Vec<f32>,
    pub offsets: Vec<f32>,
    pub scales: Vec<f32>,
    /// Layout offset of the first item
    pub start_x: f32,
    /// Length of one loop in px, end padding included
    pub total_width: f32,
    pub container_width: f32,
}

impl GeometrySnapshot {
    /// Check that the surface can be sampled, without reading transforms
    pub fn check(surface: &impl SlideSurface) -> Result<()> {
        surface
            .container_span()
            .ok_or_else(|| SliderError::Detached("container has no layout".into()))?;
        measure_boxes(surface).map(|_| ())
    }

    /// Measure every item
    pub fn sample(surface: &impl SlideSurface, snap: SnapStrategy) -> Result<Self> {
        let container = surface
            .container_span()
            .ok_or_else(|| SliderError::Detached("container has no layout".into()))?;
        let boxes = measure_boxes(surface)?;

        let count = boxes.len();
        let mut geometry = GeometrySnapshot {
            widths: Vec::with_capacity(count),
            x_percents: Vec::with_capacity(count),
            space_before: Vec::with_capacity(count),
            offsets: Vec::with_capacity(count),
            scales: Vec::with_capacity(count),
            start_x: boxes[0].offset_left,
            total_width: 0.0,
            container_width: container.width(),
        };

        let mut previous_edge = container.left;
        for (index, item) in boxes.iter().enumerate() {
            let transform = surface.transform(index);
            let span = surface
                .item_span(index)
                .ok_or_else(|| SliderError::Detached(format!("item {index} has no layout")))?;

            geometry.widths.push(item.width);
            geometry
                .x_percents
                .push(snap.apply(transform.x / item.width * 100.0 + transform.x_percent));
            geometry.space_before.push(span.left - previous_edge);
            geometry.offsets.push(item.offset_left);
            geometry.scales.push(transform.scale_x);
            previous_edge = span.right;
        }

        geometry.total_width = geometry.loop_width(surface.end_padding());
        if !geometry.total_width.is_finite() || geometry.total_width <= 0.0 {
            return Err(SliderError::InvalidConfiguration(format!(
                "loop width resolves to {}",
                geometry.total_width
            )));
        }
        Ok(geometry)
    }

    fn loop_width(&self, end_padding: f32) -> f32 {
        let last = self.len() - 1;
        self.offsets[last] + self.x_percents[last] / 100.0 * self.widths[last] - self.start_x
            + self.space_before[0]
            + self.widths[last] * self.scales[last]
            + end_padding
    }

    /// Rewrite every item's translation as its snapped percentage
    pub fn apply(&self, surface: &mut impl SlideSurface) {
        for (index, &x_percent) in self.x_percents.iter().enumerate() {
            let transform = surface.transform(index);
            surface.set_transform(
                index,
                ItemTransform {
                    x: 0.0,
                    x_percent,
                    ..transform
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

fn measure_boxes(surface: &impl SlideSurface) -> Result<Vec<ItemBox>> {
    let count = surface.item_count();
    if count == 0 {
        return Err(SliderError::InvalidConfiguration("no items to loop".into()));
    }
    (0..count)
        .map(|index| {
            let item = surface
                .item_box(index)
                .ok_or_else(|| SliderError::Detached(format!("item {index} has no layout")))?;
            if !(item.width > 0.0) || !item.width.is_finite() {
                return Err(SliderError::InvalidConfiguration(format!(
                    "item {index} has width {}",
                    item.width
                )));
            }
            Ok(item)
        })
        .collect()
}
