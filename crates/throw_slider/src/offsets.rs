//! Marker offset correction
//!
//! Decides which point of the container counts as "active": the leading
//! edge, or the center.

use throw_animation::wrap;

use crate::geometry::GeometrySnapshot;

/// Where an item must be to count as the active one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OffsetStrategy {
    /// Item's left edge on the container's left edge
    #[default]
    LeadingEdge,
    /// Item's center on the container's center
    Centered,
}

impl OffsetStrategy {
    pub fn from_center(center: bool) -> Self {
        if center {
            OffsetStrategy::Centered
        } else {
            OffsetStrategy::LeadingEdge
        }
    }

    /// Timeline time by which the active point trails the leading edge
    pub fn time_offset(&self, geometry: &GeometrySnapshot, duration: f32) -> f32 {
        match self {
            OffsetStrategy::LeadingEdge => 0.0,
            OffsetStrategy::Centered => {
                duration * (geometry.container_width / 2.0) / geometry.total_width
            }
        }
    }

    /// Marker times derived from the raw labels
    ///
    /// Reads only the labels, never previous markers, so applying it again
    /// gives the same result.
    pub fn correct(&self, labels: &[f32], geometry: &GeometrySnapshot, duration: f32) -> Vec<f32> {
        match self {
            OffsetStrategy::LeadingEdge => labels.to_vec(),
            OffsetStrategy::Centered => {
                let time_offset = self.time_offset(geometry, duration);
                labels
                    .iter()
                    .zip(&geometry.widths)
                    .map(|(&label, &width)| {
                        let half_item = duration * width / 2.0 / geometry.total_width;
                        wrap(label + half_item - time_offset, duration)
                    })
                    .collect()
            }
        }
    }
}
