//! Loop timeline construction
//!
//! Each item gets two segments on a timeline that is exactly one loop long:
//!
//! ```text
//!  item i   |-- A: slide left until fully out --|-- B: re-enter from the right --|
//!           0                     distance_to_loop / pps              total / pps
//! ```
//!
//! Segment A moves the item from its rest offset until its right edge passes
//! the loop start. Segment B starts it one loop width further right and
//! brings it back to rest, so the strip looks endless with N items.

use throw_animation::{TargetId, Timeline, Tween};

use crate::error::{Result, SliderError};
use crate::geometry::{GeometrySnapshot, SnapStrategy};

/// Name of the marker recorded for item `index`
pub fn label_name(index: usize) -> String {
    format!("label{index}")
}

/// Rebuild `timeline` from `geometry` and return each item's marker time
///
/// The timeline is only touched once the inputs are known to be usable.
pub fn build_loop(
    timeline: &mut Timeline,
    geometry: &GeometrySnapshot,
    pixels_per_second: f32,
    snap: SnapStrategy,
) -> Result<Vec<f32>> {
    let total_width = geometry.total_width;
    if geometry.is_empty() || !total_width.is_finite() || total_width <= 0.0 {
        return Err(SliderError::InvalidConfiguration(format!(
            "cannot build a loop {total_width}px long"
        )));
    }
    if !(pixels_per_second > 0.0) {
        return Err(SliderError::InvalidConfiguration(format!(
            "loop speed must be positive, got {pixels_per_second}px/s"
        )));
    }

    timeline.clear();
    let mut labels = Vec::with_capacity(geometry.len());
    let lead = geometry.space_before[0];

    for (index, &width) in geometry.widths.iter().enumerate() {
        let target = TargetId(index);
        let rest = geometry.x_percents[index];
        let cur_x = rest / 100.0 * width;
        let distance_to_start = geometry.offsets[index] + cur_x - geometry.start_x + lead;
        let distance_to_loop = distance_to_start + width * geometry.scales[index];

        let out = Tween::new(
            target,
            rest,
            snap.apply((cur_x - distance_to_loop) / width * 100.0),
            distance_to_loop / pixels_per_second,
        );
        let reenter = Tween::new(
            target,
            snap.apply((cur_x - distance_to_loop + total_width) / width * 100.0),
            rest,
            (total_width - distance_to_loop) / pixels_per_second,
        )
        .immediate_render(false);

        let label = distance_to_start / pixels_per_second;
        timeline
            .insert(0.0, out)
            .insert(distance_to_loop / pixels_per_second, reenter)
            .add_label(label_name(index), label);
        labels.push(label);
    }

    tracing::trace!(
        items = labels.len(),
        duration = timeline.duration(),
        "built loop timeline"
    );
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::RowSurface;

    fn build(surface: &RowSurface, pps: f32) -> (Timeline, Vec<f32>) {
        let geometry = GeometrySnapshot::sample(surface, SnapStrategy::default()).unwrap();
        let mut timeline = Timeline::new();
        let labels = build_loop(&mut timeline, &geometry, pps, SnapStrategy::default()).unwrap();
        (timeline, labels)
    }

    fn rendered(timeline: &Timeline) -> Vec<f32> {
        let mut values = Vec::new();
        timeline.render(|target, value| {
            if values.len() <= target.0 {
                values.resize(target.0 + 1, f32::NAN);
            }
            values[target.0] = value;
        });
        values
    }

    #[test]
    fn test_uniform_loop_markers() {
        let surface = RowSurface::uniform(5, 100.0);
        let (timeline, labels) = build(&surface, 100.0);
        assert_eq!(timeline.duration(), 5.0);
        assert_eq!(labels, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(timeline.label("label3"), Some(3.0));
        assert_eq!(timeline.entry_count(), 10);
    }

    #[test]
    fn test_markers_spaced_by_width_over_speed() {
        let surface = RowSurface::uniform(4, 250.0);
        let (timeline, labels) = build(&surface, 200.0);
        assert_eq!(timeline.duration(), 5.0);
        for pair in labels.windows(2) {
            assert!((pair[1] - pair[0] - 1.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_items_rest_at_start_and_wrap_mid_loop() {
        let surface = RowSurface::uniform(5, 100.0);
        let (mut timeline, _) = build(&surface, 100.0);
        assert_eq!(rendered(&timeline), vec![0.0; 5]);

        // Halfway through item 0's exit
        timeline.set_time(0.5);
        assert_eq!(rendered(&timeline)[0], -50.0);

        // Item 0 has wrapped to the far right and is coming back
        timeline.set_time(1.0);
        assert_eq!(rendered(&timeline)[0], 400.0);
        timeline.set_time(3.0);
        assert!((rendered(&timeline)[0] - 200.0).abs() < 1e-4);
        // Item 4 has not started to wrap yet
        assert!((rendered(&timeline)[4] + 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_loop_is_rejected_before_clearing() {
        let surface = RowSurface::uniform(2, 100.0);
        let (mut timeline, _) = build(&surface, 100.0);
        let broken = GeometrySnapshot::default();
        assert!(matches!(
            build_loop(&mut timeline, &broken, 100.0, SnapStrategy::default()),
            Err(SliderError::InvalidConfiguration(_))
        ));
        // Previous loop untouched
        assert_eq!(timeline.duration(), 2.0);
    }
}
