//! Index resolution
//!
//! Maps timeline time to the nearest marker on a circular track.

use throw_animation::wrap;

/// Distance between two times on a loop of length `period`
///
/// Both times are wrapped first, so the result is symmetric and never
/// exceeds `period / 2`.
pub fn circular_distance(a: f32, b: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let d = (wrap(a, period) - wrap(b, period)).abs();
    if d > period / 2.0 {
        period - d
    } else {
        d
    }
}

/// Index of the marker closest to `time`
///
/// Markers are scanned from the last to the first and only a strictly
/// smaller distance replaces the best one, so on an exact tie the highest
/// index wins. Returns 0 for an empty marker table.
pub fn closest_index(times: &[f32], time: f32, period: f32) -> usize {
    let mut closest = f32::INFINITY;
    let mut index = 0;
    for (i, &marker) in times.iter().enumerate().rev() {
        let d = circular_distance(marker, time, period);
        if d < closest {
            closest = d;
            index = i;
        }
    }
    index
}

/// Last known index plus a flag for lazy resync
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexState {
    current: usize,
    dirty: bool,
}

impl IndexState {
    pub fn new(current: usize) -> Self {
        Self {
            current,
            dirty: false,
        }
    }

    /// Stored index, possibly stale while dirty
    pub fn raw(&self) -> usize {
        self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Store an authoritative index and clear the flag
    pub fn set(&mut self, index: usize) {
        self.current = index;
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stored index, or `resolve()` stored and returned when dirty
    pub fn resolve_with(&mut self, resolve: impl FnOnce() -> usize) -> usize {
        if self.dirty {
            self.set(resolve());
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f32; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

    #[test]
    fn test_circular_distance_is_symmetric_and_bounded() {
        let period = 5.0;
        let samples = [-7.3, -0.2, 0.0, 0.4, 2.5, 4.9, 5.0, 12.25];
        for &a in &samples {
            for &b in &samples {
                let ab = circular_distance(a, b, period);
                let ba = circular_distance(b, a, period);
                assert_eq!(ab, ba, "a={a} b={b}");
                assert!(ab <= period / 2.0, "a={a} b={b} d={ab}");
                assert!(ab >= 0.0);
            }
        }
        assert!((circular_distance(0.5, 4.5, 5.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_closest_index() {
        assert_eq!(closest_index(&TIMES, 2.6, 5.0), 3);
        assert_eq!(closest_index(&TIMES, 2.2, 5.0), 2);
        // Close to the seam, item 0 is nearer going forward
        assert_eq!(closest_index(&TIMES, 4.8, 5.0), 0);
    }

    #[test]
    fn test_closest_index_is_total() {
        for step in -40..40 {
            let time = step as f32 * 0.37;
            let index = closest_index(&TIMES, time, 5.0);
            assert!(index < TIMES.len());
        }
        assert_eq!(closest_index(&TIMES, 7.2, 5.0), 2);
        assert_eq!(closest_index(&TIMES, -0.9, 5.0), 4);
        assert_eq!(closest_index(&[], 1.0, 5.0), 0);
    }

    #[test]
    fn test_tie_goes_to_highest_index() {
        // 2.5 is exactly between markers 2 and 3
        assert_eq!(closest_index(&TIMES, 2.5, 5.0), 3);
        // Duplicate markers: the later one wins
        assert_eq!(closest_index(&[1.0, 1.0, 3.0], 1.0, 4.0), 1);
    }

    #[test]
    fn test_index_state_resync_on_read() {
        let mut state = IndexState::new(1);
        assert_eq!(state.resolve_with(|| 4), 1);

        state.mark_dirty();
        assert!(state.is_dirty());
        assert_eq!(state.resolve_with(|| 4), 4);
        assert!(!state.is_dirty());
        assert_eq!(state.raw(), 4);
    }
}
