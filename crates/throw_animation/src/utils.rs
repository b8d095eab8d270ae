//! Numeric helpers shared by timelines, tweens and the slider.

/// Wrap `value` into `[0, period)`.
///
/// Returns `0.0` for a non-positive period.
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Wrap `value` into `[min, max)`.
#[inline]
pub fn wrap_range(min: f32, max: f32, value: f32) -> f32 {
    min + wrap(value - min, max - min)
}

/// Round `value` to the nearest multiple of `increment`.
///
/// Halves round toward positive infinity so negative offsets snap the same
/// way positive ones do.
#[inline]
pub fn snap(increment: f32, value: f32) -> f32 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment + 0.5).floor() * increment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_basic() {
        assert_eq!(wrap(7.5, 5.0), 2.5);
        assert_eq!(wrap(-1.0, 5.0), 4.0);
        assert_eq!(wrap(5.0, 5.0), 0.0);
        assert_eq!(wrap(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let w = wrap(-1e-9, 5.0);
        assert!((0.0..5.0).contains(&w));
    }

    #[test]
    fn test_wrap_zero_period() {
        assert_eq!(wrap(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_wrap_range() {
        assert_eq!(wrap_range(0.0, 5.0, 6.0), 1.0);
        assert_eq!(wrap_range(2.0, 4.0, 5.0), 3.0);
        assert_eq!(wrap_range(0.0, 1.0, -0.25), 0.75);
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(1.0, 12.4), 12.0);
        assert_eq!(snap(1.0, 12.5), 13.0);
        assert_eq!(snap(5.0, 12.4), 10.0);
        assert_eq!(snap(1.0, -2.5), -2.0);
        assert_eq!(snap(0.0, 3.3), 3.3);
    }
}
