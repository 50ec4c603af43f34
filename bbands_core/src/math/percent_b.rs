use crate::common::utils::UNDEFINED;

/// Position of `x` inside `[lower, upper]`, scaled so `lower` maps to 0 and
/// `upper` maps to `pb_scale`.
///
/// Not clamped: prices outside the band give values below 0 or above
/// `pb_scale`. A zero-width band has no defined position and yields NaN, as
/// does a NaN in any input.
pub fn percent_b(x: f64, lower: f64, upper: f64, pb_scale: f64) -> f64 {
    let width = upper - lower;
    if width == 0.0 {
        return UNDEFINED;
    }
    pb_scale * (x - lower) / width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_points() {
        assert_eq!(percent_b(10.0, 10.0, 20.0, 100.0), 0.0);
        assert_eq!(percent_b(20.0, 10.0, 20.0, 100.0), 100.0);
        assert_eq!(percent_b(15.0, 10.0, 20.0, 100.0), 50.0);
        assert_eq!(percent_b(15.0, 10.0, 20.0, 1.0), 0.5);
    }

    #[test]
    fn test_unclamped() {
        assert_eq!(percent_b(5.0, 10.0, 20.0, 100.0), -50.0);
        assert_eq!(percent_b(25.0, 10.0, 20.0, 100.0), 150.0);
    }

    #[test]
    fn test_zero_width_band_is_nan() {
        assert!(percent_b(10.0, 10.0, 10.0, 100.0).is_nan());
        assert!(percent_b(11.0, 10.0, 10.0, 100.0).is_nan());
    }

    #[test]
    fn test_nan_inputs() {
        assert!(percent_b(f64::NAN, 10.0, 20.0, 100.0).is_nan());
        assert!(percent_b(15.0, f64::NAN, f64::NAN, 100.0).is_nan());
    }
}
