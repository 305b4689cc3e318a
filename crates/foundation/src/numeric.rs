/// Rounds to two decimal places for display.
///
/// Aggregates keep full precision; only values headed for a chart or a
/// card pass through here.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// A carbon value that counts as a measurement. Zero means "no data".
pub fn is_measured(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0 && v.is_finite())
}

/// Divides, returning `None` instead of NaN or infinity.
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let r = numerator / denominator;
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_places() {
        assert_eq!(round2(465.3576), 465.36);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(-1.005_1), -1.01);
    }

    #[test]
    fn zero_and_null_are_not_measured() {
        assert!(is_measured(Some(3.5)));
        assert!(!is_measured(Some(0.0)));
        assert!(!is_measured(None));
        assert!(!is_measured(Some(f64::NAN)));
    }

    #[test]
    fn checked_ratio_guards_zero() {
        assert_eq!(checked_ratio(1.0, 0.0), None);
        assert_eq!(checked_ratio(10.0, 40.0), Some(0.25));
    }
}
