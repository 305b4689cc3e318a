use foundation::is_measured;

pub struct Statistics;

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        Some(sum / values.len() as f64)
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        let mut min = first;
        let mut max = first;
        for &v in values.iter().skip(1) {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Keeps measurements only: `None` and zero are both "no data".
    pub fn measured<I>(values: I) -> Vec<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values
            .into_iter()
            .filter(|v| is_measured(*v))
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
        assert_eq!(Statistics::mean(&[]), None);
    }

    #[test]
    fn measured_drops_null_and_zero() {
        let v = Statistics::measured([Some(10.0), None, Some(0.0), Some(4.0)]);
        assert_eq!(v, vec![10.0, 4.0]);
    }

    #[test]
    fn min_max_spans_values() {
        assert_eq!(Statistics::min_max(&[3.0, -1.0, 8.5]), Some((-1.0, 8.5)));
        assert_eq!(Statistics::min_max(&[]), None);
    }
}
