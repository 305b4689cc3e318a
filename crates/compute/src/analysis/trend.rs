use foundation::checked_ratio;

/// Number of trailing points the forecast looks at.
pub const FORECAST_WINDOW: usize = 3;

pub struct TrendAnalysis;

impl TrendAnalysis {
    /// Average step over the trailing window: `(last - first) / (count - 1)`.
    pub fn trailing_trend(series: &[f64]) -> Option<f64> {
        let window = &series[series.len().saturating_sub(FORECAST_WINDOW)..];
        if window.len() < 2 {
            return None;
        }
        let first = window[0];
        let last = window[window.len() - 1];
        Some((last - first) / (window.len() - 1) as f64)
    }

    /// Naive linear extrapolation one period ahead. 0 with fewer than two points.
    pub fn forecast_next(series: &[f64]) -> f64 {
        match (Self::trailing_trend(series), series.last()) {
            (Some(trend), Some(&last)) => last + trend,
            _ => 0.0,
        }
    }

    /// Percentage change from `first` to `last`; `None` on a zero baseline.
    pub fn growth_percent(first: f64, last: f64) -> Option<f64> {
        checked_ratio(last - first, first).map(|r| r * 100.0)
    }
}
