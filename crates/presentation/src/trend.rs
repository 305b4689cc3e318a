use compute::{SeriesKind, YearlyAverage};
use foundation::round2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: String,
    pub carbon: f64,
    pub kind: SeriesKind,
}

/// Line-chart series of regional averages with the forecast point last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub points: Vec<ChartPoint>,
    /// `[min - 5, max + 5]` over the points, for the y axis.
    pub domain: Option<(f64, f64)>,
}

const DOMAIN_PADDING: f64 = 5.0;

impl TrendSeries {
    pub fn from_averages<'a>(averages: impl IntoIterator<Item = &'a YearlyAverage>) -> Self {
        let points: Vec<ChartPoint> = averages
            .into_iter()
            .map(|a| ChartPoint {
                year: a.year.clone(),
                carbon: round2(a.carbon),
                kind: a.kind,
            })
            .collect();
        let values: Vec<f64> = points.iter().map(|p| p.carbon).collect();
        let domain = compute::analysis::Statistics::min_max(&values)
            .map(|(min, max)| (min - DOMAIN_PADDING, max + DOMAIN_PADDING));
        Self { points, domain }
    }

    pub fn forecast(&self) -> Option<&ChartPoint> {
        self.points.iter().find(|p| p.kind == SeriesKind::Forecast)
    }
}
