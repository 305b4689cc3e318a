use foundation::YearLabel;
use formats::CarbonLookup;
use serde::Serialize;

use crate::metrics::{CarbonMetrics, RegionCarbon, YearlyAverage};

/// The aggregate behind the analytics view: trend, headline numbers and
/// the ranking for the latest year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub latest_year: String,
    pub yearly_averages: Vec<YearlyAverage>,
    pub forecast: Option<YearlyAverage>,
    /// Average for `latest_year`, which need not be among the averaged years.
    pub latest_average: f64,
    pub measured_regions: usize,
    pub growth_percent: Option<f64>,
    pub top_regions: Vec<RegionCarbon>,
}

impl AnalyticsSummary {
    pub fn compute(
        lookup: &CarbonLookup,
        years: &[YearLabel],
        latest_year: &YearLabel,
        top_n: usize,
    ) -> Self {
        let metrics = CarbonMetrics::new(lookup);
        let yearly_averages = metrics.yearly_averages(years);
        let latest_average = metrics.yearly_average(latest_year);

        Self {
            latest_year: latest_year.to_string(),
            forecast: metrics.forecast(years),
            latest_average,
            measured_regions: metrics.measured_region_count(latest_year),
            growth_percent: metrics.growth_percent(years),
            top_regions: metrics.top_regions(latest_year, top_n),
            yearly_averages,
        }
    }

    /// Measured points followed by the forecast, in chart order.
    pub fn trend(&self) -> impl Iterator<Item = &YearlyAverage> {
        self.yearly_averages.iter().chain(self.forecast.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::AnalyticsSummary;
    use crate::metrics::SeriesKind;
    use formats::{BoundarySchema, load_lookup_from_str};
    use foundation::{YearLabel, default_years};

    #[test]
    fn summarises_bundled_dataset() {
        let lookup = load_lookup_from_str(
            include_str!("../../../data/admin_boundaries.geojson"),
            &BoundarySchema::default(),
        )
        .unwrap();
        let summary =
            AnalyticsSummary::compute(&lookup, &default_years(), &YearLabel::new("2025"), 3);

        assert_eq!(summary.yearly_averages.len(), 6);
        // Kota Medan is all zero/null and never counts
        assert_eq!(summary.measured_regions, 4);
        let expected_2025 = (136.75 + 101.26 + 224.88 + 122.9) / 4.0;
        assert!((summary.latest_average - expected_2025).abs() < 1e-9);

        let names: Vec<&str> = summary.top_regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["Aceh Tengah", "Deli Serdang", "Pesisir Selatan"]);

        let kinds: Vec<SeriesKind> = summary.trend().map(|p| p.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == SeriesKind::Forecast).count(), 1);
        assert_eq!(summary.trend().last().map(|p| p.year.as_str()), Some("2026"));
        assert!(summary.growth_percent.is_some());
    }

    #[test]
    fn latest_year_before_end_of_range() {
        let lookup = load_lookup_from_str(
            include_str!("../../../data/admin_boundaries.geojson"),
            &BoundarySchema::default(),
        )
        .unwrap();
        let years = [YearLabel::new("2020"), YearLabel::new("2021")];
        let summary = AnalyticsSummary::compute(&lookup, &years, &YearLabel::new("2025"), 10);

        // the headline average, region count and ranking all describe 2025
        let expected_2025 = (136.75 + 101.26 + 224.88 + 122.9) / 4.0;
        assert!((summary.latest_average - expected_2025).abs() < 1e-9);
        assert_eq!(summary.measured_regions, 4);
        assert_eq!(summary.top_regions.len(), 4);
    }

    #[test]
    fn latest_year_without_data_averages_to_zero() {
        let lookup = formats::CarbonLookup::default();
        let summary = AnalyticsSummary::compute(
            &lookup,
            &[YearLabel::new("2020")],
            &YearLabel::new("2030"),
            10,
        );
        assert_eq!(summary.latest_average, 0.0);
        assert!(summary.top_regions.is_empty());
        assert_eq!(summary.growth_percent, None);
    }
}
