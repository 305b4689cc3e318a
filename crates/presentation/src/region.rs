use compute::{CarbonMetrics, YearOverYear};
use foundation::{YearLabel, is_measured, round2};
use formats::RegionRecord;
use serde::Serialize;

use crate::format::{
    NOT_AVAILABLE, format_density, format_percent, format_signed_density, format_usd,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesValue {
    pub year: String,
    pub carbon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeView {
    pub delta: f64,
    pub percent_change: f64,
    pub increased: bool,
    /// `+10.00 tC/ha (+25.00%)`
    pub text: String,
}

impl ChangeView {
    fn from_yoy(yoy: &YearOverYear) -> Self {
        Self {
            delta: round2(yoy.delta),
            percent_change: round2(yoy.percent_change),
            increased: yoy.is_increase(),
            text: format!(
                "{} ({})",
                format_signed_density(yoy.delta),
                format_percent(Some(yoy.percent_change))
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationView {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
    /// Per hectare, for the selected year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendInsight {
    pub increased: bool,
    /// e.g. "Carbon stock decreased by 1.31 tC/ha, reducing potential value by $30.48/ha."
    pub text: String,
}

/// Everything the region drawer shows for one selected region and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPanel {
    pub region: String,
    pub province: String,
    pub land_cover: String,
    pub year: String,
    /// Measured years only; nulls are dropped.
    pub series: Vec<SeriesValue>,
    pub current_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation: Option<ValuationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<TrendInsight>,
}

impl RegionPanel {
    /// `None` when the region is not in the lookup.
    pub fn build(metrics: &CarbonMetrics<'_>, region: &str, year: &YearLabel) -> Option<Self> {
        let record = metrics.lookup().get(region)?;
        let yoy = metrics.year_over_year(region, year);

        let series = record
            .carbon_series()
            .filter_map(|(y, v)| {
                v.map(|carbon| SeriesValue {
                    year: y.to_string(),
                    carbon: round2(carbon),
                })
            })
            .collect();

        let current = record.carbon(year).filter(|v| is_measured(Some(*v)));
        let current_value = current
            .map(format_density)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Some(Self {
            region: record.name.clone(),
            province: non_empty_or_na(&record.province),
            land_cover: record.land_cover.clone(),
            year: year.to_string(),
            series,
            current_value,
            change: yoy.as_ref().map(ChangeView::from_yoy),
            valuation: valuation_view(metrics, record, year),
            insight: trend_insight(metrics, region, year, yoy.as_ref()),
        })
    }
}

fn non_empty_or_na(s: &str) -> String {
    if s.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

// Shown only for regions that carry a carbon price.
fn valuation_view(
    metrics: &CarbonMetrics<'_>,
    record: &RegionRecord,
    year: &YearLabel,
) -> Option<ValuationView> {
    let valuation = record.valuation.as_ref()?;
    let price = valuation.carbon_price_usd_per_tonne?;
    Some(ValuationView {
        price: format_usd(price),
        conversion_factor: valuation.conversion_factor_c_to_co2,
        potential_value: metrics
            .economic_value(&record.name, year)
            .map(format_usd),
        scenario: valuation.price_scenario.clone(),
        updated: valuation.calculation_date.clone(),
    })
}

fn trend_insight(
    metrics: &CarbonMetrics<'_>,
    region: &str,
    year: &YearLabel,
    yoy: Option<&YearOverYear>,
) -> Option<TrendInsight> {
    let yoy = yoy?;
    let value_change = metrics.value_change(region, year)?;
    let increased = yoy.is_increase();
    let (verb, effect) = if increased {
        ("increased", "adding")
    } else {
        ("decreased", "reducing")
    };
    Some(TrendInsight {
        increased,
        text: format!(
            "Carbon stock {verb} by {}, {effect} potential value by {}/ha.",
            format_density(yoy.delta.abs()),
            format_usd(value_change.abs())
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::{CarbonLookup, Valuation};
    use pretty_assertions::assert_eq;

    fn lookup() -> CarbonLookup {
        CarbonLookup::from_records([
            RegionRecord::new("Langkat", "Sumatera Utara", "Sawit")
                .with_carbon("2023", Some(40.0))
                .with_carbon("2024", Some(50.0))
                .with_carbon("2025", None)
                .with_valuation(Valuation {
                    carbon_price_usd_per_tonne: Some(6.34),
                    conversion_factor_c_to_co2: Some(3.67),
                    price_scenario: Some("Conservative".to_string()),
                    calculation_date: Some("2025-06-30".to_string()),
                }),
            RegionRecord::new("Kota Medan", "", "Emplacement")
                .with_carbon("2024", Some(0.0))
                .with_carbon("2025", None),
        ])
    }

    #[test]
    fn full_panel_for_priced_region() {
        let lookup = lookup();
        let metrics = CarbonMetrics::new(&lookup);
        let panel = RegionPanel::build(&metrics, "Langkat", &"2024".into()).unwrap();

        assert_eq!(panel.series.len(), 2);
        assert_eq!(panel.current_value, "50.00 tC/ha");
        let change = panel.change.unwrap();
        assert_eq!(change.text, "+10.00 tC/ha (+25.00%)");
        assert!(change.increased);

        let valuation = panel.valuation.unwrap();
        assert_eq!(valuation.price, "$6.34");
        assert_eq!(valuation.potential_value.as_deref(), Some("$1163.39"));
        assert_eq!(valuation.updated.as_deref(), Some("2025-06-30"));

        let insight = panel.insight.unwrap();
        assert_eq!(
            insight.text,
            "Carbon stock increased by 10.00 tC/ha, adding potential value by $232.68/ha."
        );
    }

    #[test]
    fn unmeasured_year_shows_not_available() {
        let lookup = lookup();
        let metrics = CarbonMetrics::new(&lookup);
        let panel = RegionPanel::build(&metrics, "Langkat", &"2025".into()).unwrap();
        assert_eq!(panel.current_value, "N/A");
        assert_eq!(panel.change, None);
        assert_eq!(panel.insight, None);
        // price is still shown, value is not
        assert_eq!(panel.valuation.unwrap().potential_value, None);
    }

    #[test]
    fn zero_only_region_and_unknown_region() {
        let lookup = lookup();
        let metrics = CarbonMetrics::new(&lookup);
        let panel = RegionPanel::build(&metrics, "Kota Medan", &"2024".into()).unwrap();
        assert_eq!(panel.current_value, "N/A");
        assert_eq!(panel.province, "N/A");
        assert_eq!(panel.valuation, None);
        assert!(RegionPanel::build(&metrics, "Atlantis", &"2024".into()).is_none());
    }
}
