//! Derived carbon metrics over a loaded [`CarbonLookup`].
//!
//! Everything here is a pure function of the lookup and the caller's year
//! list. Nothing is cached; the lookup is only borrowed.

use foundation::{YearLabel, checked_ratio, is_measured};
use formats::{CarbonLookup, RegionRecord};
use serde::Serialize;

use crate::analysis::{Statistics, TrendAnalysis};
use crate::valuation::economic_value;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Measured,
    Forecast,
}

/// Regional mean for one year, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: String,
    pub carbon: f64,
    pub kind: SeriesKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCarbon {
    pub region: String,
    pub carbon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYear {
    pub year: String,
    pub previous_year: String,
    pub current: f64,
    pub previous: f64,
    pub delta: f64,
    pub percent_change: f64,
}

impl YearOverYear {
    pub fn is_increase(&self) -> bool {
        self.delta > 0.0
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CarbonMetrics<'a> {
    lookup: &'a CarbonLookup,
}

impl<'a> CarbonMetrics<'a> {
    pub fn new(lookup: &'a CarbonLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &'a CarbonLookup {
        self.lookup
    }

    pub fn measured_values(&self, year: &YearLabel) -> Vec<f64> {
        Statistics::measured(self.lookup.iter().map(|r| r.carbon(year)))
    }

    /// Number of regions contributing to the year's average.
    pub fn measured_region_count(&self, year: &YearLabel) -> usize {
        self.lookup
            .iter()
            .filter(|r| is_measured(r.carbon(year)))
            .count()
    }

    /// Mean of measured values; 0 when no region has data for `year`.
    pub fn yearly_average(&self, year: &YearLabel) -> f64 {
        Statistics::mean(&self.measured_values(year)).unwrap_or(0.0)
    }

    pub fn yearly_averages(&self, years: &[YearLabel]) -> Vec<YearlyAverage> {
        years
            .iter()
            .map(|year| YearlyAverage {
                year: year.to_string(),
                carbon: self.yearly_average(year),
                kind: SeriesKind::Measured,
            })
            .collect()
    }

    /// Forecast for the period after the last of `years`.
    ///
    /// `None` only when `years` is empty; with a single year the forecast
    /// value is 0.
    pub fn forecast(&self, years: &[YearLabel]) -> Option<YearlyAverage> {
        let last = years.last()?;
        let series: Vec<f64> = self
            .yearly_averages(years)
            .iter()
            .map(|a| a.carbon)
            .collect();
        let label = last
            .next()
            .map(|y| y.to_string())
            .unwrap_or_else(|| format!("{last}+1"));
        Some(YearlyAverage {
            year: label,
            carbon: TrendAnalysis::forecast_next(&series),
            kind: SeriesKind::Forecast,
        })
    }

    /// Measured averages followed by the forecast point.
    pub fn trend_series(&self, years: &[YearLabel]) -> Vec<YearlyAverage> {
        let mut series = self.yearly_averages(years);
        if let Some(forecast) = self.forecast(years) {
            series.push(forecast);
        }
        series
    }

    /// Growth between the first and last year's averages, in percent.
    pub fn growth_percent(&self, years: &[YearLabel]) -> Option<f64> {
        if years.len() < 2 {
            return None;
        }
        let first = self.yearly_average(&years[0]);
        let last = self.yearly_average(&years[years.len() - 1]);
        TrendAnalysis::growth_percent(first, last)
    }

    /// Regions with a positive value for `year`, highest first.
    ///
    /// Equal values keep lookup order.
    pub fn top_regions(&self, year: &YearLabel, n: usize) -> Vec<RegionCarbon> {
        let mut ranked: Vec<RegionCarbon> = self
            .lookup
            .iter()
            .filter_map(|r| {
                let carbon = r.carbon(year)?;
                (carbon > 0.0).then(|| RegionCarbon {
                    region: r.name.clone(),
                    carbon,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.carbon.total_cmp(&a.carbon));
        ranked.truncate(n);
        ranked
    }

    /// Change against the preceding year. Both years must be measured.
    pub fn year_over_year(&self, region: &str, year: &YearLabel) -> Option<YearOverYear> {
        let record = self.lookup.get(region)?;
        year_over_year(record, year)
    }

    /// Potential credit value per hectare for `year`.
    pub fn economic_value(&self, region: &str, year: &YearLabel) -> Option<f64> {
        let record = self.lookup.get(region)?;
        let carbon = record.carbon(year).filter(|v| is_measured(Some(*v)))?;
        let (factor, price) = price_inputs(record)?;
        Some(economic_value(carbon, factor, price))
    }

    /// Economic effect of the year-over-year change.
    pub fn value_change(&self, region: &str, year: &YearLabel) -> Option<f64> {
        let record = self.lookup.get(region)?;
        let yoy = year_over_year(record, year)?;
        let (factor, price) = price_inputs(record)?;
        Some(economic_value(yoy.delta, factor, price))
    }
}

fn year_over_year(record: &RegionRecord, year: &YearLabel) -> Option<YearOverYear> {
    let previous_year = year.previous()?;
    let current = record.carbon(year).filter(|v| is_measured(Some(*v)))?;
    let previous = record
        .carbon(&previous_year)
        .filter(|v| is_measured(Some(*v)))?;
    let delta = current - previous;
    let percent_change = checked_ratio(delta, previous)? * 100.0;
    Some(YearOverYear {
        year: year.to_string(),
        previous_year: previous_year.to_string(),
        current,
        previous,
        delta,
        percent_change,
    })
}

fn price_inputs(record: &RegionRecord) -> Option<(f64, f64)> {
    let valuation = record.valuation.as_ref()?;
    Some((
        valuation.conversion_factor_c_to_co2?,
        valuation.carbon_price_usd_per_tonne?,
    ))
}
