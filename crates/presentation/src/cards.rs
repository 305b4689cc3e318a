use compute::AnalyticsSummary;
use serde::Serialize;

use crate::format::{format_density, format_percent};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    fn of(value: Option<f64>) -> Self {
        match value {
            Some(v) if v >= 0.0 => Direction::Up,
            Some(_) => Direction::Down,
            None => Direction::Flat,
        }
    }
}

/// One headline statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Latest average, growth over the period, and the forecast.
pub fn summary_cards(summary: &AnalyticsSummary) -> Vec<StatCard> {
    // Growth spans the averaged years, which may end after the latest year.
    let first_year = summary
        .yearly_averages
        .first()
        .map(|a| a.year.as_str())
        .unwrap_or(summary.latest_year.as_str());
    let last_year = summary
        .yearly_averages
        .last()
        .map(|a| a.year.as_str())
        .unwrap_or(summary.latest_year.as_str());
    let span = summary.yearly_averages.len().saturating_sub(1);

    let mut cards = vec![
        StatCard {
            title: format!("Average Carbon Stock ({})", summary.latest_year),
            value: format_density(summary.latest_average),
            caption: format!("Across {} regions", summary.measured_regions),
            direction: None,
        },
        StatCard {
            title: format!("Growth ({first_year}-{last_year})"),
            value: format_percent(summary.growth_percent),
            caption: format!("{span}-year change"),
            direction: Some(Direction::of(summary.growth_percent)),
        },
    ];

    if let Some(forecast) = &summary.forecast {
        cards.push(StatCard {
            title: format!("{} Forecast", forecast.year),
            value: format_density(forecast.carbon),
            caption: "Predicted average".to_string(),
            direction: None,
        });
    }
    cards
}
