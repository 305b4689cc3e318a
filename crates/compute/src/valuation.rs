//! Carbon credit valuation.
//!
//! Carbon (tC/ha) converts to CO₂-equivalent by the 44/12 molecular mass
//! ratio, and CO₂e is priced per tonne. Values are per hectare.

use serde::Serialize;

/// Stoichiometric C → CO₂ factor (44 g/mol / 12 g/mol), as published.
pub const CO2_PER_CARBON: f64 = 3.67;

pub fn co2_equivalent(carbon: f64, conversion_factor: f64) -> f64 {
    carbon * conversion_factor
}

/// `carbon × factor × price`, unrounded.
pub fn economic_value(carbon: f64, conversion_factor: f64, price_usd_per_tonne: f64) -> f64 {
    co2_equivalent(carbon, conversion_factor) * price_usd_per_tonne
}

/// Carbon price scenarios (USD per tonne CO₂e).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceScenario {
    Conservative,
    Moderate,
    High,
    Compliance,
}

impl PriceScenario {
    pub const ALL: [PriceScenario; 4] = [
        PriceScenario::Conservative,
        PriceScenario::Moderate,
        PriceScenario::High,
        PriceScenario::Compliance,
    ];

    pub fn price_usd_per_tonne(self) -> f64 {
        match self {
            PriceScenario::Conservative => 6.34,
            PriceScenario::Moderate => 15.00,
            PriceScenario::High => 27.00,
            PriceScenario::Compliance => 50.00,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceScenario::Conservative => "Conservative",
            PriceScenario::Moderate => "Moderate",
            PriceScenario::High => "High",
            PriceScenario::Compliance => "Compliance",
        }
    }

    pub fn basis(self) -> &'static str {
        match self {
            PriceScenario::Conservative => "Average REDD+ projects Asia-Pacific 2020-2022",
            PriceScenario::Moderate => "Global voluntary carbon market median 2023",
            PriceScenario::High => "Projects with high co-benefits",
            PriceScenario::Compliance => "Average compliance market (EU ETS)",
        }
    }

    /// Case-insensitive match on the scenario label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioValue {
    pub scenario: PriceScenario,
    pub price_usd_per_tonne: f64,
    pub co2e_per_ha: f64,
    pub value_usd_per_ha: f64,
}

/// Values one hectare holding `carbon` tC under every scenario.
pub fn scenario_values(carbon: f64, conversion_factor: f64) -> Vec<ScenarioValue> {
    PriceScenario::ALL
        .into_iter()
        .map(|scenario| {
            let price = scenario.price_usd_per_tonne();
            ScenarioValue {
                scenario,
                price_usd_per_tonne: price,
                co2e_per_ha: co2_equivalent(carbon, conversion_factor),
                value_usd_per_ha: economic_value(carbon, conversion_factor, price),
            }
        })
        .collect()
}
