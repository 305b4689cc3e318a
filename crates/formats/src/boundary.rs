//! Administrative boundary dataset: the write-once region lookup.
//!
//! The boundary FeatureCollection carries one feature per regency/city with
//! its province, a land-cover label, one carbon-stock density per year
//! (tC/ha, `null` when unmeasured) and, for some regions, carbon-price
//! metadata. [`CarbonLookup`] is built from it once and is read-only after.

use std::collections::{BTreeMap, HashMap};

use foundation::{YearLabel, default_years};
use tracing::debug;

use crate::feature_collection::{Feature, FeatureCollection, FeatureCollectionError};

/// Property names used to read a boundary feature.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySchema {
    pub key_property: String,
    pub parent_property: String,
    pub class_property: String,
    pub years: Vec<YearLabel>,
    pub price_property: String,
    pub factor_property: String,
    pub scenario_property: String,
    pub date_property: String,
}

impl Default for BoundarySchema {
    fn default() -> Self {
        Self {
            key_property: "KAB_KOTA".to_string(),
            parent_property: "PROVINSI".to_string(),
            class_property: "layer".to_string(),
            years: default_years(),
            price_property: "carbon_price_usd_per_tonne".to_string(),
            factor_property: "conversion_factor_C_to_CO2".to_string(),
            scenario_property: "price_scenario".to_string(),
            date_property: "calculation_date".to_string(),
        }
    }
}

impl BoundarySchema {
    pub fn with_years(mut self, years: Vec<YearLabel>) -> Self {
        self.years = years;
        self
    }
}

/// Carbon-market metadata attached to some regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    pub carbon_price_usd_per_tonne: Option<f64>,
    pub conversion_factor_c_to_co2: Option<f64>,
    pub price_scenario: Option<String>,
    pub calculation_date: Option<String>,
}

impl Valuation {
    fn from_feature(feature: &Feature, schema: &BoundarySchema) -> Option<Self> {
        let v = Valuation {
            carbon_price_usd_per_tonne: feature.number_property(&schema.price_property),
            conversion_factor_c_to_co2: feature.number_property(&schema.factor_property),
            price_scenario: feature
                .string_property(&schema.scenario_property)
                .map(str::to_string),
            calculation_date: feature
                .string_property(&schema.date_property)
                .map(str::to_string),
        };
        (!v.is_empty()).then_some(v)
    }

    pub fn is_empty(&self) -> bool {
        self.carbon_price_usd_per_tonne.is_none()
            && self.conversion_factor_c_to_co2.is_none()
            && self.price_scenario.is_none()
            && self.calculation_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub name: String,
    pub province: String,
    pub land_cover: String,
    /// Every schema year is present; unmeasured years hold `None`.
    carbon_stock: BTreeMap<YearLabel, Option<f64>>,
    pub valuation: Option<Valuation>,
}

impl RegionRecord {
    pub fn new(
        name: impl Into<String>,
        province: impl Into<String>,
        land_cover: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            province: province.into(),
            land_cover: land_cover.into(),
            carbon_stock: BTreeMap::new(),
            valuation: None,
        }
    }

    pub fn with_carbon(mut self, year: impl Into<YearLabel>, value: Option<f64>) -> Self {
        self.carbon_stock.insert(year.into(), value);
        self
    }

    pub fn with_valuation(mut self, valuation: Valuation) -> Self {
        self.valuation = Some(valuation);
        self
    }

    /// Raw value for `year`; `None` both for unknown years and for `null`.
    pub fn carbon(&self, year: &YearLabel) -> Option<f64> {
        self.carbon_stock.get(year).copied().flatten()
    }

    /// Year-ordered `(year, value)` pairs including unmeasured years.
    pub fn carbon_series(&self) -> impl Iterator<Item = (&YearLabel, Option<f64>)> {
        self.carbon_stock.iter().map(|(y, v)| (y, *v))
    }

    fn from_feature(feature: &Feature, name: &str, schema: &BoundarySchema) -> Self {
        let carbon_stock = schema
            .years
            .iter()
            .map(|year| (year.clone(), feature.number_property(year.as_str())))
            .collect();
        Self {
            name: name.to_string(),
            province: feature
                .string_property(&schema.parent_property)
                .unwrap_or_default()
                .to_string(),
            land_cover: feature
                .string_property(&schema.class_property)
                .unwrap_or_default()
                .to_string(),
            carbon_stock,
            valuation: Valuation::from_feature(feature, schema),
        }
    }
}

/// Region name → record, in first-seen dataset order.
///
/// Populated only at construction. Iteration order is part of the contract:
/// rankings break ties by it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarbonLookup {
    records: Vec<RegionRecord>,
    index: HashMap<String, usize>,
    skipped: usize,
}

impl CarbonLookup {
    pub fn from_collection(collection: &FeatureCollection, schema: &BoundarySchema) -> Self {
        let mut lookup = CarbonLookup::default();
        for (i, feature) in collection.features.iter().enumerate() {
            let Some(name) = feature.string_property(&schema.key_property) else {
                debug!(
                    feature = i,
                    key = %schema.key_property,
                    "skipping feature without region key"
                );
                lookup.skipped += 1;
                continue;
            };
            lookup.insert(RegionRecord::from_feature(feature, name, schema));
        }
        lookup
    }

    pub fn from_records(records: impl IntoIterator<Item = RegionRecord>) -> Self {
        let mut lookup = CarbonLookup::default();
        for record in records {
            lookup.insert(record);
        }
        lookup
    }

    // Last write wins, first position is kept.
    fn insert(&mut self, record: RegionRecord) {
        if let Some(&pos) = self.index.get(&record.name) {
            debug!(region = %record.name, "duplicate region key, replacing earlier record");
            self.records[pos] = record;
            return;
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
    }

    pub fn get(&self, name: &str) -> Option<&RegionRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Features dropped for lacking a region key.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

pub fn load_lookup_from_str(
    payload: &str,
    schema: &BoundarySchema,
) -> Result<CarbonLookup, FeatureCollectionError> {
    let collection = FeatureCollection::from_geojson_str(payload)?;
    Ok(CarbonLookup::from_collection(&collection, schema))
}

pub fn load_lookup_from_slice(
    payload: &[u8],
    schema: &BoundarySchema,
) -> Result<CarbonLookup, FeatureCollectionError> {
    let collection = FeatureCollection::from_geojson_slice(payload)?;
    Ok(CarbonLookup::from_collection(&collection, schema))
}
