use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use formats::BoundarySchema;
use foundation::{parse_year_list, YearLabel};
use layers::TileEndpoints;

pub const DEFAULT_ADDR: &str = "127.0.0.1:9200";
pub const DEFAULT_DATA: &str = "data/admin_boundaries.geojson";
pub const DEFAULT_TOP_N: usize = 10;

/// Where the boundary dataset is fetched from.
#[derive(Clone, Debug, PartialEq)]
pub enum DataLocation {
    Url(String),
    File(PathBuf),
}

impl DataLocation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataLocation::Url(raw.to_string())
        } else {
            DataLocation::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLocation::Url(url) => f.write_str(url),
            DataLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data: DataLocation,
    /// URL the map renderer uses for the boundary overlay.
    pub public_data_url: String,
    pub schema: BoundarySchema,
    pub latest_year: YearLabel,
    pub top_n: usize,
    pub endpoints: TileEndpoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr(String),
    EmptyYears,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidAddr(raw) => write!(f, "invalid CARBON_ADDR: {raw}"),
            ConfigError::EmptyYears => write!(f, "CARBON_YEARS must list at least one year"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = var("CARBON_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(raw_addr.clone()))?;

        let raw_data = var("CARBON_DATA").unwrap_or_else(|| DEFAULT_DATA.to_string());
        let data = DataLocation::parse(&raw_data);
        let public_data_url = var("CARBON_PUBLIC_DATA_URL").unwrap_or_else(|| raw_data.clone());

        let mut schema = BoundarySchema::default();
        if let Some(raw) = var("CARBON_YEARS") {
            let years = parse_year_list(&raw);
            if years.is_empty() {
                return Err(ConfigError::EmptyYears);
            }
            schema.years = years;
        }
        if let Some(key) = var("CARBON_KEY_PROPERTY") {
            schema.key_property = key;
        }

        let latest_year = var("CARBON_LATEST_YEAR")
            .map(YearLabel::new)
            .or_else(|| schema.years.last().cloned())
            .ok_or(ConfigError::EmptyYears)?;

        let top_n = var("CARBON_TOP_N")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOP_N);

        let mut endpoints = TileEndpoints::default();
        if let Some(t) = var("CARBON_LAND_COVER_TILES") {
            endpoints.land_cover_template = t;
        }
        if let Some(t) = var("CARBON_CARBON_TILES") {
            endpoints.carbon_stock_template = t;
        }

        Ok(Self {
            addr,
            data,
            public_data_url,
            schema,
            latest_year,
            top_n,
            endpoints,
        })
    }
}
