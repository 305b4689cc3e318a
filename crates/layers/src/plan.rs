use foundation::YearLabel;
use serde::{Deserialize, Serialize};

use crate::layer::{
    ADMIN_FILL_LAYER_ID, ADMIN_OUTLINE_LAYER_ID, ADMIN_SOURCE_ID, LayerKind, LayerSpec,
    SourceKind, SourceSpec, TileScheme,
};

pub const LAND_COVER_SOURCE_ID: &str = "land-cover";
pub const LAND_COVER_LAYER_ID: &str = "land-cover-layer";
pub const CARBON_STOCK_SOURCE_ID: &str = "carbon-stock";
pub const CARBON_STOCK_LAYER_ID: &str = "carbon-stock-layer";

const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    LandCover,
    CarbonStock,
}

impl ViewMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "land_cover" | "landcover" | "land-cover" => Some(ViewMode::LandCover),
            "carbon_stock" | "carbonstock" | "carbon-stock" => Some(ViewMode::CarbonStock),
            _ => None,
        }
    }
}

/// Year-parameterised tile URL templates. `{year}` is substituted;
/// `{z}/{x}/{y}` is left for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileEndpoints {
    pub land_cover_template: String,
    pub carbon_stock_template: String,
    /// Source-layer name inside the vector tiles.
    pub land_cover_source_layer: String,
}

impl Default for TileEndpoints {
    fn default() -> Self {
        Self {
            land_cover_template:
                "https://yzserver-production.up.railway.app/data/sumut_{year}/{z}/{x}/{y}.pbf"
                    .to_string(),
            carbon_stock_template: "https://digital-twin-ugm.s3.ap-southeast-1.amazonaws.com/carbon_stock/tiles2/{year}/{z}/{x}/{y}.png".to_string(),
            land_cover_source_layer: "sumut_{year}".to_string(),
        }
    }
}

impl TileEndpoints {
    fn expand(template: &str, year: &YearLabel) -> String {
        template.replace(YEAR_PLACEHOLDER, year.as_str())
    }
}

/// The thematic source + layer to register for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerPlan {
    pub year: String,
    pub mode: ViewMode,
    pub source: SourceSpec,
    pub layer: LayerSpec,
}

impl LayerPlan {
    pub fn for_selection(year: &YearLabel, mode: ViewMode, endpoints: &TileEndpoints) -> Self {
        let (source, layer) = match mode {
            ViewMode::LandCover => (
                SourceSpec {
                    id: LAND_COVER_SOURCE_ID.to_string(),
                    kind: SourceKind::Vector,
                    urls: vec![TileEndpoints::expand(&endpoints.land_cover_template, year)],
                    min_zoom: 0,
                    max_zoom: 14,
                    tile_size: None,
                    scheme: TileScheme::Xyz,
                    promote_id: None,
                },
                LayerSpec {
                    id: LAND_COVER_LAYER_ID.to_string(),
                    kind: LayerKind::Fill,
                    source: LAND_COVER_SOURCE_ID.to_string(),
                    source_layer: Some(TileEndpoints::expand(
                        &endpoints.land_cover_source_layer,
                        year,
                    )),
                    opacity: 0.7,
                    before: Some(ADMIN_FILL_LAYER_ID.to_string()),
                },
            ),
            ViewMode::CarbonStock => (
                SourceSpec {
                    id: CARBON_STOCK_SOURCE_ID.to_string(),
                    kind: SourceKind::Raster,
                    urls: vec![TileEndpoints::expand(&endpoints.carbon_stock_template, year)],
                    min_zoom: 0,
                    max_zoom: 21,
                    tile_size: Some(256),
                    scheme: TileScheme::Tms,
                    promote_id: None,
                },
                LayerSpec {
                    id: CARBON_STOCK_LAYER_ID.to_string(),
                    kind: LayerKind::Raster,
                    source: CARBON_STOCK_SOURCE_ID.to_string(),
                    source_layer: None,
                    opacity: 0.8,
                    before: Some(ADMIN_FILL_LAYER_ID.to_string()),
                },
            ),
        };
        Self {
            year: year.to_string(),
            mode,
            source,
            layer,
        }
    }
}

/// The boundary overlay: one GeoJSON source, a hover fill and an outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminPlan {
    pub source: SourceSpec,
    pub fill: LayerSpec,
    pub outline: LayerSpec,
}

impl AdminPlan {
    pub fn new(data_url: impl Into<String>, key_property: impl Into<String>) -> Self {
        Self {
            source: SourceSpec {
                id: ADMIN_SOURCE_ID.to_string(),
                kind: SourceKind::GeoJson,
                urls: vec![data_url.into()],
                min_zoom: 0,
                max_zoom: 24,
                tile_size: None,
                scheme: TileScheme::Xyz,
                promote_id: Some(key_property.into()),
            },
            fill: LayerSpec {
                id: ADMIN_FILL_LAYER_ID.to_string(),
                kind: LayerKind::Fill,
                source: ADMIN_SOURCE_ID.to_string(),
                source_layer: None,
                // hidden until hovered
                opacity: 0.0,
                before: None,
            },
            outline: LayerSpec {
                id: ADMIN_OUTLINE_LAYER_ID.to_string(),
                kind: LayerKind::Line,
                source: ADMIN_SOURCE_ID.to_string(),
                source_layer: None,
                opacity: 1.0,
                before: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_cover_plan_substitutes_year() {
        let plan = LayerPlan::for_selection(
            &YearLabel::new("2024"),
            ViewMode::LandCover,
            &TileEndpoints::default(),
        );
        assert_eq!(
            plan.source.urls[0],
            "https://yzserver-production.up.railway.app/data/sumut_2024/{z}/{x}/{y}.pbf"
        );
        assert_eq!(plan.layer.source_layer.as_deref(), Some("sumut_2024"));
        assert_eq!(plan.source.max_zoom, 14);
        assert_eq!(plan.layer.before.as_deref(), Some(ADMIN_FILL_LAYER_ID));
    }

    #[test]
    fn carbon_plan_is_tms_raster() {
        let plan = LayerPlan::for_selection(
            &YearLabel::new("2021"),
            ViewMode::CarbonStock,
            &TileEndpoints::default(),
        );
        assert_eq!(plan.source.kind, SourceKind::Raster);
        assert_eq!(plan.source.scheme, TileScheme::Tms);
        assert!(plan.source.urls[0].contains("/tiles2/2021/"));
        assert_eq!(plan.layer.opacity, 0.8);
    }

    #[test]
    fn parses_view_modes() {
        assert_eq!(ViewMode::parse("carbonStock"), Some(ViewMode::CarbonStock));
        assert_eq!(ViewMode::parse("land_cover"), Some(ViewMode::LandCover));
        assert_eq!(ViewMode::parse("ndvi"), None);
    }
}
