use serde::Serialize;

pub const ADMIN_SOURCE_ID: &str = "admin-boundary";
pub const ADMIN_FILL_LAYER_ID: &str = "admin-fill";
pub const ADMIN_OUTLINE_LAYER_ID: &str = "admin-outline";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Vector,
    Raster,
    GeoJson,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileScheme {
    Xyz,
    Tms,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Fill,
    Line,
    Raster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    pub id: String,
    pub kind: SourceKind,
    /// Tile URL templates, or the GeoJSON URL for `GeoJson` sources.
    pub urls: Vec<String>,
    pub min_zoom: u8,
    pub max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    pub scheme: TileScheme,
    /// Feature property promoted to the feature id (hover state is keyed on it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promote_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub kind: LayerKind,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    pub opacity: f32,
    /// Insert below this layer when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}
