use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    fn parse(ty: &str) -> Option<Self> {
        match ty {
            "Point" => Some(GeometryKind::Point),
            "MultiPoint" => Some(GeometryKind::MultiPoint),
            "LineString" => Some(GeometryKind::LineString),
            "MultiLineString" => Some(GeometryKind::MultiLineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            "GeometryCollection" => Some(GeometryKind::GeometryCollection),
            _ => None,
        }
    }

    pub fn is_area(self) -> bool {
        matches!(self, GeometryKind::Polygon | GeometryKind::MultiPolygon)
    }
}

/// A GeoJSON feature reduced to what the dashboard reads: its properties.
///
/// Coordinates are left to the map renderer; only the geometry type is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<GeometryKind>,
}

impl Feature {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Non-empty string property. `null`, numbers and `""` read as `None`.
    pub fn string_property(&self, key: &str) -> Option<&str> {
        match self.properties.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric property. Anything that is not a JSON number reads as `None`.
    pub fn number_property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureCollectionError {
    Json(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FeatureCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureCollectionError::Json(reason) => write!(f, "JSON parse error: {reason}"),
            FeatureCollectionError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FeatureCollectionError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeatureCollectionError {}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FeatureCollectionError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| FeatureCollectionError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_slice(payload: &[u8]) -> Result<Self, FeatureCollectionError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| FeatureCollectionError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FeatureCollectionError> {
        let Value::Object(mut obj) = value else {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        };
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        }

        let Some(Value::Array(features_val)) = obj.remove("features") else {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        };

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.into_iter().enumerate() {
            let Value::Object(mut feat_obj) = feat_val else {
                return Err(FeatureCollectionError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                });
            };

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                FeatureCollectionError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(FeatureCollectionError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let geometry = match parse_geometry_kind(feat_obj.get("geometry")) {
                Ok(kind) => kind,
                Err(reason) => {
                    debug!(feature = index, %reason, "ignoring feature geometry");
                    None
                }
            };

            let properties = match feat_obj.remove("properties") {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };

            features.push(Feature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// GeoJSON allows `"geometry": null` for unlocated features. Unreadable
// geometry is reported to the caller, which keeps the feature without it.
fn parse_geometry_kind(value: Option<&Value>) -> Result<Option<GeometryKind>, String> {
    let obj = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(obj)) => obj,
        Some(_) => return Err("geometry must be an object".to_string()),
    };
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    GeometryKind::parse(ty)
        .map(Some)
        .ok_or_else(|| format!("unsupported geometry type: {ty}"))
}
