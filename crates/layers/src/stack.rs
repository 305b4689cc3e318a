use tracing::debug;

use crate::layer::{LayerSpec, SourceSpec};
use crate::plan::{
    AdminPlan, CARBON_STOCK_LAYER_ID, CARBON_STOCK_SOURCE_ID, LAND_COVER_LAYER_ID,
    LAND_COVER_SOURCE_ID, LayerPlan,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    DuplicateSource(String),
    DuplicateLayer(String),
    UnknownSource(String),
    Renderer(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::DuplicateSource(id) => write!(f, "source already registered: {id}"),
            SurfaceError::DuplicateLayer(id) => write!(f, "layer already registered: {id}"),
            SurfaceError::UnknownSource(id) => write!(f, "layer references unknown source: {id}"),
            SurfaceError::Renderer(msg) => write!(f, "renderer error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The map renderer as seen from here: source/layer registration and
/// per-feature state.
pub trait MapSurface {
    fn has_source(&self, id: &str) -> bool;
    fn has_layer(&self, id: &str) -> bool;
    fn add_source(&mut self, source: &SourceSpec) -> Result<(), SurfaceError>;
    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), SurfaceError>;
    fn remove_layer(&mut self, id: &str);
    fn remove_source(&mut self, id: &str);
    fn set_feature_state(&mut self, source: &str, feature_id: &str, hover: bool);
}

/// Keeps exactly one thematic layer registered under the admin overlay.
#[derive(Debug, Default)]
pub struct LayerStack {
    current: Option<LayerPlan>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&LayerPlan> {
        self.current.as_ref()
    }

    /// Registers the boundary overlay. Idempotent.
    pub fn init_admin<S: MapSurface>(
        surface: &mut S,
        admin: &AdminPlan,
    ) -> Result<(), SurfaceError> {
        if !surface.has_source(&admin.source.id) {
            surface.add_source(&admin.source)?;
        }
        for layer in [&admin.fill, &admin.outline] {
            if !surface.has_layer(&layer.id) {
                surface.add_layer(layer)?;
            }
        }
        Ok(())
    }

    /// Swaps the thematic layer for `plan`.
    ///
    /// Both thematic layer/source pairs are removed first whatever the
    /// previous mode was, so repeated selections never stack layers.
    pub fn apply<S: MapSurface>(
        &mut self,
        surface: &mut S,
        plan: LayerPlan,
    ) -> Result<(), SurfaceError> {
        if self.current.as_ref() == Some(&plan) {
            return Ok(());
        }
        remove_layer_and_source(surface, LAND_COVER_LAYER_ID, LAND_COVER_SOURCE_ID);
        remove_layer_and_source(surface, CARBON_STOCK_LAYER_ID, CARBON_STOCK_SOURCE_ID);
        self.current = None;

        surface.add_source(&plan.source)?;
        surface.add_layer(&plan.layer)?;
        debug!(year = %plan.year, mode = ?plan.mode, "thematic layer applied");
        self.current = Some(plan);
        Ok(())
    }

    /// Unregisters the thematic layer (view teardown).
    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        if let Some(plan) = self.current.take() {
            remove_layer_and_source(surface, &plan.layer.id, &plan.source.id);
        }
    }
}

fn remove_layer_and_source<S: MapSurface>(surface: &mut S, layer_id: &str, source_id: &str) {
    if surface.has_layer(layer_id) {
        surface.remove_layer(layer_id);
    }
    if surface.has_source(source_id) {
        surface.remove_source(source_id);
    }
}
