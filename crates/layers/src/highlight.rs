use crate::stack::MapSurface;

/// Hover highlight on the boundary overlay. At most one feature is
/// highlighted at a time.
#[derive(Debug, Clone)]
pub struct HoverHighlight {
    source: String,
    hovered: Option<String>,
}

impl HoverHighlight {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            hovered: None,
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Moves the highlight to `feature_id`, clearing the previous one.
    pub fn hover<S: MapSurface>(&mut self, surface: &mut S, feature_id: &str) {
        if self.hovered.as_deref() == Some(feature_id) {
            return;
        }
        self.clear_current(surface);
        surface.set_feature_state(&self.source, feature_id, true);
        self.hovered = Some(feature_id.to_string());
    }

    pub fn leave<S: MapSurface>(&mut self, surface: &mut S) {
        self.clear_current(surface);
    }

    fn clear_current<S: MapSurface>(&mut self, surface: &mut S) {
        if let Some(prev) = self.hovered.take() {
            surface.set_feature_state(&self.source, &prev, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HoverHighlight;
    use crate::layer::ADMIN_SOURCE_ID;
    use crate::stack::testing::MemorySurface;

    #[test]
    fn moving_hover_clears_previous() {
        let mut surface = MemorySurface::default();
        let mut hl = HoverHighlight::new(ADMIN_SOURCE_ID);

        hl.hover(&mut surface, "Langkat");
        hl.hover(&mut surface, "Deli Serdang");

        assert_eq!(surface.hovered.get("Langkat"), Some(&false));
        assert_eq!(surface.hovered.get("Deli Serdang"), Some(&true));
        assert_eq!(hl.hovered(), Some("Deli Serdang"));

        hl.leave(&mut surface);
        assert_eq!(surface.hovered.get("Deli Serdang"), Some(&false));
        assert_eq!(hl.hovered(), None);
    }
}
