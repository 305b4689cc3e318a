use serde::Serialize;

/// Land-cover class → fill colour, as labelled in the classified tiles.
pub const LAND_COVER_PALETTE: [(&str, &str); 7] = [
    ("Sawit", "#FF6B35"),
    ("Vegetasi Tinggi", "#2D6A4F"),
    ("Vegetasi Rendah", "#95D5B2"),
    ("Perkebunan Lain", "#FFB627"),
    ("Badan Air", "#0077BE"),
    ("Tanah Terbuka", "#D4A373"),
    ("Emplacement", "#8B8B8B"),
];

pub const LAND_COVER_FALLBACK: &str = "#CCCCCC";

/// Tile property holding the class label.
pub const LAND_COVER_CLASS_PROPERTY: &str = "kelas";

pub fn land_cover_color(class: &str) -> &'static str {
    LAND_COVER_PALETTE
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, color)| *color)
        .unwrap_or(LAND_COVER_FALLBACK)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

pub fn land_cover_legend() -> Vec<LegendEntry> {
    LAND_COVER_PALETTE
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.to_string(),
            color: color.to_string(),
        })
        .collect()
}

/// Carbon density ramp, low to high.
pub const CARBON_GRADIENT: [&str; 6] = [
    "#d7191c", "#fdae61", "#ffffbf", "#D9EAB9", "#B6E1AA", "#64A7B3",
];

/// Scale labels (tC/ha) printed beside the ramp, high to low.
pub const CARBON_SCALE: [u32; 6] = [240, 192, 144, 96, 49, 1];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonLegend {
    pub unit: &'static str,
    pub gradient: Vec<&'static str>,
    pub scale: Vec<u32>,
}

pub fn carbon_legend() -> CarbonLegend {
    CarbonLegend {
        unit: "tC/ha",
        gradient: CARBON_GRADIENT.to_vec(),
        scale: CARBON_SCALE.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_classes() {
        assert_eq!(land_cover_color("Sawit"), "#FF6B35");
        assert_eq!(land_cover_color("Badan Air"), "#0077BE");
        assert_eq!(land_cover_color("Glacier"), LAND_COVER_FALLBACK);
    }

    #[test]
    fn legend_follows_palette_order() {
        let legend = land_cover_legend();
        assert_eq!(legend.len(), 7);
        assert_eq!(legend[0].label, "Sawit");
        assert_eq!(carbon_legend().scale.first(), Some(&240));
    }
}
