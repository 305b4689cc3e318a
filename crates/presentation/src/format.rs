use foundation::round2;

pub const DENSITY_UNIT: &str = "tC/ha";
pub const NOT_AVAILABLE: &str = "N/A";

/// `12.34 tC/ha`
pub fn format_density(value: f64) -> String {
    format!("{:.2} {DENSITY_UNIT}", round2(value))
}

/// `+12.34 tC/ha` / `-1.20 tC/ha`
pub fn format_signed_density(value: f64) -> String {
    format!("{}{:.2} {DENSITY_UNIT}", sign(value), round2(value))
}

/// `+5.00%` / `-1.20%`; `N/A` when undefined.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}{:.2}%", sign(v), round2(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `$465.36`; negative amounts render as `-$12.00`.
pub fn format_usd(value: f64) -> String {
    let v = round2(value);
    if v < 0.0 {
        format!("-${:.2}", v.abs())
    } else {
        format!("${v:.2}")
    }
}

// Zero gets a "+", matching how growth is shown.
fn sign(value: f64) -> &'static str {
    if value >= 0.0 { "+" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_units() {
        assert_eq!(format_density(136.754), "136.75 tC/ha");
        assert_eq!(format_signed_density(10.0), "+10.00 tC/ha");
        assert_eq!(format_signed_density(-0.456), "-0.46 tC/ha");
    }

    #[test]
    fn formats_percent_and_missing() {
        assert_eq!(format_percent(Some(25.0)), "+25.00%");
        assert_eq!(format_percent(Some(-1.2)), "-1.20%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn formats_currency() {
        assert_eq!(format_usd(20.0 * 3.67 * 6.34), "$465.36");
        assert_eq!(format_usd(-12.0), "-$12.00");
    }
}
