use std::fmt;

/// Year labels present in the boundary dataset.
pub const DEFAULT_YEARS: [&str; 6] = ["2020", "2021", "2022", "2023", "2024", "2025"];

/// A year key as it appears in feature properties (`"2024"`).
///
/// Labels stay strings because that is how the dataset keys them; the
/// numeric view is only used to step to the neighbouring year.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearLabel(String);

impl YearLabel {
    pub fn new(label: impl Into<String>) -> Self {
        YearLabel(label.into())
    }

    pub fn from_number(year: i32) -> Self {
        YearLabel(year.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn number(&self) -> Option<i32> {
        self.0.trim().parse().ok()
    }

    pub fn previous(&self) -> Option<YearLabel> {
        self.number().map(|y| YearLabel::from_number(y - 1))
    }

    pub fn next(&self) -> Option<YearLabel> {
        self.number().map(|y| YearLabel::from_number(y + 1))
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for YearLabel {
    fn from(s: &str) -> Self {
        YearLabel::new(s)
    }
}

impl From<i32> for YearLabel {
    fn from(year: i32) -> Self {
        YearLabel::from_number(year)
    }
}

pub fn default_years() -> Vec<YearLabel> {
    DEFAULT_YEARS.iter().map(|y| YearLabel::new(*y)).collect()
}

/// Parses `"2020,2021, 2024"`; blank items are dropped.
pub fn parse_year_list(raw: &str) -> Vec<YearLabel> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(YearLabel::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_between_years() {
        let y = YearLabel::new("2024");
        assert_eq!(y.previous(), Some(YearLabel::new("2023")));
        assert_eq!(y.next(), Some(YearLabel::new("2025")));
        assert_eq!(YearLabel::new("latest").previous(), None);
    }

    #[test]
    fn parses_comma_list() {
        let years = parse_year_list("2020, 2021,,2025 ");
        assert_eq!(
            years,
            vec![YearLabel::new("2020"), YearLabel::new("2021"), YearLabel::new("2025")]
        );
    }

    #[test]
    fn default_years_cover_2020_to_2025() {
        let years = default_years();
        assert_eq!(years.len(), 6);
        assert_eq!(years.first().map(YearLabel::as_str), Some("2020"));
        assert_eq!(years.last().map(YearLabel::as_str), Some("2025"));
    }
}
