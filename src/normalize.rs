//! Rate text and header normalization
//!
//! Turns raw cell and header text into typed values: numeric rate bounds
//! from display strings like "6.50% - 7.25%", canonical lower-cased column
//! labels, and semantic column roles assigned from an explicit substring
//! rule table.

use crate::models::ColumnRole;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RATE_RE: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap();
}

/// Header substring → column role, first match wins.
///
/// `senior` is checked before the general-rate synonyms so that a label
/// like "senior citizen interest rate" lands on the senior column.
const COLUMN_RULES: &[(&str, ColumnRole)] = &[
    ("bank", ColumnRole::Provider),
    ("provider", ColumnRole::Provider),
    ("tenor", ColumnRole::Tenor),
    ("senior", ColumnRole::SeniorRate),
    ("general", ColumnRole::GeneralRate),
    ("regular", ColumnRole::GeneralRate),
    ("interest rate", ColumnRole::GeneralRate),
];

/// Extract the numeric bounds of every `<number>%` token in the text.
///
/// Returns `(None, None)` when no token parses; a single token yields
/// `min == max`.
pub fn rate_bounds(text: &str) -> (Option<f64>, Option<f64>) {
    let values: Vec<f64> = RATE_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        return (None, None);
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (Some(min), Some(max))
}

/// Canonical form of a (possibly multi-level) column header: the non-empty
/// parts joined with single spaces, whitespace collapsed, lower-cased.
/// Placeholder "nan" parts are dropped, matching how merged header cells
/// surface in scraped tables.
pub fn normalize_label(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty() && p.to_lowercase() != "nan")
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Assign a semantic role to a normalized header label, or `None` when no
/// rule matches.
pub fn classify_column(label: &str) -> Option<ColumnRole> {
    COLUMN_RULES
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, role)| *role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds_range() {
        assert_eq!(rate_bounds("6.50% - 7.25%"), (Some(6.50), Some(7.25)));
    }

    #[test]
    fn test_rate_bounds_single_value() {
        assert_eq!(rate_bounds("7.0%"), (Some(7.0), Some(7.0)));
    }

    #[test]
    fn test_rate_bounds_no_token() {
        assert_eq!(rate_bounds("n/a"), (None, None));
    }

    #[test]
    fn test_rate_bounds_ignores_bare_numbers() {
        // A number without a percent sign is not a rate token
        assert_eq!(rate_bounds("up to 5 crore"), (None, None));
    }

    #[test]
    fn test_normalize_label_joins_nested_headers() {
        assert_eq!(
            normalize_label(&["Interest  Rates", "General Citizens"]),
            "interest rates general citizens"
        );
        assert_eq!(normalize_label(&["Bank", "nan"]), "bank");
        assert_eq!(normalize_label(&["", "Tenor"]), "tenor");
    }

    #[test]
    fn test_classify_column_roles() {
        assert_eq!(classify_column("bank name"), Some(ColumnRole::Provider));
        assert_eq!(classify_column("nbfc provider"), Some(ColumnRole::Provider));
        assert_eq!(
            classify_column("general citizens rate"),
            Some(ColumnRole::GeneralRate)
        );
        assert_eq!(
            classify_column("senior citizens rate"),
            Some(ColumnRole::SeniorRate)
        );
        assert_eq!(classify_column("tenor"), Some(ColumnRole::Tenor));
        assert_eq!(classify_column("remarks"), None);
    }

    #[test]
    fn test_senior_outranks_general_synonyms() {
        assert_eq!(
            classify_column("senior citizen interest rate"),
            Some(ColumnRole::SeniorRate)
        );
        assert_eq!(
            classify_column("regular interest rate"),
            Some(ColumnRole::GeneralRate)
        );
    }
}
