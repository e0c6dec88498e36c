//! Free-text query parsing
//!
//! Deterministic pattern extraction of product type, amount, tenure and age
//! from a user query. Pure and infallible: a sub-field that does not parse
//! is absent, never an error.

use crate::config::SENIOR_AGE;
use crate::models::{ProductType, UserQuery};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref AMOUNT_RE: Regex = Regex::new(r"(\d+(?:,\d{2,3})*(?:\.\d+)?)").unwrap();
    static ref TENURE_RE: Regex =
        Regex::new(r"(?i)(\d+)\s*(day|days|d|month|months|mo|mos|year|years|yr|yrs)").unwrap();
    static ref AGE_RE: Regex = Regex::new(r"(?i)(\d{2})\s*(?:years|yrs|year|yr)").unwrap();
}

/// Parse a free-text query into structured intent.
pub fn parse_user_query(text: &str) -> UserQuery {
    let lowered = text.to_lowercase();

    let product_type = if lowered.contains("fd") || lowered.contains("fixed deposit") {
        ProductType::Fd
    } else if lowered.contains("td") || lowered.contains("term deposit") {
        ProductType::Td
    } else {
        ProductType::Fd
    };

    let amount = AMOUNT_RE
        .captures(&text.replace(',', ""))
        .and_then(|c| c[1].parse::<f64>().ok());

    let mut tenure_months = None;
    let mut tenure_days = None;
    if let Some(caps) = TENURE_RE.captures(&lowered) {
        if let Ok(value) = caps[1].parse::<u32>() {
            let unit = caps[2].to_lowercase();
            if unit.starts_with('y') {
                tenure_months = Some(value * 12);
                tenure_days = Some(value * 365);
            } else if unit.starts_with('m') {
                tenure_months = Some(value);
                tenure_days = Some(value * 30);
            } else {
                tenure_days = Some(value);
                tenure_months = Some(((value as f64 / 30.0).round() as u32).max(1));
            }
        }
    }

    let age = AGE_RE
        .captures(&lowered)
        .and_then(|c| c[1].parse::<u32>().ok());

    UserQuery {
        raw: text.to_string(),
        product_type,
        amount,
        tenure_months,
        tenure_days,
        age,
    }
}

/// Senior-citizen threshold check, for callers deriving the senior flag
/// from a parsed age.
pub fn is_senior(age: u32) -> bool {
    age >= SENIOR_AGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_in_years() {
        let q = parse_user_query("best fd rate for 5 years");
        assert_eq!(q.tenure_months, Some(60));
        assert_eq!(q.tenure_days, Some(1825));
    }

    #[test]
    fn test_tenure_in_days_rounds_months() {
        let q = parse_user_query("fd for 45 days");
        assert_eq!(q.tenure_days, Some(45));
        assert_eq!(q.tenure_months, Some(2));
    }

    #[test]
    fn test_short_day_tenure_floors_to_one_month() {
        let q = parse_user_query("fd for 7 days");
        assert_eq!(q.tenure_days, Some(7));
        assert_eq!(q.tenure_months, Some(1));
    }

    #[test]
    fn test_product_type_detection() {
        assert_eq!(
            parse_user_query("fixed deposit rates").product_type,
            ProductType::Fd
        );
        assert_eq!(
            parse_user_query("term deposit for 1 year").product_type,
            ProductType::Td
        );
        // Defaults to FD when neither product is named
        assert_eq!(
            parse_user_query("best rates please").product_type,
            ProductType::Fd
        );
    }

    #[test]
    fn test_amount_strips_thousands_separators() {
        let q = parse_user_query("fd of 1,00,000 for 1 year");
        assert_eq!(q.amount, Some(100000.0));
    }

    #[test]
    fn test_age_extraction_and_senior_threshold() {
        let q = parse_user_query("fd for a 65 years old");
        assert_eq!(q.age, Some(65));
        assert!(is_senior(65));
        assert!(is_senior(60));
        assert!(!is_senior(59));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let q = parse_user_query("tell me about deposits");
        assert_eq!(q.amount, None);
        assert_eq!(q.tenure_months, None);
        assert_eq!(q.tenure_days, None);
        assert_eq!(q.age, None);
    }
}
