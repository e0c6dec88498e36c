//! Tenure band inference and matching
//!
//! A comparison page often introduces each rate table with a descriptive
//! paragraph ("FD rates for deposits of seven days to one year"). The band
//! matcher turns that context into a day-count interval and, when a target
//! tenure is known, narrows the candidate tables down to the most specific
//! band that contains it. Overlapping bands are common: a broad "Regular
//! FD" table can enclose a narrower "7-Day Special" table covering the same
//! tenure, and the narrowest enclosing band wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TENURE_BAND_RE: Regex = Regex::new(
        r"(?i)(one|two|three|four|five|six|seven|eight|nine|ten|\d+)\s*(day|days|month|months|year|years)"
    )
    .unwrap();
}

fn token_to_int(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    match token.as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        _ => None,
    }
}

fn unit_to_days(value: u32, unit: &str) -> u32 {
    let unit = unit.to_lowercase();
    if unit.starts_with("year") {
        value * 365
    } else if unit.starts_with("month") {
        value * 30
    } else {
        value
    }
}

/// Day-count interval inferred from a table's context text.
///
/// `max_days` is absent when only one magnitude token was found; such an
/// open band never filters anything out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenureBand {
    pub min_days: u32,
    pub max_days: Option<u32>,
}

impl TenureBand {
    /// Infer a band from context text: the first two magnitude+unit tokens
    /// (cardinal words "one".."ten" or digits; day/month/year units).
    pub fn from_context(context: &str) -> Option<TenureBand> {
        let bounds: Vec<u32> = TENURE_BAND_RE
            .captures_iter(context)
            .take(2)
            .filter_map(|c| token_to_int(&c[1]).map(|v| unit_to_days(v, &c[2])))
            .collect();

        match bounds.as_slice() {
            [] => None,
            [single] => Some(TenureBand {
                min_days: *single,
                max_days: None,
            }),
            [a, b, ..] => Some(TenureBand {
                min_days: *a.min(b),
                max_days: Some(*a.max(b)),
            }),
        }
    }

    /// Width in days, only defined for fully bounded bands.
    pub fn width(&self) -> Option<u32> {
        self.max_days.map(|max| max - self.min_days)
    }

    /// Whether a fully bounded band contains the target day count.
    /// Open bands never exclude a target.
    pub fn contains(&self, days: u32) -> bool {
        match self.max_days {
            Some(max) => self.min_days <= days && days <= max,
            None => true,
        }
    }
}

/// First pass of band matching: the narrowest width among fully bounded
/// bands that contain the target.
pub fn narrowest_containing_width(bands: &[Option<TenureBand>], target_days: u32) -> Option<u32> {
    bands
        .iter()
        .flatten()
        .filter(|b| b.max_days.is_some() && b.contains(target_days))
        .filter_map(|b| b.width())
        .min()
}

/// Second pass: whether a table with this band stays in the candidate set.
/// Bandless and open bands are always retained; bounded bands must contain
/// the target and, when an allowed width was found, match it.
pub fn is_eligible(
    band: Option<TenureBand>,
    target_days: Option<u32>,
    allowed_width: Option<u32>,
) -> bool {
    let target = match target_days {
        Some(t) => t,
        None => return true,
    };
    let band = match band {
        Some(b) if b.max_days.is_some() => b,
        _ => return true,
    };

    if !band.contains(target) {
        return false;
    }
    match (allowed_width, band.width()) {
        (Some(allowed), Some(width)) => width <= allowed,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_from_word_tokens() {
        let band = TenureBand::from_context("FD rates for seven days to ten years").unwrap();
        assert_eq!(band.min_days, 7);
        assert_eq!(band.max_days, Some(3650));
    }

    #[test]
    fn test_band_from_digit_tokens() {
        let band = TenureBand::from_context("Rates for deposits of 30 days to 12 months").unwrap();
        assert_eq!(band.min_days, 30);
        assert_eq!(band.max_days, Some(360));
    }

    #[test]
    fn test_band_single_token_is_open() {
        let band = TenureBand::from_context("Special rates for 7 days").unwrap();
        assert_eq!(band.min_days, 7);
        assert_eq!(band.max_days, None);
        assert!(band.contains(5000));
    }

    #[test]
    fn test_band_absent_without_tokens() {
        assert_eq!(TenureBand::from_context("General FD information"), None);
        assert_eq!(TenureBand::from_context(""), None);
    }

    #[test]
    fn test_narrowest_band_wins() {
        // A broad "Regular FD" band nesting a "7-Day Special" band: at a
        // 7-day target only the special table survives.
        let broad = Some(TenureBand {
            min_days: 0,
            max_days: Some(2555),
        });
        let special = Some(TenureBand {
            min_days: 7,
            max_days: Some(7),
        });
        let bands = vec![broad, special];

        let width = narrowest_containing_width(&bands, 7);
        assert_eq!(width, Some(0));
        assert!(!is_eligible(broad, Some(7), width));
        assert!(is_eligible(special, Some(7), width));
    }

    #[test]
    fn test_ties_at_narrowest_width_all_retained() {
        let a = Some(TenureBand {
            min_days: 0,
            max_days: Some(30),
        });
        let b = Some(TenureBand {
            min_days: 7,
            max_days: Some(37),
        });
        let bands = vec![a, b];

        let width = narrowest_containing_width(&bands, 10);
        assert_eq!(width, Some(30));
        assert!(is_eligible(a, Some(10), width));
        assert!(is_eligible(b, Some(10), width));
    }

    #[test]
    fn test_bandless_tables_always_eligible() {
        assert!(is_eligible(None, Some(365), Some(10)));
        assert!(is_eligible(
            Some(TenureBand {
                min_days: 0,
                max_days: Some(3650)
            }),
            None,
            None
        ));
    }

    #[test]
    fn test_out_of_band_target_excluded() {
        let band = Some(TenureBand {
            min_days: 30,
            max_days: Some(90),
        });
        assert!(!is_eligible(band, Some(7), None));
    }
}
