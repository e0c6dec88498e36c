//! Core data models for the FD rate engine

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

/// Deposit product the user is asking about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Fixed deposit
    Fd,
    /// Term deposit
    Td,
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Fd
    }
}

/// Semantic role of a table column, assigned by header substring rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Provider,
    GeneralRate,
    SeniorRate,
    Tenor,
}

//
// ================= User Query =================
//

/// Structured intent extracted from a free-text query.
///
/// Any sub-field that fails to parse is simply absent; parsing the whole
/// query never fails. When a tenure unit is detected both the month and day
/// projections are populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    pub raw: String,
    pub product_type: ProductType,
    pub amount: Option<f64>,
    pub tenure_months: Option<u32>,
    pub tenure_days: Option<u32>,
    pub age: Option<u32>,
}

//
// ================= Rate Offer =================
//

/// One provider's quoted rate for one tenure context.
///
/// `interest_rate` keeps the source's display text verbatim (including
/// ranges like "6.50% - 7.25%"); `rate_min`/`rate_max` are the parsed
/// numeric bounds, absent when no percentage token was found. Offers are
/// immutable once extracted; the ranker only selects among them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateOffer {
    pub provider: String,
    pub tenure: String,
    pub interest_rate: String,
    pub amount: String,
    pub senior_citizen: bool,
    pub source_name: String,
    pub source_url: String,
    pub rate_min: Option<f64>,
    pub rate_max: Option<f64>,
}

impl RateOffer {
    /// Ranking score: absent rates sort below every real rate.
    pub fn score(&self) -> f64 {
        self.rate_max.unwrap_or(-1.0)
    }
}

//
// ================= Report =================
//

/// Which source ultimately served a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ServedBy {
    Primary,
    Fallback {
        /// Why the primary path was abandoned
        primary_failure: String,
    },
}

/// Final output of one orchestrated call: the ranked offers plus
/// provenance, so callers can tell "no matching rates" apart from
/// "could not reach either source" (the latter is an `Err`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateReport {
    pub offers: Vec<RateOffer>,
    pub source_name: String,
    pub source_url: String,
    pub served_by: ServedBy,
}

impl RateReport {
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductType::Fd => "FD",
            ProductType::Td => "TD",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_default() {
        assert_eq!(ProductType::default(), ProductType::Fd);
    }

    #[test]
    fn test_offer_score_treats_missing_rate_as_negative() {
        let offer = RateOffer {
            provider: "Test Bank".to_string(),
            tenure: "1 year".to_string(),
            interest_rate: "n/a".to_string(),
            amount: String::new(),
            senior_citizen: false,
            source_name: "Test".to_string(),
            source_url: "https://example.com".to_string(),
            rate_min: None,
            rate_max: None,
        };
        assert_eq!(offer.score(), -1.0);
    }
}
