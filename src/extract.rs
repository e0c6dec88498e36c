//! Rate offer extraction
//!
//! Two fixed source shapes:
//!
//! - **Market comparison pages** carry several tables, each introduced by a
//!   contextual paragraph that implies a tenure band; columns are
//!   provider / general-rate / senior-rate and the band decides which
//!   tables apply to the requested tenure.
//! - **Bank product pages** (the fallback) carry a single-provider table
//!   with a literal tenor column; general and senior columns each produce
//!   their own offer.

use crate::band::{self, TenureBand};
use crate::models::{ColumnRole, RateOffer};
use crate::normalize::{classify_column, rate_bounds};
use crate::table::{parse_tables, RawTable};

/// Tenure label used when a table has no usable context text.
const DEFAULT_TENURE_LABEL: &str = "FD rates";

/// Provenance stamped onto every extracted offer.
#[derive(Debug, Clone, Copy)]
pub struct SourceInfo<'a> {
    pub name: &'a str,
    pub url: &'a str,
}

fn first_column(table: &RawTable, role: ColumnRole) -> Option<usize> {
    table
        .headers
        .iter()
        .position(|label| classify_column(label) == Some(role))
}

fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

fn is_blank(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("nan")
}

fn amount_field(amount: Option<f64>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

/// Extract offers from a market comparison page.
///
/// `senior == Some(true)` reads the senior column; anything else reads the
/// general column. A table whose chosen column is missing is skipped even
/// when the other rate column exists. When `tenure_days` is given, tables
/// are band-filtered in two passes: the narrowest fully bounded band
/// containing the target sets the allowed width, and only tables at that
/// width (or without a bounded band) survive.
pub fn market_offers(
    html: &str,
    amount: Option<f64>,
    senior: Option<bool>,
    tenure_days: Option<u32>,
    source: SourceInfo<'_>,
) -> Vec<RateOffer> {
    let tables = parse_tables(html);
    let bands: Vec<Option<TenureBand>> = tables
        .iter()
        .map(|t| TenureBand::from_context(&t.context))
        .collect();

    let allowed_width = tenure_days.and_then(|t| band::narrowest_containing_width(&bands, t));

    let want_senior = senior == Some(true);
    let mut offers = Vec::new();

    for (table, table_band) in tables.iter().zip(bands) {
        if !band::is_eligible(table_band, tenure_days, allowed_width) {
            continue;
        }

        let general_idx = first_column(table, ColumnRole::GeneralRate);
        let senior_idx = first_column(table, ColumnRole::SeniorRate);
        let provider_idx = match first_column(table, ColumnRole::Provider) {
            Some(idx) => idx,
            // Not a rate table
            None => continue,
        };
        if general_idx.is_none() && senior_idx.is_none() {
            continue;
        }

        let rate_idx = match if want_senior { senior_idx } else { general_idx } {
            Some(idx) => idx,
            // The requested tier is missing; never substitute the other one
            None => continue,
        };

        let tenure_label = if table.context.is_empty() {
            DEFAULT_TENURE_LABEL
        } else {
            table.context.as_str()
        };

        for row in &table.rows {
            let provider = cell(row, provider_idx);
            let rate_text = cell(row, rate_idx);
            if is_blank(provider) || is_blank(rate_text) {
                continue;
            }

            let (rate_min, rate_max) = rate_bounds(rate_text);
            offers.push(RateOffer {
                provider: provider.to_string(),
                tenure: tenure_label.to_string(),
                interest_rate: rate_text.to_string(),
                amount: amount_field(amount),
                senior_citizen: want_senior,
                source_name: source.name.to_string(),
                source_url: source.url.to_string(),
                rate_min,
                rate_max,
            });
        }
    }

    offers
}

/// Extract offers from a fallback bank product page.
///
/// The table shape is a literal tenor column plus rate columns; each rate
/// column present emits a separate offer tagged with its own senior flag,
/// and the provider is the source itself. Senior filtering is the
/// orchestrator's job.
pub fn fallback_offers(
    html: &str,
    amount: Option<f64>,
    source: SourceInfo<'_>,
) -> Vec<RateOffer> {
    let mut offers = Vec::new();

    for table in parse_tables(html) {
        let tenor_idx = match first_column(&table, ColumnRole::Tenor) {
            Some(idx) => idx,
            None => continue,
        };
        let general_idx = first_column(&table, ColumnRole::GeneralRate);
        let senior_idx = first_column(&table, ColumnRole::SeniorRate);
        if general_idx.is_none() && senior_idx.is_none() {
            continue;
        }

        for row in &table.rows {
            let tenor = cell(row, tenor_idx);
            if is_blank(tenor) {
                continue;
            }

            for (idx, is_senior) in [(general_idx, false), (senior_idx, true)] {
                let rate_idx = match idx {
                    Some(i) => i,
                    None => continue,
                };
                let rate_text = cell(row, rate_idx);
                let (rate_min, rate_max) = rate_bounds(rate_text);
                offers.push(RateOffer {
                    provider: source.name.to_string(),
                    tenure: tenor.to_string(),
                    interest_rate: rate_text.to_string(),
                    amount: amount_field(amount),
                    senior_citizen: is_senior,
                    source_name: source.name.to_string(),
                    source_url: source.url.to_string(),
                    rate_min,
                    rate_max,
                });
            }
        }
    }

    offers
}
