//! Collaborator hand-off
//!
//! LLM consultant/intent agents sit outside the engine: they receive a
//! serialized snapshot of a request (query, provenance, ranked offers) as
//! opaque context and their replies are never parsed back except for a
//! best-effort scan for a CSV-shaped fragment. Both directions are plain
//! text; the engine has no dependency on any agent framework.

use crate::error::Result;
use crate::models::{RateReport, UserQuery};
use crate::store::{rates_csv_string, CSV_COLUMNS};
use chrono::Utc;

/// Header tokens a rate CSV fragment can start with: the engine's own
/// snapshot header, or the "Bank," shape agents were historically asked
/// to produce.
const FRAGMENT_MARKERS: [&str; 2] = ["provider,", "Bank,"];

/// Serialize one request into the opaque context block handed to a
/// consultant agent.
pub fn consultant_context(query: &UserQuery, report: &RateReport) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "FD rate snapshot ({})\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("Query: {}\n", query.raw));
    out.push_str(&format!("Product: {}\n", query.product_type));
    if let Some(days) = query.tenure_days {
        out.push_str(&format!("Requested tenure: {} days\n", days));
    }
    out.push_str(&format!(
        "Source: {} ({})\n\n",
        report.source_name, report.source_url
    ));
    out.push_str(&rates_csv_string(&report.offers)?);
    Ok(out)
}

/// Best-effort scan of an agent reply for a CSV fragment: the text from
/// the first known header token onward, or `None` when no marker appears.
/// Purely positional; no attempt to validate the fragment beyond the
/// header.
pub fn csv_fragment(reply: &str) -> Option<String> {
    FRAGMENT_MARKERS
        .iter()
        .filter_map(|marker| reply.find(marker))
        .min()
        .map(|start| reply[start..].trim_end().to_string())
}

/// The engine's own snapshot header line, exposed so presentation layers
/// can recognize it.
pub fn snapshot_header() -> String {
    CSV_COLUMNS.join(",")
}
