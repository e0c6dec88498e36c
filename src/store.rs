//! Flat rate snapshots
//!
//! One CSV file per orchestrated call, overwritten each time. Absent
//! numeric bounds serialize as empty strings so a re-read reproduces the
//! offers exactly.

use crate::error::Result;
use crate::models::RateOffer;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Fixed column order of the snapshot file.
pub const CSV_COLUMNS: [&str; 9] = [
    "provider",
    "tenure",
    "interest_rate",
    "amount",
    "senior_citizen",
    "source_name",
    "source_url",
    "rate_min",
    "rate_max",
];

fn format_bound(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_bound(field: Option<&str>) -> Option<f64> {
    field.filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

/// Serialize offers as CSV to any writer, header first.
pub fn write_rates_csv<W: Write>(out: W, offers: &[RateOffer]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_COLUMNS)?;
    for offer in offers {
        writer.write_record([
            offer.provider.as_str(),
            offer.tenure.as_str(),
            offer.interest_rate.as_str(),
            offer.amount.as_str(),
            if offer.senior_citizen { "Yes" } else { "No" },
            offer.source_name.as_str(),
            offer.source_url.as_str(),
            format_bound(offer.rate_min).as_str(),
            format_bound(offer.rate_max).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the ranked offers to `path`, replacing any previous snapshot.
/// The parent directory is created on demand.
pub fn save_rates_csv(path: &Path, offers: &[RateOffer]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_rates_csv(fs::File::create(path)?, offers)
}

/// Offers rendered as a CSV string, for hand-off to collaborator layers.
pub fn rates_csv_string(offers: &[RateOffer]) -> Result<String> {
    let mut buf = Vec::new();
    write_rates_csv(&mut buf, offers)?;
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Read a snapshot back into offers.
pub fn load_rates_csv(path: &Path) -> Result<Vec<RateOffer>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut offers = Vec::new();

    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        offers.push(RateOffer {
            provider: field(0),
            tenure: field(1),
            interest_rate: field(2),
            amount: field(3),
            senior_citizen: record.get(4) == Some("Yes"),
            source_name: field(5),
            source_url: field(6),
            rate_min: parse_bound(record.get(7)),
            rate_max: parse_bound(record.get(8)),
        });
    }

    Ok(offers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(provider: &str, rate_min: Option<f64>, rate_max: Option<f64>) -> RateOffer {
        RateOffer {
            provider: provider.to_string(),
            tenure: "Rates for 1 year deposits".to_string(),
            interest_rate: "6.50% - 7.25%".to_string(),
            amount: "50000".to_string(),
            senior_citizen: true,
            source_name: "BankBazaar".to_string(),
            source_url: "https://example.com/fd".to_string(),
            rate_min,
            rate_max,
        }
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fd_rates.csv");

        let offers = vec![
            offer("Alpha Bank", Some(6.5), Some(7.25)),
            offer("Beta Bank", None, None),
        ];
        save_rates_csv(&path, &offers).unwrap();
        let loaded = load_rates_csv(&path).unwrap();
        assert_eq!(loaded, offers);
    }

    #[test]
    fn test_absent_bounds_serialize_as_empty_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fd_rates.csv");

        save_rates_csv(&path, &[offer("Beta Bank", None, None)]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let data_line = raw.lines().nth(1).unwrap();
        assert!(data_line.ends_with(",,"));
        assert!(!data_line.contains("-1"));
    }

    #[test]
    fn test_snapshot_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fd_rates.csv");

        save_rates_csv(&path, &[offer("Alpha Bank", Some(6.5), Some(7.25))]).unwrap();
        save_rates_csv(&path, &[offer("Beta Bank", Some(7.0), Some(7.0))]).unwrap();

        let loaded = load_rates_csv(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].provider, "Beta Bank");
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fd_rates.csv");

        save_rates_csv(&path, &[]).unwrap();
        assert!(path.exists());
        assert!(load_rates_csv(&path).unwrap().is_empty());
    }
}
