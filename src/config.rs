//! Engine configuration
//!
//! Everything is overridable through the environment (a `.env` file is
//! honored); the defaults match the public comparison pages the engine
//! was built against.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of providers kept after ranking
pub const DEFAULT_TOP_PROVIDERS: usize = 10;

/// Age at or above which a depositor qualifies for senior-citizen rates
pub const SENIOR_AGE: u32 = 60;

/// Static configuration for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub source_name: String,
    pub source_url: String,
    pub fallback_source_name: String,
    pub fallback_source_url: String,
    pub csv_path: PathBuf,
    pub top_providers: usize,
    pub fetch_timeout: Duration,
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let csv_path = env::var("CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(data_dir).join("fd_rates.csv"));

        let top_providers = env::var("TOP_PROVIDERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOP_PROVIDERS);

        let timeout_secs: u64 = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        Self {
            source_name: env::var("SOURCE_NAME").unwrap_or_else(|_| "BankBazaar".to_string()),
            source_url: env::var("SOURCE_URL").unwrap_or_else(|_| {
                "https://www.bankbazaar.com/fixed-deposit-rate.html".to_string()
            }),
            fallback_source_name: env::var("FALLBACK_SOURCE_NAME")
                .unwrap_or_else(|_| "HDFC Bank".to_string()),
            fallback_source_url: env::var("FALLBACK_SOURCE_URL").unwrap_or_else(|_| {
                "https://www.hdfc.bank.in/fixed-deposit/fd-interest-rate".to_string()
            }),
            csv_path,
            top_providers,
            fetch_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
