//! Source orchestration
//!
//! Primary → fallback state machine: the primary comparison page is
//! attempted exactly once; any failure (network, non-2xx, parse) or an
//! empty extraction falls through to the fallback bank page, also attempted
//! exactly once. Fallback failures propagate. The ranked result is
//! persisted as a flat CSV snapshot after every successful call.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::extract::{self, SourceInfo};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::{RateOffer, RateReport, ServedBy};
use crate::rank::best_per_provider;
use crate::store::save_rates_csv;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The rate engine: one instance per configuration, no state across calls.
pub struct RateEngine {
    config: EngineConfig,
    fetcher: Arc<dyn PageFetcher>,
}

impl RateEngine {
    pub fn new(config: EngineConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Engine wired to the real HTTP fetcher and env-derived config.
    pub fn from_env() -> Result<Self> {
        let config = EngineConfig::from_env();
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);
        Ok(Self::new(config, fetcher))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch, extract, rank and persist rate offers for one request.
    ///
    /// `senior == None` means "do not filter": the primary extractor reads
    /// the general column and the fallback keeps both tiers. An `Ok` report
    /// with zero offers means both sources were reachable but matched
    /// nothing; transport or parse failure of the fallback is an `Err`.
    pub async fn fetch_rates(
        &self,
        amount: Option<f64>,
        senior: Option<bool>,
        tenure_days: Option<u32>,
        top_n: Option<usize>,
    ) -> Result<RateReport> {
        let limit = top_n.unwrap_or(self.config.top_providers);

        info!(
            ?amount,
            ?senior,
            ?tenure_days,
            limit,
            source = %self.config.source_name,
            "Fetching FD rates"
        );

        let primary_failure = match self.primary_offers(amount, senior, tenure_days).await {
            Ok(offers) if !offers.is_empty() => {
                let ranked = best_per_provider(&offers, limit);
                debug!(
                    extracted = offers.len(),
                    ranked = ranked.len(),
                    "Primary source served the request"
                );
                return self.finish(ranked, ServedBy::Primary);
            }
            Ok(_) => "no offers extracted from primary source".to_string(),
            Err(e) => e.to_string(),
        };

        warn!(
            source = %self.config.source_name,
            reason = %primary_failure,
            fallback = %self.config.fallback_source_name,
            "Primary source failed, trying fallback"
        );

        let mut offers = self.fallback_offers(amount).await?;
        if let Some(want_senior) = senior {
            offers.retain(|o| o.senior_citizen == want_senior);
        }
        let ranked = best_per_provider(&offers, limit);

        self.finish(ranked, ServedBy::Fallback { primary_failure })
    }

    async fn primary_offers(
        &self,
        amount: Option<f64>,
        senior: Option<bool>,
        tenure_days: Option<u32>,
    ) -> Result<Vec<RateOffer>> {
        let html = self.fetcher.fetch(&self.config.source_url).await?;
        Ok(extract::market_offers(
            &html,
            amount,
            senior,
            tenure_days,
            SourceInfo {
                name: &self.config.source_name,
                url: &self.config.source_url,
            },
        ))
    }

    async fn fallback_offers(&self, amount: Option<f64>) -> Result<Vec<RateOffer>> {
        let html = self.fetcher.fetch(&self.config.fallback_source_url).await?;
        Ok(extract::fallback_offers(
            &html,
            amount,
            SourceInfo {
                name: &self.config.fallback_source_name,
                url: &self.config.fallback_source_url,
            },
        ))
    }

    fn finish(&self, ranked: Vec<RateOffer>, served_by: ServedBy) -> Result<RateReport> {
        save_rates_csv(&self.config.csv_path, &ranked)?;

        let (source_name, source_url) = match served_by {
            ServedBy::Primary => (self.config.source_name.clone(), self.config.source_url.clone()),
            ServedBy::Fallback { .. } => (
                self.config.fallback_source_name.clone(),
                self.config.fallback_source_url.clone(),
            ),
        };

        info!(
            offers = ranked.len(),
            source = %source_name,
            snapshot = %self.config.csv_path.display(),
            "Rate report ready"
        );

        Ok(RateReport {
            offers: ranked,
            source_name,
            source_url,
            served_by,
        })
    }
}
