//! Page fetching
//!
//! The engine talks to rate sources through the `PageFetcher` trait so the
//! orchestrator can be exercised without a network. `HttpFetcher` is the
//! real implementation; `StaticFetcher` serves canned pages in tests.

use crate::error::{RateEngineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Comparison sites reject obvious bot agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// One HTTP GET per call; retries are the caller's decision (the engine
/// makes none).
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher with a browser-like user agent and a hard
/// timeout; a timeout surfaces as an error the orchestrator treats like
/// any other source failure.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "Page fetched");
        Ok(body)
    }
}

/// In-memory fetcher for tests: registered URLs return their canned body,
/// anything else is a source failure. Records every requested URL.
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl Default for StaticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| RateEngineError::SourceUnavailable {
                source_name: url.to_string(),
                reason: "no page registered for URL".to_string(),
            })
    }
}
