//! UniProt REST search client.
//!
//! Endpoint: https://rest.uniprot.org/uniprotkb/search
//!
//! Queried as `?query=<target name>&format=json`; the response carries a
//! `results` list whose first entry's `primaryAccession` is taken as the
//! target's accession.

use std::time::Duration;

use async_trait::async_trait;
use oncotarget_common::config::UniprotConfig;
use oncotarget_common::sandbox::SandboxClient as Client;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use crate::resolver::{IdentifierResolver, Resolution};

/// UniProt client with per-request timeout and bounded retry.
pub struct UniprotClient {
    client: Client,
    search_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl UniprotClient {
    /// Client against the public UniProt endpoint with default settings.
    pub fn new() -> oncotarget_common::Result<Self> {
        Self::from_config(&UniprotConfig::default())
    }

    pub fn from_config(config: &UniprotConfig) -> oncotarget_common::Result<Self> {
        let mut client = Client::with_timeout(Duration::from_secs(config.timeout_secs))?;
        client.allow_url_host(&config.search_url)?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// One search request, no retry.
    #[instrument(skip(self))]
    pub async fn search_once(&self, target_name: &str) -> Resolution {
        let request = match self.client.get(&self.search_url) {
            Ok(r) => r,
            Err(e) => return Resolution::TransientError(e.to_string()),
        };

        let resp = match request
            .query(&[("query", target_name), ("format", "json")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Resolution::TransientError(format!("request failed: {}", e)),
        };

        let status = resp.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "UniProt search returned non-success status");
            return classify_status(status);
        }

        let json: serde_json::Value = match resp.json().await {
            Ok(j) => j,
            Err(e) => return Resolution::TransientError(format!("malformed response body: {}", e)),
        };

        first_accession(&json)
    }
}

#[async_trait]
impl IdentifierResolver for UniprotClient {
    async fn resolve_identifier(&self, target_name: &str) -> Resolution {
        if target_name.trim().is_empty() {
            return Resolution::NotFound;
        }

        let mut attempt = 0;
        loop {
            let resolution = self.search_once(target_name).await;
            if !resolution.is_transient() || attempt >= self.max_retries {
                return resolution;
            }

            attempt += 1;
            warn!(
                target_name,
                attempt,
                max_retries = self.max_retries,
                "UniProt lookup failed transiently, retrying: {:?}",
                resolution
            );
            tokio::time::sleep(self.retry_backoff * attempt).await;
        }
    }
}

/// Non-success statuses: throttling, timeouts and server faults may clear up,
/// any other client error means the registry has nothing for us.
fn classify_status(status: StatusCode) -> Resolution {
    if status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
    {
        Resolution::TransientError(format!("HTTP {}", status.as_u16()))
    } else {
        Resolution::NotFound
    }
}

fn first_accession(json: &serde_json::Value) -> Resolution {
    let results = match json.get("results") {
        None => return Resolution::NotFound,
        Some(serde_json::Value::Array(results)) => results,
        Some(_) => return Resolution::TransientError("`results` is not a list".to_string()),
    };

    match results.first() {
        None => Resolution::NotFound,
        Some(hit) => match hit["primaryAccession"].as_str() {
            Some(acc) => Resolution::Found(acc.to_string()),
            None => Resolution::TransientError("first result has no primaryAccession".to_string()),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
