//! Allowlisted HTTP client for outbound lookups.

use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::OncotargetError;

/// Default per-request timeout when the caller does not supply one.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An HTTP client that only allows requests to approved domains.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist and timeout.
    pub fn new() -> Result<Self, OncotargetError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new SandboxClient whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, OncotargetError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "rest.uniprot.org", // UniProt search
            "www.uniprot.org",  // UniProt entry pages
            "www.rcsb.org",     // PDB structure pages
            "data.rcsb.org",    // PDB data API
            "localhost",        // Local services
            "127.0.0.1",        // Localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("oncotarget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OncotargetError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Appends the host of `url` to the allowlist, if it has one.
    pub fn allow_url_host(&mut self, url: &str) -> Result<(), OncotargetError> {
        let parsed = Url::parse(url)
            .map_err(|e| OncotargetError::Config(format!("Invalid URL {}: {}", url, e)))?;
        match parsed.host_str() {
            Some(host) => {
                self.allow_domain(host);
                Ok(())
            }
            None => Err(OncotargetError::Config(format!("URL has no host: {}", url))),
        }
    }

    /// Validates if a URL is permitted under the current allowlist.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, OncotargetError> {
        if !self.is_allowed(url) {
            return Err(OncotargetError::SecurityError(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
