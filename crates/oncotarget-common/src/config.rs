//! Configuration loading for Oncotarget.
//! Reads oncotarget.toml from the current directory or path in ONCOTARGET_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::OncotargetError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub uniprot: UniprotConfig,
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_bind()       -> String { "127.0.0.1:3001".to_string() }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniprotConfig {
    /// Search endpoint, queried as `<search_url>?query=<name>&format=json`.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Entry page base; the accession is appended.
    #[serde(default = "default_profile_url")]
    pub profile_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_search_url()       -> String { "https://rest.uniprot.org/uniprotkb/search".to_string() }
fn default_profile_url()      -> String { "https://www.uniprot.org/uniprot".to_string() }
fn default_timeout_secs()     -> u64 { 10 }
fn default_max_retries()      -> u32 { 2 }
fn default_retry_backoff_ms() -> u64 { 500 }

impl Default for UniprotConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            profile_url: default_profile_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Structure page base; the PDB id is appended.
    #[serde(default = "default_rcsb_url")]
    pub base_url: String,
}

fn default_rcsb_url() -> String { "https://www.rcsb.org/structure".to_string() }

impl Default for StructureConfig {
    fn default() -> Self {
        Self { base_url: default_rcsb_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Targets resolved at once. 1 resolves strictly one after another.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_true")]
    pub enrich_on_startup: bool,
}

fn default_concurrency() -> usize { 4 }
fn default_true()        -> bool { true }

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { concurrency: default_concurrency(), enrich_on_startup: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// YAML or JSON file replacing the built-in tables.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load from ONCOTARGET_CONFIG or ./oncotarget.toml.
    pub fn load() -> crate::Result<Self> {
        let path = std::env::var("ONCOTARGET_CONFIG")
            .unwrap_or_else(|_| "oncotarget.toml".to_string());
        Self::from_file(Path::new(&path))
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(OncotargetError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No oncotarget.toml found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| OncotargetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.enrichment.concurrency == 0 {
            return Err(OncotargetError::Config("enrichment.concurrency must be at least 1".into()));
        }
        if self.uniprot.timeout_secs == 0 {
            return Err(OncotargetError::Config("uniprot.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}
