//! Target records before and after enrichment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link placeholder used when no external record could be resolved.
pub const LINK_PLACEHOLDER: &str = "#";

/// Single drug entry used for targets missing from the approved drug table.
pub const NO_APPROVED_DRUGS: &str = "No approved drugs";

/// A curated target row as it appears in the seed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTarget {
    /// Target name, e.g. "PD-1/PD-L1". Unique key.
    pub name: String,
    /// Number of companies with active programmes against the target.
    #[serde(alias = "companies")]
    pub company_count: u32,
}

impl SeedTarget {
    pub fn new(name: impl Into<String>, company_count: u32) -> Self {
        Self { name: name.into(), company_count }
    }
}

/// How the identifier lookup for a target ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Found,
    NotFound,
    /// The search service could not be reached or answered garbage.
    Unavailable,
}

/// A target row with every display field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTarget {
    pub name: String,
    pub company_count: u32,
    /// UniProt entry URL, or `"#"`.
    pub uniprot_link: String,
    /// RCSB structure URL, or `"#"`.
    pub pdb_link: String,
    /// "Generic (Brand)" strings, or `["No approved drugs"]`.
    pub approved_drugs: Vec<String>,
    pub uniprot_accession: Option<String>,
    pub uniprot_status: ResolutionStatus,
}

impl EnrichedTarget {
    pub fn has_uniprot_link(&self) -> bool {
        self.uniprot_link != LINK_PLACEHOLDER
    }

    pub fn has_pdb_link(&self) -> bool {
        self.pdb_link != LINK_PLACEHOLDER
    }
}

/// The published result of one enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSnapshot {
    pub targets: Vec<EnrichedTarget>,
    pub completed_at: DateTime<Utc>,
    pub found: usize,
    pub not_found: usize,
    pub unavailable: usize,
}

impl EnrichmentSnapshot {
    /// Build a snapshot from an enriched list, tallying resolution outcomes.
    pub fn from_targets(targets: Vec<EnrichedTarget>) -> Self {
        let count = |status: ResolutionStatus| {
            targets.iter().filter(|t| t.uniprot_status == status).count()
        };
        let found = count(ResolutionStatus::Found);
        let not_found = count(ResolutionStatus::NotFound);
        let unavailable = count(ResolutionStatus::Unavailable);

        Self {
            targets,
            completed_at: Utc::now(),
            found,
            not_found,
            unavailable,
        }
    }
}
