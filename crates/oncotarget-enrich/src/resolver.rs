//! Identifier resolution seam.

use async_trait::async_trait;
use oncotarget_common::ResolutionStatus;

/// Outcome of looking a target name up in an identifier registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// First matching accession.
    Found(String),
    /// The registry answered and has no match.
    NotFound,
    /// The registry could not be asked or gave an unusable answer.
    TransientError(String),
}

impl Resolution {
    pub fn accession(&self) -> Option<&str> {
        match self {
            Resolution::Found(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Resolution::TransientError(_))
    }

    pub fn status(&self) -> ResolutionStatus {
        match self {
            Resolution::Found(_) => ResolutionStatus::Found,
            Resolution::NotFound => ResolutionStatus::NotFound,
            Resolution::TransientError(_) => ResolutionStatus::Unavailable,
        }
    }
}

/// Common interface for identifier registries.
#[async_trait]
pub trait IdentifierResolver: Send + Sync {
    /// Resolve a free-text target name to its primary accession.
    async fn resolve_identifier(&self, target_name: &str) -> Resolution;
}
