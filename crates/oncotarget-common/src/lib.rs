//! oncotarget-common — Shared types, errors, config and reference tables used across all Oncotarget crates.

pub mod error;
pub mod config;
pub mod reference;
pub mod sandbox;
pub mod target;

// Re-export commonly used types
pub use config::Config;
pub use error::{OncotargetError, Result};
pub use reference::ReferenceData;
pub use target::{EnrichedTarget, EnrichmentSnapshot, ResolutionStatus, SeedTarget};
