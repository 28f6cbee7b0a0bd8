//! Oncotarget Enrich - turns the curated seed list into display rows.
//!
//! For every target the pipeline:
//! 1. Resolves a UniProt accession via the UniProt search service
//! 2. Builds an RCSB structure link from the curated PDB id table
//! 3. Attaches the curated approved drug list

pub mod resolver;
pub mod uniprot;
pub mod structure;
pub mod drugs;
pub mod pipeline;

pub use drugs::ApprovedDrugTable;
pub use pipeline::EnrichmentPipeline;
pub use resolver::{IdentifierResolver, Resolution};
pub use structure::StructureLinkResolver;
pub use uniprot::UniprotClient;
