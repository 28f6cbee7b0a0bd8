//! RCSB PDB structure links from the curated identifier table.

use std::collections::HashMap;

use oncotarget_common::target::LINK_PLACEHOLDER;

const RCSB_STRUCTURE_URL: &str = "https://www.rcsb.org/structure";

/// Maps target names to RCSB structure pages. No network access.
#[derive(Debug, Clone)]
pub struct StructureLinkResolver {
    ids: HashMap<String, String>,
    base_url: String,
}

impl StructureLinkResolver {
    pub fn new(ids: HashMap<String, String>) -> Self {
        Self { ids, base_url: RCSB_STRUCTURE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The curated PDB id for a target, if any.
    pub fn structure_id(&self, target_name: &str) -> Option<&str> {
        self.ids.get(target_name).map(String::as_str)
    }

    /// Structure page URL for a target, or `"#"` when no id is curated.
    pub fn resolve_structure_link(&self, target_name: &str) -> String {
        match self.structure_id(target_name) {
            Some(id) => format!("{}/{}", self.base_url.trim_end_matches('/'), id),
            None => LINK_PLACEHOLDER.to_string(),
        }
    }
}
