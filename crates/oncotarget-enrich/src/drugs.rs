//! Approved drug lookup.

use std::collections::HashMap;

use oncotarget_common::target::NO_APPROVED_DRUGS;

#[derive(Debug, Clone)]
pub struct ApprovedDrugTable {
    drugs: HashMap<String, Vec<String>>,
}

impl ApprovedDrugTable {
    pub fn new(drugs: HashMap<String, Vec<String>>) -> Self {
        Self { drugs }
    }

    /// The curated list in its original order, or `["No approved drugs"]`.
    pub fn approved_drugs(&self, target_name: &str) -> Vec<String> {
        self.drugs
            .get(target_name)
            .cloned()
            .unwrap_or_else(|| vec![NO_APPROVED_DRUGS.to_string()])
    }
}
