//! Curated reference tables: seed targets, approved drugs and PDB identifiers.
//!
//! The built-in tables cover the top 20 oncology/immunology targets. Users can
//! replace them with a YAML or JSON file via `[reference] path` in config.
//! The PDB identifiers are illustrative picks, not a curated best structure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Complete reference data for one enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Targets to display, in display order.
    #[serde(default = "default_targets")]
    pub targets: Vec<crate::target::SeedTarget>,

    /// Target name → "Generic (Brand)" strings.
    #[serde(default = "default_approved_drugs")]
    pub approved_drugs: HashMap<String, Vec<String>>,

    /// Target name → PDB identifier.
    #[serde(default = "default_structure_ids")]
    pub structure_ids: HashMap<String, String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            approved_drugs: default_approved_drugs(),
            structure_ids: default_structure_ids(),
        }
    }
}

// ── Built-in tables ───────────────────────────────────────────────────────────

const SEED_TARGETS: &[(&str, u32)] = &[
    ("PD-1/PD-L1", 45),
    ("HER2", 35),
    ("TNF-alpha", 30),
    ("VEGF/VEGFR", 28),
    ("IL-6", 25),
    ("JAK", 22),
    ("BTK", 20),
    ("PARP", 18),
    ("CD20", 15),
    ("CTLA-4", 12),
    ("EGFR", 25),
    ("ALK", 15),
    ("BCMA", 10),
    ("CD19", 18),
    ("CD38", 12),
    ("CDK4/6", 15),
    ("FGFR", 10),
    ("IDH1/IDH2", 8),
    ("KRAS", 12),
    ("MET", 10),
];

const APPROVED_DRUGS: &[(&str, &[&str])] = &[
    ("PD-1/PD-L1", &["Pembrolizumab (Keytruda)", "Nivolumab (Opdivo)", "Atezolizumab (Tecentriq)"]),
    ("HER2", &["Trastuzumab (Herceptin)", "Pertuzumab (Perjeta)", "Ado-trastuzumab emtansine (Kadcyla)"]),
    ("TNF-alpha", &["Adalimumab (Humira)", "Infliximab (Remicade)", "Etanercept (Enbrel)"]),
    ("VEGF/VEGFR", &["Bevacizumab (Avastin)", "Ramucirumab (Cyramza)", "Aflibercept (Eylea)"]),
    ("IL-6", &["Tocilizumab (Actemra)", "Sarilumab (Kevzara)"]),
    ("JAK", &["Tofacitinib (Xeljanz)", "Baricitinib (Olumiant)", "Upadacitinib (Rinvoq)"]),
    ("BTK", &["Ibrutinib (Imbruvica)", "Acalabrutinib (Calquence)", "Zanubrutinib (Brukinsa)"]),
    ("PARP", &["Olaparib (Lynparza)", "Niraparib (Zejula)", "Rucaparib (Rubraca)"]),
    ("CD20", &["Rituximab (Rituxan)", "Obinutuzumab (Gazyva)", "Ofatumumab (Arzerra)"]),
    ("CTLA-4", &["Ipilimumab (Yervoy)"]),
    ("EGFR", &["Gefitinib (Iressa)", "Erlotinib (Tarceva)", "Osimertinib (Tagrisso)"]),
    ("ALK", &["Crizotinib (Xalkori)", "Alectinib (Alecensa)", "Ceritinib (Zykadia)"]),
    ("BCMA", &["Belantamab mafodotin (Blenrep)"]),
    ("CD19", &["Tisagenlecleucel (Kymriah)", "Lisocabtagene maraleucel (Breyanzi)"]),
    ("CD38", &["Daratumumab (Darzalex)", "Isatuximab (Sarclisa)"]),
    ("CDK4/6", &["Palbociclib (Ibrance)", "Ribociclib (Kisqali)", "Abemaciclib (Verzenio)"]),
    ("FGFR", &["Erdafitinib (Balversa)"]),
    ("IDH1/IDH2", &["Ivosidenib (Tibsovo)", "Enasidenib (Idhifa)"]),
    ("KRAS", &["Sotorasib (Lumakras)"]),
    ("MET", &["Capmatinib (Tabrecta)", "Tepotinib (Tepmetko)"]),
];

const STRUCTURE_IDS: &[(&str, &str)] = &[
    ("PD-1/PD-L1", "5J89"),
    ("HER2", "3PP0"),
    ("TNF-alpha", "2AZ5"),
    ("VEGF/VEGFR", "1Y6A"),
    ("IL-6", "1ALU"),
    ("JAK", "4OLI"),
    ("BTK", "5P9J"),
    ("PARP", "5DS3"),
    ("CD20", "7C01"),
    ("CTLA-4", "1I85"),
    ("EGFR", "1M17"),
    ("ALK", "2XP2"),
    ("BCMA", "5TJE"),
    ("CD19", "6AL5"),
    ("CD38", "6O8P"),
    ("CDK4/6", "2W9Z"),
    ("FGFR", "1EVT"),
    ("IDH1/IDH2", "3INM"),
    ("KRAS", "4OBE"),
    ("MET", "3DKC"),
];

fn default_targets() -> Vec<crate::target::SeedTarget> {
    SEED_TARGETS
        .iter()
        .map(|(name, companies)| crate::target::SeedTarget::new(*name, *companies))
        .collect()
}

fn default_approved_drugs() -> HashMap<String, Vec<String>> {
    APPROVED_DRUGS
        .iter()
        .map(|(name, drugs)| {
            (name.to_string(), drugs.iter().map(|d| d.to_string()).collect())
        })
        .collect()
}

fn default_structure_ids() -> HashMap<String, String> {
    STRUCTURE_IDS
        .iter()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect()
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ReferenceData {
    /// Load from YAML file. Omitted sections fall back to the built-in tables.
    pub fn from_yaml(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let data: Self = serde_yaml::from_str(&content)?;
        Ok(data)
    }

    /// Load from JSON file. Omitted sections fall back to the built-in tables.
    pub fn from_json(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let data: Self = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Load by file extension: `.json` is JSON, anything else YAML.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(path)?,
            _ => Self::from_yaml(path)?,
        };
        tracing::info!(
            "Reference data loaded from {}: {} targets, {} drug entries, {} structure ids",
            path.display(),
            data.targets.len(),
            data.approved_drugs.len(),
            data.structure_ids.len()
        );
        Ok(data)
    }

    /// Load from `path` if given, otherwise the built-in tables.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
