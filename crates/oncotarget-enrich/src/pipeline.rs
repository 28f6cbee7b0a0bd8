//! Orchestrator for target enrichment.

use std::sync::Arc;

use futures_util::{stream, StreamExt};
use oncotarget_common::target::LINK_PLACEHOLDER;
use oncotarget_common::{Config, EnrichedTarget, EnrichmentSnapshot, ReferenceData, SeedTarget};
use tracing::{debug, info, warn};

use crate::drugs::ApprovedDrugTable;
use crate::resolver::{IdentifierResolver, Resolution};
use crate::structure::StructureLinkResolver;
use crate::uniprot::UniprotClient;

const UNIPROT_PROFILE_URL: &str = "https://www.uniprot.org/uniprot";

pub struct EnrichmentPipeline {
    resolver: Arc<dyn IdentifierResolver>,
    structures: StructureLinkResolver,
    drugs: ApprovedDrugTable,
    profile_url: String,
    concurrency: usize,
}

impl EnrichmentPipeline {
    /// Pipeline over `reference` tables with the given resolver, one target at a time.
    pub fn new(resolver: Arc<dyn IdentifierResolver>, reference: &ReferenceData) -> Self {
        Self {
            resolver,
            structures: StructureLinkResolver::new(reference.structure_ids.clone()),
            drugs: ApprovedDrugTable::new(reference.approved_drugs.clone()),
            profile_url: UNIPROT_PROFILE_URL.to_string(),
            concurrency: 1,
        }
    }

    /// Pipeline backed by the UniProt client, with URLs and limits from config.
    pub fn from_config(config: &Config, reference: &ReferenceData) -> oncotarget_common::Result<Self> {
        let resolver = Arc::new(UniprotClient::from_config(&config.uniprot)?);
        Ok(Self::new(resolver, reference)
            .with_profile_url(config.uniprot.profile_url.clone())
            .with_structure_base_url(config.structure.base_url.clone())
            .with_concurrency(config.enrichment.concurrency))
    }

    pub fn with_profile_url(mut self, profile_url: impl Into<String>) -> Self {
        self.profile_url = profile_url.into();
        self
    }

    pub fn with_structure_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.structures = self.structures.with_base_url(base_url);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn structures(&self) -> &StructureLinkResolver {
        &self.structures
    }

    /// Enrich a single record. Never fails; misses become placeholders.
    pub async fn enrich_one(&self, seed: &SeedTarget) -> EnrichedTarget {
        let resolution = self.resolver.resolve_identifier(&seed.name).await;
        match &resolution {
            Resolution::Found(acc) => debug!(target_name = %seed.name, accession = %acc, "UniProt accession resolved"),
            Resolution::NotFound => debug!(target_name = %seed.name, "No UniProt match"),
            Resolution::TransientError(reason) => {
                warn!(target_name = %seed.name, "UniProt lookup unavailable: {}", reason)
            }
        }

        let uniprot_link = match resolution.accession() {
            Some(acc) => format!("{}/{}", self.profile_url.trim_end_matches('/'), acc),
            None => LINK_PLACEHOLDER.to_string(),
        };

        EnrichedTarget {
            name: seed.name.clone(),
            company_count: seed.company_count,
            uniprot_link,
            pdb_link: self.structures.resolve_structure_link(&seed.name),
            approved_drugs: self.drugs.approved_drugs(&seed.name),
            uniprot_accession: resolution.accession().map(str::to_string),
            uniprot_status: resolution.status(),
        }
    }

    /// Enrich every record, preserving input order.
    pub async fn enrich(&self, records: &[SeedTarget]) -> Vec<EnrichedTarget> {
        self.enrich_with_progress(records, |_| {}).await
    }

    /// Like [`enrich`](Self::enrich), calling `on_enriched` as each record completes (in order).
    pub async fn enrich_with_progress<F>(&self, records: &[SeedTarget], mut on_enriched: F) -> Vec<EnrichedTarget>
    where
        F: FnMut(&EnrichedTarget),
    {
        info!("Enriching {} targets (concurrency {})", records.len(), self.concurrency);

        // Futures are built up front so the stream holds no closure over `&SeedTarget`,
        // which keeps it `Send` inside `tokio::spawn`.
        let lookups: Vec<_> = records.iter().map(|seed| self.enrich_one(seed)).collect();

        stream::iter(lookups)
            .buffered(self.concurrency)
            .inspect(|target| on_enriched(target))
            .collect()
            .await
    }

    /// Enrich every record and wrap the result in a snapshot.
    pub async fn enrich_snapshot(&self, records: &[SeedTarget]) -> EnrichmentSnapshot {
        self.enrich_snapshot_with_progress(records, |_| {}).await
    }

    /// Like [`enrich_snapshot`](Self::enrich_snapshot), reporting each record as it completes.
    pub async fn enrich_snapshot_with_progress<F>(&self, records: &[SeedTarget], on_enriched: F) -> EnrichmentSnapshot
    where
        F: FnMut(&EnrichedTarget),
    {
        let targets = self.enrich_with_progress(records, on_enriched).await;
        let snapshot = EnrichmentSnapshot::from_targets(targets);
        info!(
            "Enrichment complete: {} found, {} not found, {} unavailable",
            snapshot.found, snapshot.not_found, snapshot.unavailable
        );
        snapshot
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oncotarget_common::ResolutionStatus;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Resolver answering from a fixed map; names it doesn't know are NotFound.
    struct FakeResolver {
        answers: HashMap<String, Resolution>,
        calls: AtomicUsize,
    }

    impl FakeResolver {
        fn new(answers: &[(&str, Resolution)]) -> Arc<Self> {
            Arc::new(Self {
                answers: answers.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl IdentifierResolver for FakeResolver {
        async fn resolve_identifier(&self, target_name: &str) -> Resolution {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers.get(target_name).cloned().unwrap_or(Resolution::NotFound)
        }
    }

    /// Resolver that answers later the earlier the name is in the alphabet.
    struct SlowFirstResolver;

    #[async_trait]
    impl IdentifierResolver for SlowFirstResolver {
        async fn resolve_identifier(&self, target_name: &str) -> Resolution {
            let delay = match target_name.chars().next() {
                Some('A') => 60,
                Some('B') => 30,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Resolution::Found(format!("ACC-{}", target_name))
        }
    }

    fn egfr_drugs() -> Vec<String> {
        vec![
            "Gefitinib (Iressa)".to_string(),
            "Erlotinib (Tarceva)".to_string(),
            "Osimertinib (Tagrisso)".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_egfr_scenario() {
        let resolver = FakeResolver::new(&[("EGFR", Resolution::Found("P00533".into()))]);
        let pipeline = EnrichmentPipeline::new(resolver, &ReferenceData::default());

        let t = pipeline.enrich_one(&SeedTarget::new("EGFR", 25)).await;
        assert_eq!(t.name, "EGFR");
        assert_eq!(t.company_count, 25);
        assert_eq!(t.uniprot_link, "https://www.uniprot.org/uniprot/P00533");
        assert!(t.pdb_link.ends_with("/structure/1M17"));
        assert_eq!(t.approved_drugs, egfr_drugs());
        assert_eq!(t.uniprot_accession.as_deref(), Some("P00533"));
        assert_eq!(t.uniprot_status, ResolutionStatus::Found);
    }

    #[tokio::test]
    async fn test_unknown_target_gets_placeholders_regardless_of_resolver() {
        for resolution in [
            Resolution::Found("Q00000".into()),
            Resolution::NotFound,
            Resolution::TransientError("HTTP 503".into()),
        ] {
            let resolver = FakeResolver::new(&[("ROS1", resolution.clone())]);
            let pipeline = EnrichmentPipeline::new(resolver, &ReferenceData::default());

            let t = pipeline.enrich_one(&SeedTarget::new("ROS1", 3)).await;
            assert_eq!(t.pdb_link, "#");
            assert_eq!(t.approved_drugs, vec!["No approved drugs".to_string()]);
            assert_eq!(t.uniprot_status, resolution.status());
        }
    }

    #[tokio::test]
    async fn test_misses_and_failures_become_hash_link() {
        let resolver = FakeResolver::new(&[
            ("HER2", Resolution::NotFound),
            ("JAK", Resolution::TransientError("timeout".into())),
        ]);
        let pipeline = EnrichmentPipeline::new(resolver, &ReferenceData::default());

        let out = pipeline
            .enrich(&[SeedTarget::new("HER2", 35), SeedTarget::new("JAK", 22)])
            .await;
        assert_eq!(out[0].uniprot_link, "#");
        assert_eq!(out[0].uniprot_status, ResolutionStatus::NotFound);
        assert_eq!(out[1].uniprot_link, "#");
        assert_eq!(out[1].uniprot_status, ResolutionStatus::Unavailable);
        // Other fields are unaffected by the failed lookup
        assert_eq!(out[1].pdb_link, "https://www.rcsb.org/structure/4OLI");
        assert_eq!(out[1].approved_drugs.len(), 3);
    }

    #[tokio::test]
    async fn test_full_seed_list_is_order_preserving() {
        let reference = ReferenceData::default();
        let resolver = FakeResolver::new(&[]);
        let pipeline = EnrichmentPipeline::new(resolver.clone(), &reference).with_concurrency(8);

        let out = pipeline.enrich(&reference.targets).await;
        assert_eq!(out.len(), reference.targets.len());
        for (seed, enriched) in reference.targets.iter().zip(&out) {
            assert_eq!(seed.name, enriched.name);
            assert_eq!(seed.company_count, enriched.company_count);
            assert_eq!(&enriched.approved_drugs, &reference.approved_drugs[&seed.name]);
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), reference.targets.len());
    }

    #[tokio::test]
    async fn test_concurrent_completion_order_does_not_reorder_output() {
        let seeds = vec![
            SeedTarget::new("ALK", 15),
            SeedTarget::new("BTK", 20),
            SeedTarget::new("CD20", 15),
        ];
        let pipeline = EnrichmentPipeline::new(Arc::new(SlowFirstResolver), &ReferenceData::default())
            .with_concurrency(3);

        let mut seen = Vec::new();
        let out = pipeline
            .enrich_with_progress(&seeds, |t| seen.push(t.name.clone()))
            .await;

        let names: Vec<_> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ALK", "BTK", "CD20"]);
        assert_eq!(seen, vec!["ALK", "BTK", "CD20"]);
        assert_eq!(out[0].uniprot_link, "https://www.uniprot.org/uniprot/ACC-ALK");
    }

    #[tokio::test]
    async fn test_snapshot_with_progress_reports_each_target() {
        let pipeline = EnrichmentPipeline::new(FakeResolver::new(&[]), &ReferenceData::default())
            .with_concurrency(2);
        let seeds = vec![SeedTarget::new("CD19", 18), SeedTarget::new("CD38", 12)];

        let mut seen = Vec::new();
        let snapshot = pipeline
            .enrich_snapshot_with_progress(&seeds, |t| seen.push(t.name.clone()))
            .await;
        assert_eq!(seen, vec!["CD19", "CD38"]);
        assert_eq!(snapshot.targets.len(), 2);
        assert_eq!(snapshot.not_found, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_enrichment_runs_on_spawned_task() {
        let pipeline = Arc::new(
            EnrichmentPipeline::new(Arc::new(SlowFirstResolver), &ReferenceData::default())
                .with_concurrency(4),
        );
        let seeds = ReferenceData::default().targets;
        let expected: Vec<String> = seeds.iter().map(|s| s.name.clone()).collect();

        let task = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.enrich(&seeds).await })
        };
        let out = task.await.unwrap();
        let names: Vec<String> = out.into_iter().map(|t| t.name).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let pipeline = EnrichmentPipeline::new(FakeResolver::new(&[]), &ReferenceData::default());
        assert!(pipeline.enrich(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_counts_outcomes() {
        let resolver = FakeResolver::new(&[
            ("KRAS", Resolution::Found("P01116".into())),
            ("MET", Resolution::TransientError("HTTP 500".into())),
        ]);
        let pipeline = EnrichmentPipeline::new(resolver, &ReferenceData::default());

        let snapshot = pipeline
            .enrich_snapshot(&[
                SeedTarget::new("KRAS", 12),
                SeedTarget::new("MET", 10),
                SeedTarget::new("FGFR", 10),
            ])
            .await;
        assert_eq!((snapshot.found, snapshot.not_found, snapshot.unavailable), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_urls() {
        let mut config = Config::default();
        config.structure.base_url = "https://pdbj.org/mine/summary".to_string();
        let pipeline = EnrichmentPipeline::from_config(&config, &ReferenceData::default()).unwrap();
        assert_eq!(
            pipeline.structures().resolve_structure_link("EGFR"),
            "https://pdbj.org/mine/summary/1M17"
        );
    }
}
