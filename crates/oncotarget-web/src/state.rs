//! Shared application state for the web server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use oncotarget_common::{Config, EnrichmentSnapshot, ReferenceData, ResolutionStatus, SeedTarget};
use oncotarget_enrich::EnrichmentPipeline;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::info;

use crate::templates::Templates;

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// An enrichment run began
    EnrichmentStarted { targets: usize },
    /// One target finished enrichment
    TargetEnriched { name: String, status: ResolutionStatus, index: usize, total: usize },
    /// A new snapshot was published
    EnrichmentCompleted { found: usize, not_found: usize, unavailable: usize },
}

impl AppEvent {
    /// SSE event name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::EnrichmentStarted { .. } => "enrichment_started",
            AppEvent::TargetEnriched { .. } => "target_enriched",
            AppEvent::EnrichmentCompleted { .. } => "enrichment_completed",
        }
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub pipeline: EnrichmentPipeline,
    pub seeds: Vec<SeedTarget>,
    pub templates: Templates,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
    snapshot: RwLock<Option<Arc<EnrichmentSnapshot>>>,
    running: AtomicBool,
}

impl AppState {
    pub fn new(pipeline: EnrichmentPipeline, seeds: Vec<SeedTarget>) -> oncotarget_common::Result<Self> {
        let (event_tx, _) = broadcast::channel(256);
        Ok(Self {
            pipeline,
            seeds,
            templates: Templates::new()?,
            event_tx,
            snapshot: RwLock::new(None),
            running: AtomicBool::new(false),
        })
    }

    /// State with the UniProt-backed pipeline and reference data named in `config`.
    pub fn from_config(config: &Config) -> oncotarget_common::Result<Self> {
        let reference = ReferenceData::load(config.reference.path.as_deref())?;
        let pipeline = EnrichmentPipeline::from_config(config, &reference)?;
        Self::new(pipeline, reference.targets)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// The latest published snapshot, if any run has completed.
    pub async fn snapshot(&self) -> Option<Arc<EnrichmentSnapshot>> {
        self.snapshot.read().await.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run enrichment in the background. Returns false if a run is already in progress.
    pub fn spawn_enrichment(self: &Arc<Self>) -> bool {
        if !self.try_claim() {
            return false;
        }
        let state = Arc::clone(self);
        tokio::spawn(async move { state.run_claimed().await });
        true
    }

    /// Run enrichment to completion. Returns false if a run is already in progress.
    pub async fn run_enrichment(&self) -> bool {
        if !self.try_claim() {
            return false;
        }
        self.run_claimed().await;
        true
    }

    fn try_claim(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    async fn run_claimed(&self) {
        let guard = RunningGuard(&self.running);
        let total = self.seeds.len();
        // No subscribers is fine
        let _ = self.event_tx.send(AppEvent::EnrichmentStarted { targets: total });

        let mut index = 0;
        let snapshot = self
            .pipeline
            .enrich_snapshot_with_progress(&self.seeds, |t| {
                let _ = self.event_tx.send(AppEvent::TargetEnriched {
                    name: t.name.clone(),
                    status: t.uniprot_status,
                    index,
                    total,
                });
                index += 1;
            })
            .await;

        let event = AppEvent::EnrichmentCompleted {
            found: snapshot.found,
            not_found: snapshot.not_found,
            unavailable: snapshot.unavailable,
        };
        info!("Publishing snapshot of {} targets", snapshot.targets.len());

        *self.snapshot.write().await = Some(Arc::new(snapshot));
        // Subscribers may start another run as soon as they see the completion event
        drop(guard);
        let _ = self.event_tx.send(event);
    }
}

/// Clears the single-run flag when a run ends, including by panic or abort.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oncotarget_enrich::{IdentifierResolver, Resolution};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Finds EGFR; panics on the first lookup of "CRASH" when `fail_once` is set.
    struct FlakyResolver {
        fail_once: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentifierResolver for FlakyResolver {
        async fn resolve_identifier(&self, target_name: &str) -> Resolution {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_once && target_name == "CRASH" && n == 0 {
                panic!("resolver blew up");
            }
            if target_name == "EGFR" {
                Resolution::Found("P00533".to_string())
            } else {
                Resolution::NotFound
            }
        }
    }

    fn state_with(seeds: Vec<SeedTarget>, fail_once: bool) -> SharedState {
        let resolver = Arc::new(FlakyResolver { fail_once, calls: AtomicUsize::new(0) });
        let pipeline = EnrichmentPipeline::new(resolver, &ReferenceData::default()).with_concurrency(4);
        Arc::new(AppState::new(pipeline, seeds).unwrap())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawned_enrichment_publishes_snapshot() {
        let state = state_with(ReferenceData::default().targets, false);
        let mut rx = state.subscribe();

        assert!(state.spawn_enrichment());
        let completed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let AppEvent::EnrichmentCompleted { found, .. } = rx.recv().await.unwrap() {
                    return found;
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(completed, 1);
        assert!(!state.is_running());
        let snapshot = state.snapshot().await.unwrap();
        assert_eq!(snapshot.targets.len(), state.seeds.len());
        assert_eq!(snapshot.targets[0].name, state.seeds[0].name);
    }

    #[tokio::test]
    async fn test_second_claim_is_rejected_while_running() {
        let state = state_with(vec![SeedTarget::new("EGFR", 25)], false);
        assert!(state.try_claim());
        assert!(!state.run_enrichment().await);
        state.running.store(false, Ordering::SeqCst);
        assert!(state.run_enrichment().await);
    }

    #[tokio::test]
    async fn test_panicking_run_releases_flag() {
        let state = state_with(vec![SeedTarget::new("CRASH", 1), SeedTarget::new("EGFR", 25)], true);

        let task = {
            let state = Arc::clone(&state);
            tokio::spawn(async move { state.run_enrichment().await })
        };
        assert!(task.await.unwrap_err().is_panic());
        assert!(!state.is_running());
        assert!(state.snapshot().await.is_none());

        // The next run goes through
        assert!(state.run_enrichment().await);
        assert_eq!(state.snapshot().await.unwrap().found, 1);
    }
}
