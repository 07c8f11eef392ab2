//! Compatibility gate
//!
//! Checks which addressable bundles the host may load and refuses the rest.
//! Concurrent checks are coalesced into one discovery + reconciliation whose
//! result every caller shares; the result is cached until [`AddressableGate::reset`].

use crate::source::{DirectorySource, ManifestSource};
use addressable_version_core::{
    AddressableError, DependencyRequirements, ManifestRecord, ReconciliationReport, Result,
    dedup_manifests, reconcile,
};
use addressable_version_yaml::VersionDependenceConfig;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

/// Manifests and the report computed from them, one manifest per bundle
#[derive(Debug)]
struct Snapshot {
    report: Arc<ReconciliationReport>,
    manifests: Vec<ManifestRecord>,
}

type CheckOutcome = std::result::Result<Arc<Snapshot>, Arc<AddressableError>>;
type SharedCheck = Shared<BoxFuture<'static, CheckOutcome>>;

enum Phase {
    Idle,
    Checking(SharedCheck),
    Ready(Arc<Snapshot>),
}

struct GateState {
    phase: Phase,
    /// Bumped on reset so checks started before it don't publish
    generation: u64,
}

/// Single-flight addressable compatibility gate
pub struct AddressableGate {
    source: Arc<dyn ManifestSource>,
    requirements: DependencyRequirements,
    host_version: String,
    state: Mutex<GateState>,
}

impl AddressableGate {
    pub fn new<S: Into<String>>(
        source: Arc<dyn ManifestSource>,
        requirements: DependencyRequirements,
        host_version: S,
    ) -> Self {
        Self {
            source,
            requirements,
            host_version: host_version.into(),
            state: Mutex::new(GateState {
                phase: Phase::Idle,
                generation: 0,
            }),
        }
    }

    /// Gate reading manifests from the configured manifest directory
    pub fn from_config(config: &VersionDependenceConfig, config_dir: &Path) -> Self {
        let source = DirectorySource::new(config.manifest_dir(config_dir));
        Self::new(
            Arc::new(source),
            config.dependencies.clone(),
            config.app_version.as_str(),
        )
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    /// Check which bundles are available, reusing a cached or in-flight check
    #[instrument(skip(self), fields(host_version = %self.host_version))]
    pub async fn check_available(&self) -> Result<Arc<ReconciliationReport>> {
        let (check, generation) = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            match &state.phase {
                Phase::Ready(snapshot) => return Ok(Arc::clone(&snapshot.report)),
                Phase::Checking(check) => (check.clone(), state.generation),
                Phase::Idle => {
                    info!("Checking addressables...");
                    let check = self.start_check();
                    state.phase = Phase::Checking(check.clone());
                    (check, state.generation)
                }
            }
        };

        let outcome = check.await;

        let mut state = self.state.lock().await;
        let current = state.generation == generation;
        match outcome {
            Ok(snapshot) => {
                if current && matches!(state.phase, Phase::Checking(_)) {
                    state.phase = Phase::Ready(Arc::clone(&snapshot));
                    info!("Cached addressables manifest state");
                }
                Ok(Arc::clone(&snapshot.report))
            }
            Err(err) => {
                if current && matches!(state.phase, Phase::Checking(_)) {
                    state.phase = Phase::Idle;
                }
                Err(AddressableError::Shared(err))
            }
        }
    }

    fn start_check(&self) -> SharedCheck {
        let source = Arc::clone(&self.source);
        let requirements = self.requirements.clone();
        let host_version = self.host_version.clone();

        let check: BoxFuture<'static, CheckOutcome> = Box::pin(async move {
            let manifests = match source.discover().await {
                Ok(manifests) => dedup_manifests(manifests),
                Err(err) => {
                    error!(error = %err, "Manifest discovery failed");
                    return Err(Arc::new(err));
                }
            };
            let report = reconcile(&manifests, &requirements, &host_version);
            Ok(Arc::new(Snapshot {
                report: Arc::new(report),
                manifests,
            }))
        });
        check.shared()
    }

    /// The cached report, if a check has completed since the last reset
    pub async fn cached_report(&self) -> Option<Arc<ReconciliationReport>> {
        match &self.state.lock().await.phase {
            Phase::Ready(snapshot) => Some(Arc::clone(&snapshot.report)),
            _ => None,
        }
    }

    /// Forget the cached report and manifests
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.phase = Phase::Idle;
        state.generation += 1;
    }

    /// Whether the bundle containing `asset_guid` may be loaded.
    ///
    /// False until a check has completed.
    pub async fn is_asset_available(&self, asset_guid: &str) -> bool {
        match self.ensure_loadable(asset_guid).await {
            Ok(()) => true,
            Err(err) => {
                error!(asset = asset_guid, error = %err, "Asset is not available");
                false
            }
        }
    }

    /// Succeed if the bundle containing `asset_guid` is compatible
    pub async fn ensure_loadable(&self, asset_guid: &str) -> Result<()> {
        let state = self.state.lock().await;
        let Phase::Ready(snapshot) = &state.phase else {
            return Err(AddressableError::not_ready(
                "addressables have not been scanned yet",
            ));
        };

        let Some(manifest) = snapshot
            .manifests
            .iter()
            .find(|m| m.contains_asset(asset_guid))
        else {
            return Err(AddressableError::manifest(format!(
                "no manifest found for asset {}",
                asset_guid
            )));
        };

        match snapshot.report.status(&manifest.name) {
            Some(status) if status.is_compatible() => Ok(()),
            Some(status) => Err(AddressableError::blocked(
                manifest.name.as_str(),
                status.to_string(),
            )),
            None => {
                warn!(bundle = %manifest.name, "Bundle has no dependency entry");
                Err(AddressableError::blocked(
                    manifest.name.as_str(),
                    "not required by the host",
                ))
            }
        }
    }
}
