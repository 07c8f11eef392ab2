//! Manifest state reconciliation
//!
//! Folds the discovered manifests, the host's dependency requirements and the
//! host version into one [`ReconciliationReport`]. Pure: no I/O, no shared
//! state, identical inputs give identical reports.

use crate::error::VersionError;
use crate::manifest::ManifestRecord;
use crate::report::{CompatibilityStatus, ReconciliationReport};
use crate::requirements::DependencyRequirements;
use crate::version::is_older;
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

/// Classify every required bundle against the discovered manifests.
///
/// Found bundles are reported in discovery order, missing ones after them in
/// requirement order. Bad version data only affects its own bundle.
pub fn reconcile(
    manifests: &[ManifestRecord],
    requirements: &DependencyRequirements,
    host_version: &str,
) -> ReconciliationReport {
    let mut report = ReconciliationReport::with_capacity(requirements.len());
    let discovered = index_by_bundle(manifests);

    for (bundle_id, manifest) in &discovered {
        let Some(required) = requirements.required_version(bundle_id) else {
            debug!(bundle = *bundle_id, "Manifest has no requirement, skipping");
            continue;
        };

        let status = classify(manifest, required, host_version).unwrap_or_else(|err| {
            error!(bundle = *bundle_id, error = %err, "Could not verify bundle version");
            CompatibilityStatus::Unverifiable(err)
        });
        report.record(bundle_id, status);
    }

    for (bundle_id, _) in requirements.iter() {
        if !discovered.contains_key(bundle_id) {
            error!(bundle = bundle_id, "Manifest is missing");
            report.record(bundle_id, CompatibilityStatus::Missing);
        }
    }

    report
}

/// Drop manifests whose bundle id was already seen, keeping the first one.
///
/// This is the manifest set [`reconcile`] actually judges, so anything that
/// looks up bundles next to a report should use it too.
pub fn dedup_manifests(manifests: Vec<ManifestRecord>) -> Vec<ManifestRecord> {
    index_by_bundle(&manifests).into_values().cloned().collect()
}

fn index_by_bundle(manifests: &[ManifestRecord]) -> IndexMap<&str, &ManifestRecord> {
    let mut discovered: IndexMap<&str, &ManifestRecord> = IndexMap::with_capacity(manifests.len());
    for manifest in manifests {
        if discovered.contains_key(manifest.bundle_id()) {
            warn!(
                bundle = manifest.bundle_id(),
                "Duplicate manifest discovered, keeping the first one"
            );
            continue;
        }
        discovered.insert(manifest.bundle_id(), manifest);
    }
    discovered
}

fn classify(
    manifest: &ManifestRecord,
    required: &str,
    host_version: &str,
) -> Result<CompatibilityStatus, VersionError> {
    if is_older(&manifest.version, required)? {
        warn!(
            bundle = manifest.bundle_id(),
            version = %manifest.version,
            required,
            "Bundle version is older than required"
        );
        return Ok(CompatibilityStatus::BundleOlderThanRequired);
    }

    if is_older(host_version, &manifest.minimum_host_version)? {
        warn!(
            bundle = manifest.bundle_id(),
            host_version,
            minimum = %manifest.minimum_host_version,
            "Host version is older than the bundle requires"
        );
        return Ok(CompatibilityStatus::HostOlderThanRequired);
    }

    info!(bundle = manifest.bundle_id(), "Bundle is compatible with the host");
    Ok(CompatibilityStatus::Compatible)
}
