//! Build stamping
//!
//! Runs before a content build: every versioned group gets a manifest, each
//! manifest is re-stamped with the build time and the group's current assets,
//! and requirements for groups that no longer exist are pruned.

use crate::config::VersionDependenceConfig;
use crate::manifest_store::ManifestStore;
use crate::yaml_error;
use addressable_version_core::{AddressableError, ManifestRecord, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument};

/// A content group about to be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGroup {
    pub name: String,
    #[serde(default)]
    pub asset_guids: Vec<String>,
}

impl ContentGroup {
    pub fn new<S: Into<String>>(name: S, asset_guids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            asset_guids,
        }
    }
}

/// Load the list of content groups from a YAML file
pub fn load_groups<P: AsRef<Path>>(path: P) -> Result<Vec<ContentGroup>> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(yaml_error)
}

/// How a stamping pass treats the manifests
#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Time recorded in each full version
    pub built_at: DateTime<Utc>,
    /// Set every manifest's minimum host version to the configured app version
    pub refresh_minimum_host_version: bool,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            built_at: Utc::now(),
            refresh_minimum_host_version: false,
        }
    }
}

/// What a stamping pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampSummary {
    /// Groups that received a new manifest
    pub created: Vec<String>,
    /// Manifests re-stamped, new ones included
    pub stamped: Vec<ManifestRecord>,
    /// Dependency entries removed because their group is gone
    pub pruned: Vec<String>,
    /// Groups skipped by configuration
    pub ignored: Vec<String>,
}

/// Stamp every versioned group's manifest and prune stale requirements.
///
/// Every existing manifest is loaded before any file is written; if one of
/// them is unreadable the pass fails and the manifest directory is untouched.
/// The caller persists `config` if `pruned` is non-empty.
#[instrument(skip_all, fields(groups = groups.len()))]
pub fn stamp_groups(
    config: &mut VersionDependenceConfig,
    store: &ManifestStore,
    groups: &[ContentGroup],
    options: &StampOptions,
) -> Result<StampSummary> {
    config.validate()?;

    let mut summary = StampSummary::default();
    let mut failures = Vec::new();

    for group in groups {
        if config.is_ignored(&group.name) {
            summary.ignored.push(group.name.clone());
            continue;
        }

        let mut manifest = if store.contains(&group.name) {
            match store.load(&group.name) {
                Ok(manifest) => manifest,
                Err(err) => {
                    error!(group = %group.name, error = %err, "Manifest could not be loaded");
                    failures.push(format!("{}: {}", group.name, err));
                    continue;
                }
            }
        } else {
            info!(group = %group.name, "Creating manifest for group");
            summary.created.push(group.name.clone());
            ManifestRecord::new(
                group.name.as_str(),
                config.initial_manifest_version.as_str(),
                config.app_version.as_str(),
            )
        };

        manifest.name = group.name.clone();
        manifest.regenerate_full_version(options.built_at);
        manifest.set_assets(group.asset_guids.iter().cloned());
        if options.refresh_minimum_host_version {
            manifest.update_minimum_host_version(config.app_version.as_str());
        }
        summary.stamped.push(manifest);
    }

    if !failures.is_empty() {
        return Err(AddressableError::manifest(format!(
            "{} manifest(s) could not be loaded, nothing was stamped: {}",
            failures.len(),
            failures.join("; ")
        )));
    }

    for manifest in &summary.stamped {
        store.save(manifest)?;
    }

    let known = summary.stamped.iter().map(|m| m.name.as_str());
    summary.pruned = config.dependencies.prune_stale(known);

    info!(
        created = summary.created.len(),
        stamped = summary.stamped.len(),
        pruned = summary.pruned.len(),
        "Stamped manifests for build"
    );
    Ok(summary)
}
