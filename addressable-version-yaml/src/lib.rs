//! Addressable Version YAML
//!
//! YAML persistence for addressable versioning: the project's version
//! dependence configuration, one manifest file per bundle, and the stamping
//! pass that refreshes manifests before a content build.
//!
//! # Examples
//!
//! ```rust,no_run
//! use addressable_version_yaml::{ManifestStore, VersionDependenceConfig};
//! use addressable_version_core::reconcile;
//!
//! let config = VersionDependenceConfig::load("versioning.yaml")?;
//! let store = ManifestStore::new(config.manifest_dir(std::path::Path::new(".")));
//! let discovery = store.discover()?;
//!
//! let report = reconcile(&discovery.manifests, &config.dependencies, &config.app_version);
//! println!("{} bundles checked", report.len());
//! # Ok::<(), addressable_version_core::AddressableError>(())
//! ```

// Re-export core types
pub use addressable_version_core::{AddressableError, ManifestRecord, Result};

pub mod config;
pub mod manifest_store;
pub mod stamp;

pub use config::VersionDependenceConfig;
pub use manifest_store::{Discovery, ManifestStore};
pub use stamp::{ContentGroup, StampOptions, StampSummary, load_groups, stamp_groups};

pub(crate) fn yaml_error(err: serde_yaml::Error) -> AddressableError {
    AddressableError::serialization(err.to_string())
}
