//! Addressable Versioning
//!
//! Versioned addressable bundles for Unity projects: every bundle ships a
//! manifest declaring its version and the minimum host version it needs, and
//! the host checks those manifests against its own requirements before it
//! loads anything.
//!
//! # Examples
//!
//! ```rust
//! use addressable_versioning::{Comparison, compare_versions};
//!
//! assert_eq!(compare_versions("1.2.3", "1.10.0")?, Comparison::Less);
//! assert_eq!(compare_versions("1.2.3b", "1.2.3a")?, Comparison::Greater);
//! assert_eq!(compare_versions("1.2.3", "1.2")?, Comparison::Incomparable);
//! # Ok::<(), addressable_versioning::VersionError>(())
//! ```
//!
//! ## Checking a project
//!
//! ```rust,no_run
//! use addressable_versioning::{AddressableGate, VersionDependenceConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = VersionDependenceConfig::load("versioning.yaml")?;
//!     let gate = AddressableGate::from_config(&config, Path::new("."));
//!
//!     let report = gate.check_available().await?;
//!     for (bundle, status) in report.blocked() {
//!         println!("{} is blocked: {}", bundle, status);
//!     }
//!     Ok(())
//! }
//! ```

// Re-export from core crate
pub use addressable_version_core::{
    AddressableError, Comparison, CompatibilityStatus, DependencyRequirements, ManifestRecord,
    ReconciliationReport, Result, Version, VersionError, compare_versions, constants::*,
    dedup_manifests, is_older, reconcile,
};

// Re-export from YAML crate
pub use addressable_version_yaml::{
    ContentGroup, Discovery, ManifestStore, StampOptions, StampSummary, VersionDependenceConfig,
    load_groups, stamp_groups,
};

// Re-export from runtime crate
pub use addressable_version_runtime::{
    AddressableGate, DirectorySource, ManifestSource, StaticSource,
};
