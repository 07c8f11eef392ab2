//! Addressable Version Core
//!
//! Core types for versioned addressable content: version comparison, bundle
//! manifests, the host's dependency requirements and the reconciliation that
//! decides which bundles the host may load.
//!
//! # Examples
//!
//! ```rust
//! use addressable_version_core::{
//!     CompatibilityStatus, DependencyRequirements, ManifestRecord, reconcile,
//! };
//!
//! let manifests = vec![ManifestRecord::new("Levels", "1.2.0", "1.0.0")];
//! let requirements: DependencyRequirements =
//!     [("Levels", "1.0.0"), ("Audio", "1.0.0")].into_iter().collect();
//!
//! let report = reconcile(&manifests, &requirements, "1.0.0");
//! assert!(report.is_compatible("Levels"));
//! assert_eq!(report.status("Audio"), Some(&CompatibilityStatus::Missing));
//! ```

pub mod constants;
pub mod error;
pub mod manifest;
pub mod reconcile;
pub mod report;
pub mod requirements;
pub mod version;

// Re-export main types
pub use constants::*;
pub use error::{AddressableError, Result, VersionError};
pub use manifest::ManifestRecord;
pub use reconcile::{dedup_manifests, reconcile};
pub use report::{CompatibilityStatus, ReconciliationReport};
pub use requirements::DependencyRequirements;
pub use version::{Comparison, Version, compare_versions, is_older};
