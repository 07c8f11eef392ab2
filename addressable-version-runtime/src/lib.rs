//! Addressable Version Runtime
//!
//! Async side of addressable versioning: manifest discovery behind the
//! [`ManifestSource`] trait and the [`AddressableGate`] that coalesces
//! concurrent compatibility checks and refuses incompatible bundles.
//!
//! # Examples
//!
//! ```rust,no_run
//! use addressable_version_runtime::{AddressableGate, StaticSource};
//! use addressable_version_core::{DependencyRequirements, ManifestRecord};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut levels = ManifestRecord::new("Levels", "1.0.0", "1.0.0");
//!     levels.set_assets(["scene-guid"]);
//!
//!     let requirements: DependencyRequirements = [("Levels", "1.0.0")].into_iter().collect();
//!     let gate = AddressableGate::new(Arc::new(StaticSource::new(vec![levels])), requirements, "1.0.0");
//!
//!     let report = gate.check_available().await?;
//!     assert!(report.all_compatible());
//!     assert!(gate.is_asset_available("scene-guid").await);
//!     Ok(())
//! }
//! ```

pub mod gate;
pub mod source;

pub use gate::AddressableGate;
pub use source::{DirectorySource, ManifestSource, StaticSource};
