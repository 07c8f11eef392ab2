//! Per-bundle compatibility classification

use crate::error::VersionError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Compatibility of one expected bundle with the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CompatibilityStatus {
    /// No manifest was discovered for the bundle
    Missing,
    /// The bundle is older than the host requires
    BundleOlderThanRequired,
    /// The host is older than the bundle requires
    HostOlderThanRequired,
    /// Both minimum requirements are satisfied
    Compatible,
    /// A version involved could not be parsed or ordered
    Unverifiable(VersionError),
}

impl CompatibilityStatus {
    pub fn is_compatible(&self) -> bool {
        matches!(self, CompatibilityStatus::Compatible)
    }

    /// Whether the status comes from bad version data rather than a verdict
    pub fn is_error(&self) -> bool {
        matches!(self, CompatibilityStatus::Unverifiable(_))
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityStatus::Missing => write!(f, "missing"),
            CompatibilityStatus::BundleOlderThanRequired => write!(f, "bundle older than required"),
            CompatibilityStatus::HostOlderThanRequired => write!(f, "host older than required"),
            CompatibilityStatus::Compatible => write!(f, "compatible"),
            CompatibilityStatus::Unverifiable(err) => write!(f, "unverifiable: {}", err),
        }
    }
}

/// Result of one reconciliation pass, keyed by bundle id.
///
/// Only the reconciler builds reports, so a published report is always complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReconciliationReport {
    statuses: IndexMap<String, CompatibilityStatus>,
}

impl ReconciliationReport {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            statuses: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, bundle_id: &str, status: CompatibilityStatus) {
        self.statuses.insert(bundle_id.to_string(), status);
    }

    /// Status of a bundle, `None` if it was not expected
    pub fn status(&self, bundle_id: &str) -> Option<&CompatibilityStatus> {
        self.statuses.get(bundle_id)
    }

    /// Whether the bundle may be loaded
    pub fn is_compatible(&self, bundle_id: &str) -> bool {
        self.status(bundle_id)
            .is_some_and(CompatibilityStatus::is_compatible)
    }

    /// Whether every expected bundle may be loaded
    pub fn all_compatible(&self) -> bool {
        self.statuses.values().all(CompatibilityStatus::is_compatible)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompatibilityStatus)> {
        self.statuses.iter().map(|(id, status)| (id.as_str(), status))
    }

    /// Bundles whose status blocks loading
    pub fn blocked(&self) -> impl Iterator<Item = (&str, &CompatibilityStatus)> {
        self.iter().filter(|(_, status)| !status.is_compatible())
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
