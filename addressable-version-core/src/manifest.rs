//! Bundle manifest records

use crate::constants::{BUILD_STAMP_FORMAT, BUILD_STAMP_SEPARATOR};
use crate::error::VersionError;
use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version metadata shipped alongside one content bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Bundle identity, equal to the content group name.
    /// Left empty in a manifest file, it is taken from the file name.
    #[serde(default)]
    pub name: String,
    /// Declared bundle version
    pub version: String,
    /// Declared version plus the build stamp of the last content build.
    /// Informational only, never compared.
    #[serde(default)]
    pub full_version: String,
    /// Lowest host application version able to consume this bundle
    pub minimum_host_version: String,
    /// Assets registered to this bundle on the last content build
    #[serde(default)]
    pub asset_guids: Vec<String>,
}

impl ManifestRecord {
    /// Create a manifest with no build stamp and no registered assets
    pub fn new<N, V, H>(name: N, version: V, minimum_host_version: H) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        H: Into<String>,
    {
        let version = version.into();
        Self {
            name: name.into(),
            full_version: version.clone(),
            version,
            minimum_host_version: minimum_host_version.into(),
            asset_guids: Vec::new(),
        }
    }

    /// Bundle identity
    pub fn bundle_id(&self) -> &str {
        &self.name
    }

    /// Parse the declared version
    pub fn declared_version(&self) -> Result<Version, VersionError> {
        Version::parse(&self.version)
    }

    /// Parse the minimum host version
    pub fn minimum_host(&self) -> Result<Version, VersionError> {
        Version::parse(&self.minimum_host_version)
    }

    /// Regenerate the full version from the declared version and a build time
    pub fn regenerate_full_version(&mut self, built_at: DateTime<Utc>) {
        self.full_version = format!(
            "{}{}{}",
            self.version,
            BUILD_STAMP_SEPARATOR,
            built_at.format(BUILD_STAMP_FORMAT)
        );
    }

    /// Raise or lower the minimum host version to the given host version
    pub fn update_minimum_host_version<S: Into<String>>(&mut self, host_version: S) {
        self.minimum_host_version = host_version.into();
    }

    /// Replace the registered asset list
    pub fn set_assets<I, S>(&mut self, guids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_guids = guids.into_iter().map(Into::into).collect();
    }

    /// Whether an asset is registered to this bundle
    pub fn contains_asset(&self, guid: &str) -> bool {
        self.asset_guids.iter().any(|g| g == guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_manifest() {
        let manifest = ManifestRecord::new("Levels", "1.0.0", "2.1.0");
        assert_eq!(manifest.bundle_id(), "Levels");
        assert_eq!(manifest.full_version, "1.0.0");
        assert!(manifest.asset_guids.is_empty());
        assert_eq!(manifest.declared_version().unwrap().segments(), &[1, 0, 0]);
        assert_eq!(manifest.minimum_host().unwrap().segments(), &[2, 1, 0]);
    }

    #[test]
    fn test_regenerate_full_version() {
        let mut manifest = ManifestRecord::new("Levels", "1.0.3", "1.0.0");
        let built_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        manifest.regenerate_full_version(built_at);
        assert_eq!(manifest.full_version, "1.0.3+20240309140507");
    }

    #[test]
    fn test_assets() {
        let mut manifest = ManifestRecord::new("Levels", "1.0.0", "1.0.0");
        manifest.set_assets(["a1", "b2"]);
        assert!(manifest.contains_asset("b2"));
        assert!(!manifest.contains_asset("c3"));

        manifest.set_assets(Vec::<String>::new());
        assert!(!manifest.contains_asset("a1"));
    }
}
