//! Version dependence configuration
//!
//! One YAML document per project listing where manifests live, which groups
//! are skipped, the app version and the minimum bundle versions the app needs.

use crate::yaml_error;
use addressable_version_core::{
    AddressableError, DEFAULT_GROUPS_TO_IGNORE, DEFAULT_INITIAL_MANIFEST_VERSION,
    DEFAULT_MANIFEST_LOCATION, DependencyRequirements, Result, Version,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-wide addressable versioning settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionDependenceConfig {
    /// Directory of the manifest files, relative to the config file
    pub manifest_location: PathBuf,
    /// Groups that don't need a manifest
    pub groups_to_ignore: Vec<String>,
    /// Version of manifests created for new groups
    pub initial_manifest_version: String,
    /// Current host application version
    pub app_version: String,
    /// Minimum bundle versions the app requires
    pub dependencies: DependencyRequirements,
}

impl Default for VersionDependenceConfig {
    fn default() -> Self {
        Self {
            manifest_location: PathBuf::from(DEFAULT_MANIFEST_LOCATION),
            groups_to_ignore: DEFAULT_GROUPS_TO_IGNORE.iter().map(|g| g.to_string()).collect(),
            initial_manifest_version: DEFAULT_INITIAL_MANIFEST_VERSION.to_string(),
            app_version: String::new(),
            dependencies: DependencyRequirements::new(),
        }
    }
}

impl VersionDependenceConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            dependencies = config.dependencies.len(),
            "Loaded version dependence config"
        );
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(yaml_error)
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(yaml_error)
    }

    /// Write configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    /// Whether a content group is excluded from versioning
    pub fn is_ignored(&self, group: &str) -> bool {
        self.groups_to_ignore.iter().any(|g| g == group)
    }

    /// Resolve the manifest directory against the directory holding the config file
    pub fn manifest_dir(&self, config_dir: &Path) -> PathBuf {
        if self.manifest_location.is_absolute() {
            self.manifest_location.clone()
        } else {
            config_dir.join(&self.manifest_location)
        }
    }

    /// Check that every version in the configuration parses
    pub fn validate(&self) -> Result<()> {
        if self.app_version.is_empty() {
            return Err(AddressableError::config("app_version is not set"));
        }
        Version::parse(&self.app_version)?;
        Version::parse(&self.initial_manifest_version)?;

        for (bundle, version) in self.dependencies.iter() {
            Version::parse(version).map_err(|e| {
                AddressableError::config(format!("dependency '{}': {}", bundle, e))
            })?;
        }
        Ok(())
    }
}
