//! Manifest files on disk
//!
//! Each bundle's manifest is a YAML file named after the bundle
//! (`Levels.yaml`) inside the manifest directory.

use crate::yaml_error;
use addressable_version_core::{AddressableError, ManifestRecord, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// File extension of newly written manifests
pub const MANIFEST_EXTENSION: &str = "yaml";

/// Outcome of scanning the manifest directory
#[derive(Debug, Default)]
pub struct Discovery {
    /// Manifests that loaded, sorted by file name
    pub manifests: Vec<ManifestRecord>,
    /// Manifest files that could not be read or parsed
    pub failures: Vec<(PathBuf, AddressableError)>,
}

impl Discovery {
    /// Record the outcome of loading the manifest at `path`
    pub fn record(&mut self, path: PathBuf, loaded: Result<ManifestRecord>) {
        match loaded {
            Ok(manifest) => {
                debug!(bundle = %manifest.name, "Manifest found");
                self.manifests.push(manifest);
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "Manifest could not be loaded");
                self.failures.push((path, err));
            }
        }
    }
}

/// Keep the manifest files among `files`, in file name order
pub fn manifest_paths<I: IntoIterator<Item = PathBuf>>(files: I) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| is_manifest_file(path))
        .collect();
    paths.sort();

    info!(count = paths.len(), "Found manifest locations");
    paths
}

/// Directory of manifest files
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
}

impl ManifestStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the manifest file for a bundle
    pub fn path_for(&self, bundle_id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", bundle_id, MANIFEST_EXTENSION))
    }

    /// Whether a manifest exists for a bundle
    pub fn contains(&self, bundle_id: &str) -> bool {
        self.path_for(bundle_id).is_file()
    }

    /// Load one manifest file, naming it after the file when the name is blank
    pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<ManifestRecord> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        parse_manifest(&content, path)
    }

    /// Load the manifest of a bundle
    pub fn load(&self, bundle_id: &str) -> Result<ManifestRecord> {
        Self::load_manifest(self.path_for(bundle_id))
    }

    /// Write a manifest to `<root>/<name>.yaml`, creating the directory if needed
    pub fn save(&self, manifest: &ManifestRecord) -> Result<PathBuf> {
        if manifest.name.is_empty() {
            return Err(AddressableError::manifest("cannot save a manifest without a name"));
        }

        fs::create_dir_all(&self.root)?;
        let path = self.path_for(&manifest.name);
        let content = serde_yaml::to_string(manifest).map_err(yaml_error)?;
        fs::write(&path, content)?;

        debug!(bundle = %manifest.name, path = %path.display(), "Saved manifest");
        Ok(path)
    }

    /// Load every manifest in the directory.
    ///
    /// Files that fail to load are collected as failures instead of aborting
    /// the scan. A missing directory yields an empty discovery.
    pub fn discover(&self) -> Result<Discovery> {
        let mut discovery = Discovery::default();

        if !self.root.is_dir() {
            info!(path = %self.root.display(), "Manifest directory does not exist");
            return Ok(discovery);
        }

        let files = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file());

        for path in manifest_paths(files) {
            let loaded = Self::load_manifest(&path);
            discovery.record(path, loaded);
        }

        Ok(discovery)
    }
}

/// Parse manifest YAML read from `path`
pub fn parse_manifest(content: &str, path: &Path) -> Result<ManifestRecord> {
    let mut manifest: ManifestRecord = serde_yaml::from_str(content)
        .map_err(|e| AddressableError::manifest(format!("{}: {}", path.display(), e)))?;

    if manifest.name.is_empty() {
        manifest.name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AddressableError::manifest(format!("{}: cannot derive bundle name", path.display()))
            })?;
    }

    Ok(manifest)
}

/// Whether a path has a manifest file extension
pub fn is_manifest_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
