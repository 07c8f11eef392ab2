//! Manifest sources
//!
//! Where the gate gets its manifests from. Discovery is the only async step in
//! a compatibility check; reconciliation itself is pure.

use addressable_version_core::{ManifestRecord, Result};
use addressable_version_yaml::manifest_store::{Discovery, manifest_paths, parse_manifest};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Async provider of discovered manifests
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Discover every manifest currently available.
    ///
    /// Manifests that exist but cannot be loaded are left out, so a required
    /// bundle behind them reconciles as missing.
    async fn discover(&self) -> Result<Vec<ManifestRecord>>;
}

/// Manifests kept in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    manifests: Vec<ManifestRecord>,
}

impl StaticSource {
    pub fn new(manifests: Vec<ManifestRecord>) -> Self {
        Self { manifests }
    }
}

#[async_trait]
impl ManifestSource for StaticSource {
    async fn discover(&self) -> Result<Vec<ManifestRecord>> {
        Ok(self.manifests.clone())
    }
}

/// Manifest YAML files in a directory, read with `tokio::fs`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ManifestSource for DirectorySource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn discover(&self) -> Result<Vec<ManifestRecord>> {
        if !fs::try_exists(&self.root).await? {
            info!("Manifest directory does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }

        let mut discovery = Discovery::default();
        for path in manifest_paths(files) {
            let loaded = match fs::read_to_string(&path).await {
                Ok(content) => parse_manifest(&content, &path),
                Err(err) => Err(err.into()),
            };
            discovery.record(path, loaded);
        }

        Ok(discovery.manifests)
    }
}
