//! Manifest directory and build stamping against a real filesystem

use addressable_version_core::{CompatibilityStatus, ManifestRecord, reconcile};
use addressable_version_yaml::{
    ContentGroup, ManifestStore, StampOptions, VersionDependenceConfig, load_groups, stamp_groups,
};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

fn config(app_version: &str) -> VersionDependenceConfig {
    VersionDependenceConfig {
        app_version: app_version.to_string(),
        manifest_location: "manifests".into(),
        ..Default::default()
    }
}

#[test]
fn test_save_and_discover() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = ManifestStore::new(dir.path().join("manifests"));

    let mut levels = ManifestRecord::new("Levels", "1.0.0", "1.0.0");
    levels.set_assets(["guid-1", "guid-2"]);
    store.save(&levels)?;
    store.save(&ManifestRecord::new("Audio", "2.0.0", "1.0.0"))?;
    fs::write(store.root().join("Broken.yaml"), "version: [")?;
    fs::write(store.root().join("notes.txt"), "not a manifest")?;

    let discovery = store.discover()?;
    let names: Vec<_> = discovery.manifests.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Audio", "Levels"]);
    assert_eq!(discovery.manifests[1], levels);
    assert_eq!(discovery.failures.len(), 1);
    assert!(discovery.failures[0].0.ends_with("Broken.yaml"));
    Ok(())
}

#[test]
fn test_discover_missing_directory() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = ManifestStore::new(dir.path().join("nowhere"));
    let discovery = store.discover()?;
    assert!(discovery.manifests.is_empty());
    assert!(discovery.failures.is_empty());
    Ok(())
}

#[test]
fn test_broken_manifest_reconciles_as_missing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = ManifestStore::new(dir.path());
    store.save(&ManifestRecord::new("Levels", "1.0.0", "1.0.0"))?;
    fs::write(store.path_for("Audio"), "minimum_host_version: 1.0.0\n")?;

    let mut config = config("1.0.0");
    config.dependencies.set("Levels", "1.0.0");
    config.dependencies.set("Audio", "1.0.0");

    let discovery = store.discover()?;
    let report = reconcile(&discovery.manifests, &config.dependencies, &config.app_version);
    assert!(report.is_compatible("Levels"));
    assert_eq!(report.status("Audio"), Some(&CompatibilityStatus::Missing));
    Ok(())
}

#[test]
fn test_stamp_groups() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = config("2.1.0");
    let store = ManifestStore::new(config.manifest_dir(dir.path()));

    store.save(&ManifestRecord::new("Levels", "1.3.0", "1.0.0"))?;
    config.dependencies.set("Levels", "1.0.0");
    config.dependencies.set("Deleted", "1.0.0");

    let groups = vec![
        ContentGroup::new("Levels", vec!["l1".into(), "l2".into()]),
        ContentGroup::new("Audio", vec!["a1".into()]),
        ContentGroup::new("Default", vec!["d1".into()]),
    ];
    let options = StampOptions {
        built_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        refresh_minimum_host_version: false,
    };

    let summary = stamp_groups(&mut config, &store, &groups, &options)?;

    assert_eq!(summary.created, vec!["Audio".to_string()]);
    assert_eq!(summary.ignored, vec!["Default".to_string()]);
    assert_eq!(summary.pruned, vec!["Deleted".to_string()]);
    assert!(!config.dependencies.contains("Deleted"));
    assert!(!store.contains("Default"));

    let levels = store.load("Levels")?;
    assert_eq!(levels.version, "1.3.0");
    assert_eq!(levels.full_version, "1.3.0+20250102030405");
    assert_eq!(levels.minimum_host_version, "1.0.0");
    assert_eq!(levels.asset_guids, vec!["l1".to_string(), "l2".to_string()]);

    let audio = store.load("Audio")?;
    assert_eq!(audio.version, "0.0.1");
    assert_eq!(audio.minimum_host_version, "2.1.0");
    assert!(audio.contains_asset("a1"));
    Ok(())
}

#[test]
fn test_stamp_with_corrupt_manifest_writes_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = config("1.0.0");
    let store = ManifestStore::new(config.manifest_dir(dir.path()));
    config.dependencies.set("Deleted", "1.0.0");

    store.save(&ManifestRecord::new("Levels", "1.0.0", "1.0.0"))?;
    let levels_before = fs::read_to_string(store.path_for("Levels"))?;
    fs::write(store.path_for("Audio"), "version: [")?;

    let groups = vec![
        ContentGroup::new("Levels", vec!["l1".into()]),
        ContentGroup::new("Audio", vec!["a1".into()]),
        ContentGroup::new("Ui", vec!["u1".into()]),
    ];
    let err = stamp_groups(&mut config, &store, &groups, &StampOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Audio"));

    assert_eq!(fs::read_to_string(store.path_for("Levels"))?, levels_before);
    assert!(!store.contains("Ui"));
    assert!(config.dependencies.contains("Deleted"));
    Ok(())
}

#[test]
fn test_stamp_refreshes_minimum_host_version() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = config("3.0.0");
    let store = ManifestStore::new(dir.path());
    store.save(&ManifestRecord::new("Levels", "1.0.0", "1.0.0"))?;

    let options = StampOptions {
        refresh_minimum_host_version: true,
        ..Default::default()
    };
    stamp_groups(
        &mut config,
        &store,
        &[ContentGroup::new("Levels", Vec::new())],
        &options,
    )?;

    assert_eq!(store.load("Levels")?.minimum_host_version, "3.0.0");
    Ok(())
}

#[test]
fn test_stamp_requires_app_version() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = VersionDependenceConfig::default();
    let store = ManifestStore::new(dir.path());

    let result = stamp_groups(&mut config, &store, &[], &StampOptions::default());
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_config_file_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("versioning.yaml");

    let mut config = config("1.0.0");
    config.dependencies.set("Levels", "1.1.0");
    config.save(&path)?;

    let loaded = VersionDependenceConfig::load(&path)?;
    assert_eq!(loaded, config);

    let groups_path = dir.path().join("groups.yaml");
    fs::write(&groups_path, "- name: Levels\n  asset_guids: [x]\n")?;
    let groups = load_groups(&groups_path)?;
    assert_eq!(groups, vec![ContentGroup::new("Levels", vec!["x".into()])]);
    Ok(())
}
