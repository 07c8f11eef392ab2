//! Reconciliation scenarios over realistic manifest sets

use addressable_version_core::{
    CompatibilityStatus, DependencyRequirements, ManifestRecord, VersionError, reconcile,
};

fn requirements(entries: &[(&str, &str)]) -> DependencyRequirements {
    entries.iter().copied().collect()
}

#[test]
fn test_partial_catalog() {
    let manifests = vec![
        ManifestRecord::new("Levels", "1.4.0", "2.0.0"),
        ManifestRecord::new("Audio", "0.9.0", "1.0.0"),
        ManifestRecord::new("Characters", "3.0.0b", "2.1.0"),
        ManifestRecord::new("Cinematics", "1.0.0", "2.0.0"),
    ];
    let requirements = requirements(&[
        ("Levels", "1.2.0"),
        ("Audio", "1.0.0"),
        ("Characters", "3.0.0a"),
        ("Ui", "1.0.0"),
    ]);

    let report = reconcile(&manifests, &requirements, "2.0.0");

    assert_eq!(report.len(), 4);
    assert_eq!(report.status("Levels"), Some(&CompatibilityStatus::Compatible));
    assert_eq!(
        report.status("Audio"),
        Some(&CompatibilityStatus::BundleOlderThanRequired)
    );
    assert_eq!(
        report.status("Characters"),
        Some(&CompatibilityStatus::HostOlderThanRequired)
    );
    assert_eq!(report.status("Ui"), Some(&CompatibilityStatus::Missing));
    // Discovered but not required
    assert_eq!(report.status("Cinematics"), None);
}

#[test]
fn test_malformed_host_version() {
    let manifests = vec![ManifestRecord::new("Levels", "1.0.0", "1.0.0")];
    let requirements = requirements(&[("Levels", "1.0.0"), ("Audio", "1.0.0")]);

    let report = reconcile(&manifests, &requirements, "1.0.x");

    assert!(matches!(
        report.status("Levels"),
        Some(CompatibilityStatus::Unverifiable(VersionError::Format { .. }))
    ));
    assert_eq!(report.status("Audio"), Some(&CompatibilityStatus::Missing));
}

#[test]
fn test_reconcile_is_idempotent() {
    let manifests = vec![
        ManifestRecord::new("A", "1.0.0", "1.0.0"),
        ManifestRecord::new("B", "2.0.0", "5.0.0"),
    ];
    let requirements = requirements(&[("A", "1.0.0"), ("B", "1.0.0"), ("C", "1.0.0")]);

    let first = reconcile(&manifests, &requirements, "1.0.0");
    let second = reconcile(&manifests, &requirements, "1.0.0");
    assert_eq!(first, second);
}

#[test]
fn test_full_version_is_not_compared() {
    let mut manifest = ManifestRecord::new("A", "1.0.0", "1.0.0");
    manifest.full_version = "0.0.1+20000101000000".to_string();

    let report = reconcile(&[manifest], &requirements(&[("A", "1.0.0")]), "1.0.0");
    assert!(report.is_compatible("A"));
}

#[test]
fn test_lettered_versions_compare_letters_first() {
    let manifests = vec![
        ManifestRecord::new("Levels", "1.0.0b", "1.0.0"),
        ManifestRecord::new("Audio", "3.0.0a", "1.0.0"),
    ];
    let requirements = requirements(&[("Levels", "2.0.0a"), ("Audio", "2.0.0b")]);

    let report = reconcile(&manifests, &requirements, "1.0.0");

    assert_eq!(report.status("Levels"), Some(&CompatibilityStatus::Compatible));
    assert_eq!(
        report.status("Audio"),
        Some(&CompatibilityStatus::BundleOlderThanRequired)
    );
}
