//! SBOM builder integration tests over real on-disk trees

use std::fs;
use std::path::Path;

use aegis_core::error::SbomError;
use aegis_core::types::Ecosystem;
use aegis_sbom::SbomBuilder;

fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A package.json with a single runtime dependency produces the documented
/// component shape (normalized version + purl).
#[test]
fn test_left_pad_manifest() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "package.json",
        r#"{"dependencies": {"left-pad": "^1.3.0"}}"#,
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();

    assert_eq!(components.len(), 1);
    assert_eq!(components[0].name, "left-pad");
    assert_eq!(components[0].version, "1.3.0");
    assert_eq!(components[0].ecosystem, Ecosystem::Npm);
    assert_eq!(
        components[0].purl.as_deref(),
        Some("pkg:npm/left-pad@1.3.0")
    );
}

/// Pinned requirements lines survive inline comments.
#[test]
fn test_requirements_pin_with_comment() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "requirements.txt",
        "requests==2.25.1  # pinned for CVE\n",
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();

    assert_eq!(components.len(), 1);
    assert_eq!(components[0].name, "requests");
    assert_eq!(components[0].version, "2.25.1");
    assert_eq!(components[0].ecosystem, Ecosystem::PyPi);
}

/// The same (name, version, ecosystem) triple appearing in several manifests
/// collapses to one entry, first occurrence kept.
#[test]
fn test_dedup_across_manifest_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "frontend/package.json",
        r#"{"dependencies": {"lodash": "^4.17.21"}}"#,
    );
    write_file(
        temp_dir.path(),
        "admin/package.json",
        r#"{"dependencies": {"lodash": "4.17.21", "axios": "^1.6.0"}}"#,
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();

    let lodash: Vec<_> = components.iter().filter(|c| c.name == "lodash").collect();
    assert_eq!(lodash.len(), 1, "duplicate triple must collapse to one");
    assert_eq!(lodash[0].version, "4.17.21");
    assert!(components.iter().any(|c| c.name == "axios"));
}

/// Different versions of the same package are distinct components.
#[test]
fn test_distinct_versions_not_deduplicated() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "a/package.json",
        r#"{"dependencies": {"react": "^17.0.2"}}"#,
    );
    write_file(
        temp_dir.path(),
        "b/package.json",
        r#"{"dependencies": {"react": "^18.2.0"}}"#,
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();
    let react: Vec<_> = components.iter().filter(|c| c.name == "react").collect();
    assert_eq!(react.len(), 2);
}

/// Mixed ecosystems in one tree both contribute components.
#[test]
fn test_mixed_ecosystem_tree() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "web/package.json",
        r#"{"dependencies": {"express": "~4.18.2"}}"#,
    );
    write_file(
        temp_dir.path(),
        "api/requirements.txt",
        "flask==2.3.2\npyyaml\n",
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();

    assert_eq!(components.len(), 3);
    assert!(
        components
            .iter()
            .any(|c| c.name == "express" && c.ecosystem == Ecosystem::Npm)
    );
    assert!(
        components
            .iter()
            .any(|c| c.name == "flask" && c.version == "2.3.2")
    );
    assert!(
        components
            .iter()
            .any(|c| c.name == "pyyaml" && c.version == "latest")
    );
}

/// A malformed manifest is skipped; other manifests still contribute.
#[test]
fn test_malformed_manifest_does_not_abort() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(temp_dir.path(), "bad/package.json", "{ not valid json");
    write_file(
        temp_dir.path(),
        "good/requirements.txt",
        "requests==2.25.1\n",
    );

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();

    assert_eq!(components.len(), 1);
    assert_eq!(components[0].name, "requests");
}

/// Trees without any manifest yield an empty list, not an error.
#[test]
fn test_manifest_free_tree_is_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(temp_dir.path(), "src/main.py", "print('hello')\n");

    let components = SbomBuilder::new().generate(temp_dir.path()).unwrap();
    assert!(components.is_empty());
}

/// Missing root directory is the fatal case.
#[test]
fn test_missing_root_is_error() {
    let err = SbomBuilder::new()
        .generate("/nonexistent/aegis/scan-root")
        .unwrap_err();
    assert!(matches!(err, SbomError::InvalidRoot { .. }));
}

/// A file path as root is rejected the same way.
#[test]
fn test_file_root_is_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("not-a-dir.txt");
    fs::write(&file_path, "x").unwrap();

    let err = SbomBuilder::new().generate(&file_path).unwrap_err();
    assert!(matches!(err, SbomError::InvalidRoot { .. }));
}

/// Repeated runs on an unchanged tree give identical output.
#[test]
fn test_generate_is_deterministic() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "a/package.json",
        r#"{"dependencies": {"a1": "1.0.0"}, "devDependencies": {"a2": "2.0.0"}}"#,
    );
    write_file(temp_dir.path(), "b/requirements.txt", "requests==2.25.1\n");

    let builder = SbomBuilder::new();
    let first = builder.generate(temp_dir.path()).unwrap();
    let second = builder.generate(temp_dir.path()).unwrap();
    assert_eq!(first, second);
}

/// Oversized manifests are skipped by the size guard.
#[test]
fn test_size_limit_skips_manifest() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_file(
        temp_dir.path(),
        "package.json",
        r#"{"dependencies": {"left-pad": "^1.3.0"}}"#,
    );

    let components = SbomBuilder::new()
        .with_max_manifest_bytes(8)
        .generate(temp_dir.path())
        .unwrap();
    assert!(components.is_empty());
}
