// tests/config_test.rs
use std::env;
use std::fs;
use std::io::Write;

use kac::config::{load_config, Config};
use kac::KacError;
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};

/// Run `f` with the working directory set to `dir`, restoring it afterwards
fn in_dir<T>(dir: &TempDir, f: impl FnOnce() -> T) -> T {
    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = f();
    env::set_current_dir(previous).unwrap();
    result
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
changelog = "HISTORY.md"

[versions]
prerelease_token = "beta"
build_token = "ci"

[behavior]
allow_empty_release = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.changelog, "HISTORY.md");
    assert_eq!(config.versions.prerelease_token, "beta");
    assert_eq!(config.versions.build_token, "ci");
    assert!(config.behavior.allow_empty_release);
}

#[test]
fn test_explicit_file_with_bad_token() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[versions]\nprerelease_token = \"r c\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, KacError::Config(_)));
}

#[test]
#[serial]
fn test_project_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("kac.toml"), "changelog = \"CHANGES.md\"\n").unwrap();

    let config = in_dir(&dir, || load_config(None)).unwrap();
    assert_eq!(config.changelog, "CHANGES.md");
    assert_eq!(config.versions, Config::default().versions);
}

#[test]
#[serial]
fn test_broken_project_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("kac.toml"), "changelog = [\n").unwrap();

    let result = in_dir(&dir, || load_config(None));
    assert!(matches!(result, Err(KacError::Config(_))));
}
