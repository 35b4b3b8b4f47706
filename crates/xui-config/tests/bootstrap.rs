//! Filesystem bootstrap tests against a temporary base directory.

use std::fs;
use std::path::Path;

use xui_config::{
    BootstrapError, Configuration, default_config, ensure_default_config, ensure_directories,
};

fn config_in(base: &Path) -> Configuration {
    let base = base.to_string_lossy().into_owned();
    Configuration::from_lookup(move |key| (key == "XUI_BASE_DIR").then(|| base.clone()))
}

#[test]
fn creates_install_and_logs_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    ensure_directories(&config).unwrap();

    assert!(dir.path().join("x-ui").is_dir());
    assert!(dir.path().join("x-ui/logs").is_dir());
}

#[test]
fn ensure_directories_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    ensure_directories(&config).unwrap();
    fs::write(config.logs_dir().join("error.log"), b"keep").unwrap();
    ensure_directories(&config).unwrap();

    assert_eq!(fs::read(config.logs_dir().join("error.log")).unwrap(), b"keep");
}

#[test]
fn writes_default_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    ensure_directories(&config).unwrap();

    assert!(ensure_default_config(&config).unwrap());
    assert_eq!(
        fs::read_to_string(config.config_path()).unwrap(),
        default_config()
    );

    assert!(!ensure_default_config(&config).unwrap());
}

#[test]
fn never_overwrites_user_edits() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    ensure_directories(&config).unwrap();

    let edited = br#"{"log":{"loglevel":"debug"}}"#;
    fs::write(config.config_path(), edited).unwrap();

    assert!(!ensure_default_config(&config).unwrap());
    assert!(!ensure_default_config(&config).unwrap());
    assert_eq!(fs::read(config.config_path()).unwrap(), edited);
}

#[test]
fn filesystem_error_names_path() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the install directory should go.
    let blocker = dir.path().join("x-ui");
    fs::write(&blocker, b"").unwrap();
    let config = config_in(dir.path());

    let err = ensure_directories(&config).unwrap_err();
    let BootstrapError::Filesystem { path, .. } = &err;
    assert!(path.starts_with(dir.path()));
    assert_eq!(err.kind(), "filesystem");
}
