use cab_kernel::config::{ConfigError, load_config};
use cab_kernel::domain::Language;
use cab_kernel::domain::config::AppConfig;
use std::fs;

#[test]
fn file_values_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cabinet.toml");
    fs::write(
        &path,
        "[database]\nurl = \"file://./data\"\ncompression = true\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.database.url, "file://./data");
    assert!(cfg.database.compression);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.localization.language(), Language::Fr);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config::<AppConfig>(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
fn malformed_values_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cabinet.toml");
    fs::write(&path, "[database]\ncompression = \"sometimes\"\n").unwrap();

    let err = load_config::<AppConfig>(Some(&path)).unwrap_err();
    assert_eq!(err.kind(), "Config");
}
