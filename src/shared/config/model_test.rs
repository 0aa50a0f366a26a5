use std::fs;

use tempfile::tempdir;

use crate::engine::core::column::compression::CompressionAlgo;
use crate::shared::config::load_settings;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let settings = load_settings(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(settings.logging.console_level, "warn");
    assert_eq!(settings.logging.file_level, "info");
    assert!(settings.logging.log_dir.is_none());
    assert_eq!(settings.writer.compression, CompressionAlgo::Zlib);
    assert_eq!(settings.writer.compression_level, None);
    assert_eq!(settings.writer.format_version, 1);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("colf.toml");
    fs::write(
        &path,
        r#"
[logging]
console_level = "debug"
log_dir = "/tmp/colf-logs"

[writer]
compression = "zstd"
compression_level = 9
format_version = 2
"#,
    )
    .unwrap();

    let settings = load_settings(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(settings.logging.console_level, "debug");
    assert_eq!(settings.logging.file_level, "info");
    assert_eq!(settings.logging.log_dir.as_deref(), Some("/tmp/colf-logs"));
    assert_eq!(settings.writer.compression, CompressionAlgo::Zstd);
    assert_eq!(settings.writer.compression_level, Some(9));
    assert_eq!(settings.writer.format_version, 2);
}

#[test]
fn unknown_compression_in_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[writer]\ncompression = \"brotli\"\n").unwrap();

    assert!(load_settings(Some(path.to_str().unwrap())).is_err());
}
