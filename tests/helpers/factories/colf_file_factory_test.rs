use tempfile::tempdir;

use crate::engine::core::column::compression::CompressionAlgo;
use crate::engine::core::column::format::FormatVersion;
use crate::shared::storage_header::MAGIC;
use crate::test_helpers::factory::Factory;

#[test]
fn creates_bytes_with_requested_version() {
    let bytes = Factory::colf_file()
        .with_compression(CompressionAlgo::Lz4)
        .with_format_version(FormatVersion::V2)
        .create();
    assert_eq!(&bytes[..4], &MAGIC);
    assert_eq!(bytes[4], 2);
}

#[test]
fn file_matches_in_memory_encoding() {
    let dir = tempdir().unwrap();
    let factory = Factory::colf_file();
    let path = factory.create_at(dir.path(), "sample.colf");
    assert_eq!(std::fs::read(path).unwrap(), factory.create());
}
