use std::path::{Path, PathBuf};

use crate::engine::core::column::compression::CompressionAlgo;
use crate::engine::core::column::format::FormatVersion;
use crate::engine::core::write::{ColfWriter, WriteOptions};
use crate::engine::types::RawTable;
use crate::test_helpers::factories::RawTableFactory;

/// Encodes a table into COLF bytes or a file with configurable options.
pub struct ColfFileFactory {
    table: RawTable,
    options: WriteOptions,
}

impl ColfFileFactory {
    pub fn new() -> Self {
        Self {
            table: RawTableFactory::new().sample().create(),
            options: WriteOptions::default(),
        }
    }

    pub fn with_table(mut self, table: RawTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_compression(mut self, algo: CompressionAlgo) -> Self {
        self.options = self.options.with_compression(algo);
        self
    }

    pub fn with_format_version(mut self, version: FormatVersion) -> Self {
        self.options = self.options.with_format_version(version);
        self
    }

    pub fn create(&self) -> Vec<u8> {
        ColfWriter::new(self.options)
            .encode_table(&self.table)
            .expect("factory table encodes")
    }

    pub fn create_at(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        ColfWriter::new(self.options)
            .write_path(&self.table, &path)
            .expect("factory table written");
        path
    }
}
