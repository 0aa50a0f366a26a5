use crate::engine::core::column::compression::CompressionAlgo;
use crate::engine::core::column::format::FormatVersion;
use crate::engine::errors::ColfError;
use crate::shared::config::WriterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub compression: CompressionAlgo,
    pub compression_level: i32,
    pub format_version: FormatVersion,
}

impl Default for WriteOptions {
    fn default() -> Self {
        let compression = CompressionAlgo::default();
        Self {
            compression,
            compression_level: compression.default_level(),
            format_version: FormatVersion::default(),
        }
    }
}

impl WriteOptions {
    pub fn with_compression(mut self, compression: CompressionAlgo) -> Self {
        self.compression = compression;
        self.compression_level = compression.default_level();
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_format_version(mut self, version: FormatVersion) -> Self {
        self.format_version = version;
        self
    }
}

impl TryFrom<&WriterConfig> for WriteOptions {
    type Error = ColfError;

    fn try_from(cfg: &WriterConfig) -> Result<Self, Self::Error> {
        let format_version = FormatVersion::try_from(cfg.format_version).map_err(|v| {
            ColfError::UnsupportedFormat(format!("cannot write format version {}", v))
        })?;
        Ok(Self {
            compression: cfg.compression,
            compression_level: cfg
                .compression_level
                .unwrap_or_else(|| cfg.compression.default_level()),
            format_version,
        })
    }
}
