use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use lz4_flex::block::{
    compress_prepend_size as lz4_compress, decompress_size_prepended as lz4_decompress,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZLIB_LEVEL: i32 = 6;
pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

// Declared sizes come from the file and are not trusted for allocation.
const MAX_PREALLOC: usize = 16 << 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgo {
    #[default]
    Zlib,
    Lz4,
    Zstd,
}

impl CompressionAlgo {
    pub const fn name(&self) -> &'static str {
        match self {
            CompressionAlgo::Zlib => "zlib",
            CompressionAlgo::Lz4 => "lz4",
            CompressionAlgo::Zstd => "zstd",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == CompressionAlgo::default()
    }

    pub const fn default_level(&self) -> i32 {
        match self {
            CompressionAlgo::Zlib => DEFAULT_ZLIB_LEVEL,
            CompressionAlgo::Lz4 => 0,
            CompressionAlgo::Zstd => DEFAULT_ZSTD_LEVEL,
        }
    }
}

impl fmt::Display for CompressionAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionAlgo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zlib" => Ok(CompressionAlgo::Zlib),
            "lz4" => Ok(CompressionAlgo::Lz4),
            "zstd" => Ok(CompressionAlgo::Zstd),
            other => Err(format!("unknown compression algorithm '{}'", other)),
        }
    }
}

/// Symmetric lossless block compression applied to each column payload.
/// Output must be deterministic for identical input and settings.
pub trait CompressionCodec {
    fn algo(&self) -> CompressionAlgo;
    fn compress(&self, input: &[u8]) -> io::Result<Vec<u8>>;
    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> io::Result<Vec<u8>>;
}

pub struct ZlibCodec {
    level: u32,
}

impl ZlibCodec {
    pub fn new(level: i32) -> Self {
        Self {
            level: level.clamp(0, 9) as u32,
        }
    }
}

impl Default for ZlibCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ZLIB_LEVEL)
    }
}

impl CompressionCodec for ZlibCodec {
    fn algo(&self) -> CompressionAlgo {
        CompressionAlgo::Zlib
    }

    fn compress(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        let mut enc = ZlibEncoder::new(
            Vec::with_capacity(input.len() / 2 + 16),
            Compression::new(self.level),
        );
        enc.write_all(input)?;
        enc.finish()
    }

    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(uncompressed_len.min(MAX_PREALLOC));
        ZlibDecoder::new(input)
            .take(output_limit(uncompressed_len))
            .read_to_end(&mut out)?;
        Ok(out)
    }
}

pub struct Lz4Codec;

impl CompressionCodec for Lz4Codec {
    fn algo(&self) -> CompressionAlgo {
        CompressionAlgo::Lz4
    }

    fn compress(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        Ok(lz4_compress(input))
    }

    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> io::Result<Vec<u8>> {
        let declared = input
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
            .ok_or_else(|| invalid("lz4 block shorter than its size prefix".to_string()))?;
        if declared as usize != uncompressed_len {
            return Err(invalid(format!(
                "lz4 size prefix {declared} does not match expected {uncompressed_len}"
            )));
        }
        lz4_decompress(input)
            .map_err(|e| invalid(format!("lz4 decompress: {e}")))
    }
}

pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ZSTD_LEVEL)
    }
}

impl CompressionCodec for ZstdCodec {
    fn algo(&self) -> CompressionAlgo {
        CompressionAlgo::Zstd
    }

    fn compress(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        zstd::encode_all(input, self.level)
    }

    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(uncompressed_len.min(MAX_PREALLOC));
        zstd::stream::read::Decoder::new(input)?
            .take(output_limit(uncompressed_len))
            .read_to_end(&mut out)?;
        Ok(out)
    }
}

// One byte past the expected size, so an over-long stream still shows up as a
// length mismatch without being inflated in full.
fn output_limit(uncompressed_len: usize) -> u64 {
    (uncompressed_len as u64).saturating_add(1)
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

pub fn codec_for(algo: CompressionAlgo, level: i32) -> Box<dyn CompressionCodec> {
    match algo {
        CompressionAlgo::Zlib => Box::new(ZlibCodec::new(level)),
        CompressionAlgo::Lz4 => Box::new(Lz4Codec),
        CompressionAlgo::Zstd => Box::new(ZstdCodec::new(level)),
    }
}
