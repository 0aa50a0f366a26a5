use std::io::{Read, Write};

use crate::engine::core::column::format::FormatVersion;
use crate::engine::errors::ColfError;

pub const MAGIC: [u8; 4] = *b"COLF";
pub const ENDIAN_LITTLE: u8 = 1;

/// Fixed-size file preamble: `magic(4) | version(1) | endianness(1) | header_size(4)`.
///
/// `header_size` covers the metadata block and location table. It is
/// informational; readers locate everything from the declared lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    pub version: FormatVersion,
    pub endianness: u8,
    pub header_size: u32,
}

impl Preamble {
    pub const LEN: usize = 4 + 1 + 1 + 4;

    pub fn new(version: FormatVersion, header_size: u32) -> Self {
        Self {
            version,
            endianness: ENDIAN_LITTLE,
            header_size,
        }
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version.as_u8(), self.endianness])?;
        w.write_all(&self.header_size.to_le_bytes())?;
        Ok(())
    }

    /// Validates magic, version and endianness. Anything unexpected is
    /// `UnsupportedFormat`; there is no best-effort fallback.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self, ColfError> {
        let mut raw = [0u8; Self::LEN];
        r.read_exact(&mut raw)
            .map_err(|e| ColfError::from_read(e, "preamble"))?;

        if raw[..4] != MAGIC {
            return Err(ColfError::UnsupportedFormat(format!(
                "bad magic: expected {:?}, got {:?}",
                String::from_utf8_lossy(&MAGIC),
                String::from_utf8_lossy(&raw[..4])
            )));
        }
        let version = FormatVersion::try_from(raw[4])
            .map_err(|v| ColfError::UnsupportedFormat(format!("unsupported version {}", v)))?;
        let endianness = raw[5];
        if endianness != ENDIAN_LITTLE {
            return Err(ColfError::UnsupportedFormat(format!(
                "unsupported endianness tag {}",
                endianness
            )));
        }
        let mut hs = [0u8; 4];
        hs.copy_from_slice(&raw[6..10]);

        Ok(Self {
            version,
            endianness,
            header_size: u32::from_le_bytes(hs),
        })
    }
}
