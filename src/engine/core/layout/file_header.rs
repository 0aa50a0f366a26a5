use std::io::{Read, Write};

use serde_json::{Value as JsonValue, json};

use crate::engine::core::column::le_slice_reader::SIZE_U32;
use crate::engine::core::layout::location_table::LocationTable;
use crate::engine::errors::ColfError;
use crate::engine::schema::metadata::{FileMetadata, SchemaCodec};
use crate::engine::schema::types::Schema;
use crate::shared::storage_header::{MAGIC, Preamble};

/// Everything in front of the column blocks: preamble, metadata block and
/// location table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub preamble: Preamble,
    pub metadata: FileMetadata,
    pub locations: LocationTable,
    schema_len: usize,
}

impl FileHeader {
    pub fn new(
        preamble: Preamble,
        metadata: FileMetadata,
        locations: LocationTable,
        schema_len: usize,
    ) -> Self {
        Self {
            preamble,
            metadata,
            locations,
            schema_len,
        }
    }

    /// Size of the metadata block plus the location table.
    pub fn header_size(schema_len: usize, columns: usize) -> usize {
        SIZE_U32 + schema_len + LocationTable::encoded_len(columns)
    }

    /// Absolute offset of the first column block.
    pub fn data_start(&self) -> u64 {
        (Preamble::LEN + Self::header_size(self.schema_len, self.metadata.schema.len())) as u64
    }

    pub fn schema(&self) -> &Schema {
        &self.metadata.schema
    }

    pub fn write_to<W: Write>(&self, mut w: W, schema_bytes: &[u8]) -> Result<(), ColfError> {
        let schema_len = u32::try_from(schema_bytes.len()).map_err(|_| {
            ColfError::MalformedInput(format!("schema block of {} bytes", schema_bytes.len()))
        })?;
        self.preamble.write_to(&mut w)?;
        w.write_all(&schema_len.to_le_bytes())?;
        w.write_all(schema_bytes)?;
        self.locations.write_to(&mut w)?;
        Ok(())
    }

    /// Parses preamble, metadata and location table from the start of `r`.
    pub fn read_from<R: Read>(r: &mut R, codec: &dyn SchemaCodec) -> Result<Self, ColfError> {
        let preamble = Preamble::read_from(&mut *r)?;

        let mut len_bytes = [0u8; SIZE_U32];
        r.read_exact(&mut len_bytes)
            .map_err(|e| ColfError::from_read(e, "metadata length"))?;
        let schema_len = u32::from_le_bytes(len_bytes) as usize;
        let schema_bytes = read_declared(r, schema_len as u64, "metadata block")?;
        let metadata = codec.decode(&schema_bytes)?;

        let columns = metadata.schema.len();
        let loc_bytes = read_declared(r, LocationTable::encoded_len(columns) as u64, "location table")?;
        let locations = LocationTable::parse(&loc_bytes, columns)?;

        Ok(Self {
            preamble,
            metadata,
            locations,
            schema_len,
        })
    }

    /// JSON summary of the header, used by `colf inspect`.
    pub fn describe(&self) -> JsonValue {
        let columns: Vec<JsonValue> = self
            .metadata
            .schema
            .columns()
            .iter()
            .zip(self.locations.entries())
            .map(|(c, loc)| {
                json!({
                    "name": c.name,
                    "type": c.dtype.name(),
                    "nullable": c.nullable,
                    "offset": loc.offset,
                    "comp_size": loc.comp_size,
                    "uncomp_size": loc.uncomp_size,
                    "has_nulls": loc.has_nulls,
                })
            })
            .collect();
        json!({
            "magic": String::from_utf8_lossy(&MAGIC),
            "version": self.preamble.version.as_u8(),
            "endianness": "little",
            "header_size": self.preamble.header_size,
            "compression": self.metadata.compression.name(),
            "num_rows": self.metadata.schema.num_rows(),
            "data_start": self.data_start(),
            "columns": columns,
        })
    }
}

/// Reads exactly `len` declared bytes, reporting a short read as `Truncated`.
/// Allocation grows with what is actually read, not with `len`.
pub fn read_declared<R: Read>(r: &mut R, len: u64, what: &str) -> Result<Vec<u8>, ColfError> {
    let mut buf = Vec::with_capacity(len.min(1 << 20) as usize);
    r.by_ref().take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(ColfError::Truncated(format!(
            "{} declares {} bytes but only {} remain",
            what,
            len,
            buf.len()
        )));
    }
    Ok(buf)
}
