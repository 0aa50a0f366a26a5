use std::collections::HashSet;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::engine::core::column::compression::CompressionAlgo;
use crate::engine::errors::ColfError;
use crate::engine::schema::types::{ColumnDescriptor, Schema};

/// Everything carried by the metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub schema: Schema,
    pub compression: CompressionAlgo,
}

impl FileMetadata {
    pub fn new(schema: Schema, compression: CompressionAlgo) -> Self {
        Self {
            schema,
            compression,
        }
    }
}

/// Narrow boundary between the schema and its on-disk text encoding.
pub trait SchemaCodec {
    fn encode(&self, meta: &FileMetadata) -> Result<Vec<u8>, ColfError>;
    fn decode(&self, bytes: &[u8]) -> Result<FileMetadata, ColfError>;
}

#[derive(Serialize, Deserialize)]
struct SchemaDocument {
    num_rows: u64,
    columns: Vec<ColumnDescriptor>,
    #[serde(default, skip_serializing_if = "CompressionAlgo::is_default")]
    compression: CompressionAlgo,
}

/// Compact JSON: `{"num_rows":N,"columns":[{"name":..,"type":..,"nullable":..}]}`.
/// `compression` is only written for non-zlib files, so zlib files stay
/// readable by tools that predate the field. Strings are ASCII-only; anything
/// outside printable ASCII becomes a lowercase `\uXXXX` escape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaCodec;

impl SchemaCodec for JsonSchemaCodec {
    fn encode(&self, meta: &FileMetadata) -> Result<Vec<u8>, ColfError> {
        let doc = SchemaDocument {
            num_rows: meta.schema.num_rows() as u64,
            columns: meta.schema.columns().to_vec(),
            compression: meta.compression,
        };
        let mut buf = Vec::with_capacity(128);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
        doc.serialize(&mut ser)
            .map_err(|e| ColfError::MalformedInput(format!("schema serialization: {e}")))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<FileMetadata, ColfError> {
        let doc: SchemaDocument = serde_json::from_slice(bytes)
            .map_err(|e| ColfError::SchemaParse(format!("invalid schema JSON: {e}")))?;

        let mut seen = HashSet::with_capacity(doc.columns.len());
        if let Some(dup) = doc.columns.iter().find(|c| !seen.insert(c.name.as_str())) {
            return Err(ColfError::SchemaParse(format!(
                "duplicate column name '{}'",
                dup.name
            )));
        }
        let num_rows = usize::try_from(doc.num_rows)
            .map_err(|_| ColfError::SchemaParse(format!("row count {} too large", doc.num_rows)))?;
        let schema = Schema::new(num_rows, doc.columns)
            .map_err(|e| ColfError::SchemaParse(e.to_string()))?;
        Ok(FileMetadata::new(schema, doc.compression))
    }
}

/// Compact output with every non-ASCII char (and DEL) written as UTF-16
/// `\uXXXX` units.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
