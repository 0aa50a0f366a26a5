use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::engine::core::column::compression::codec_for;
use crate::engine::core::column::encoder::encode_column;
use crate::engine::core::layout::{FileHeader, LocationTable};
use crate::engine::core::write::write_options::WriteOptions;
use crate::engine::errors::ColfError;
use crate::engine::schema::inference::infer_schema;
use crate::engine::schema::metadata::{FileMetadata, JsonSchemaCodec, SchemaCodec};
use crate::engine::types::RawTable;
use crate::shared::storage_header::Preamble;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows: usize,
    pub columns: usize,
    pub bytes: u64,
}

struct CompressedBlock {
    bytes: Vec<u8>,
    uncomp_size: u64,
    has_nulls: bool,
}

/// Turns a [`RawTable`] into one self-contained COLF byte stream.
pub struct ColfWriter {
    options: WriteOptions,
    schema_codec: JsonSchemaCodec,
}

impl ColfWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self {
            options,
            schema_codec: JsonSchemaCodec,
        }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn encode_table(&self, table: &RawTable) -> Result<Vec<u8>, ColfError> {
        let mut out = Vec::new();
        self.write_table(table, &mut out)?;
        Ok(out)
    }

    pub fn write_path(&self, table: &RawTable, path: &Path) -> Result<WriteSummary, ColfError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let summary = self.write_table(table, &mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        info!(target: "colf::writer", path = %path.display(), bytes = summary.bytes, "COLF file written");
        Ok(summary)
    }

    /// Infers the schema, encodes and compresses every column in schema
    /// order, then writes preamble, metadata, location table and blocks.
    pub fn write_table<W: Write>(
        &self,
        table: &RawTable,
        mut out: W,
    ) -> Result<WriteSummary, ColfError> {
        if table.num_columns() == 0 {
            return Err(ColfError::MalformedInput(
                "row source declares zero columns".into(),
            ));
        }

        let schema = infer_schema(table)?;
        let codec = codec_for(self.options.compression, self.options.compression_level);

        let mut blocks = Vec::with_capacity(schema.len());
        for (idx, desc) in schema.columns().iter().enumerate() {
            let values = table.column(idx);
            let encoded = encode_column(desc, &values, self.options.format_version)?;
            let compressed = codec.compress(&encoded.payload)?;
            debug!(
                target: "colf::writer",
                column = %desc.name,
                dtype = %desc.dtype,
                uncomp = encoded.payload.len(),
                comp = compressed.len(),
                "column encoded"
            );
            blocks.push(CompressedBlock {
                uncomp_size: encoded.payload.len() as u64,
                has_nulls: encoded.has_nulls,
                bytes: compressed,
            });
        }

        let rows = schema.num_rows();
        let columns = schema.len();
        let metadata = FileMetadata::new(schema, self.options.compression);
        let schema_bytes = self.schema_codec.encode(&metadata)?;

        let header_size = FileHeader::header_size(schema_bytes.len(), columns);
        let header_size_u32 = u32::try_from(header_size)
            .map_err(|_| ColfError::MalformedInput(format!("header of {} bytes", header_size)))?;
        let data_start = (Preamble::LEN + header_size) as u64;
        let locations = LocationTable::build(
            data_start,
            blocks
                .iter()
                .map(|b| (b.bytes.len() as u64, b.uncomp_size, b.has_nulls)),
        );
        let total = locations.data_end(data_start);

        let header = FileHeader::new(
            Preamble::new(self.options.format_version, header_size_u32),
            metadata,
            locations,
            schema_bytes.len(),
        );
        header.write_to(&mut out, &schema_bytes)?;
        for block in &blocks {
            out.write_all(&block.bytes)?;
        }

        info!(
            target: "colf::writer",
            rows,
            columns,
            bytes = total,
            compression = %self.options.compression,
            version = %self.options.format_version,
            "encoded table"
        );
        Ok(WriteSummary {
            rows,
            columns,
            bytes: total,
        })
    }
}

impl Default for ColfWriter {
    fn default() -> Self {
        Self::new(WriteOptions::default())
    }
}
