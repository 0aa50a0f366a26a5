use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, info};

use crate::engine::core::column::compression::{CompressionAlgo, CompressionCodec, codec_for};
use crate::engine::core::column::decoder::decode_column;
use crate::engine::core::column::format::FormatVersion;
use crate::engine::core::layout::file_header::read_declared;
use crate::engine::core::layout::{FileHeader, LocationTable};
use crate::engine::errors::ColfError;
use crate::engine::schema::metadata::JsonSchemaCodec;
use crate::engine::schema::types::Schema;
use crate::engine::types::{Cell, ColumnSet, Row};

/// Reads a COLF stream. The header is parsed once on open; column blocks are
/// only touched when a read asks for them.
#[derive(Debug)]
pub struct ColfReader<R> {
    inner: R,
    header: FileHeader,
}

impl ColfReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ColfError> {
        let file = File::open(path.as_ref())?;
        debug!(target: "colf::reader", path = %path.as_ref().display(), "opening COLF file");
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> ColfReader<R> {
    pub fn from_reader(mut inner: R) -> Result<Self, ColfError> {
        inner.seek(SeekFrom::Start(0))?;
        let header = FileHeader::read_from(&mut inner, &JsonSchemaCodec)?;
        debug!(
            target: "colf::reader",
            version = %header.preamble.version,
            rows = header.schema().num_rows(),
            columns = header.schema().len(),
            "parsed COLF header"
        );
        Ok(Self { inner, header })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn schema(&self) -> &Schema {
        self.header.schema()
    }

    pub fn locations(&self) -> &LocationTable {
        &self.header.locations
    }

    pub fn format_version(&self) -> FormatVersion {
        self.header.preamble.version
    }

    pub fn compression(&self) -> CompressionAlgo {
        self.header.metadata.compression
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Decodes every column, in schema order.
    pub fn read_column_values(&mut self) -> Result<Vec<Vec<Cell>>, ColfError> {
        let codec = self.codec();
        (0..self.schema().len())
            .map(|idx| self.load_column(idx, codec.as_ref()))
            .collect()
    }

    /// Materializes the whole table as rows. The row count comes from the
    /// schema, never from a decoded column.
    pub fn read_all(&mut self) -> Result<Vec<Row>, ColfError> {
        let columns = self.read_column_values()?;
        let schema = self.schema();
        let num_rows = schema.num_rows();

        let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let mut rows = Vec::with_capacity(num_rows);
        for _ in 0..num_rows {
            let mut row = Row::with_capacity(schema.len());
            for (desc, values) in schema.columns().iter().zip(iters.iter_mut()) {
                row.insert(desc.name.clone(), values.next().unwrap_or(Cell::Null));
            }
            rows.push(row);
        }
        info!(target: "colf::reader", rows = rows.len(), columns = schema.len(), "full read complete");
        Ok(rows)
    }

    /// Decodes only the named columns. Every name is resolved before any
    /// block is read, so an unknown name fails the call without I/O on the
    /// column region. Repeated names are returned once.
    pub fn read_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<ColumnSet, ColfError> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let idx = self
                .schema()
                .index_of(name)
                .ok_or_else(|| ColfError::UnknownColumn(name.to_string()))?;
            resolved.push((name, idx));
        }

        let codec = self.codec();
        let mut out = ColumnSet::with_capacity(resolved.len());
        for (name, idx) in resolved {
            if out.contains_key(name) {
                continue;
            }
            let values = self.load_column(idx, codec.as_ref())?;
            out.insert(name.to_string(), values);
        }
        info!(target: "colf::reader", requested = names.len(), decoded = out.len(), "selective read complete");
        Ok(out)
    }

    fn codec(&self) -> Box<dyn CompressionCodec> {
        let algo = self.compression();
        codec_for(algo, algo.default_level())
    }

    fn load_column(
        &mut self,
        idx: usize,
        codec: &dyn CompressionCodec,
    ) -> Result<Vec<Cell>, ColfError> {
        let num_rows = self.header.schema().num_rows();
        let version = self.format_version();
        let desc = self
            .header
            .schema()
            .column(idx)
            .ok_or_else(|| ColfError::UnknownColumn(format!("#{}", idx)))?;
        let meta = *self
            .header
            .locations
            .get(idx)
            .ok_or_else(|| {
                ColfError::Truncated(format!("no location entry for column '{}'", desc.name))
            })?;

        if meta.comp_size == 0 {
            debug!(target: "colf::reader", column = %desc.name, "empty block, all values null");
            return Ok(vec![Cell::Null; num_rows]);
        }

        self.inner.seek(SeekFrom::Start(meta.offset))?;
        let compressed = read_declared(
            &mut self.inner,
            meta.comp_size,
            &format!("block of column '{}'", desc.name),
        )?;
        let payload = codec
            .decompress(&compressed, meta.uncomp_size as usize)
            .map_err(|e| ColfError::Decompression {
                column: desc.name.clone(),
                offset: meta.offset,
                reason: e.to_string(),
            })?;
        if payload.len() as u64 != meta.uncomp_size {
            return Err(ColfError::Decompression {
                column: desc.name.clone(),
                offset: meta.offset,
                reason: format!(
                    "expected {} bytes, got {}",
                    meta.uncomp_size,
                    payload.len()
                ),
            });
        }

        debug!(
            target: "colf::reader",
            column = %desc.name,
            offset = meta.offset,
            comp = meta.comp_size,
            uncomp = meta.uncomp_size,
            "column block loaded"
        );
        decode_column(&payload, desc, num_rows, meta.has_nulls, version)
    }
}
