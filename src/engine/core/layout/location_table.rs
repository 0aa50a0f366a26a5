use std::io::Write;

use serde::Serialize;

use crate::engine::core::column::le_slice_reader::{LeSliceReader, SIZE_U64};
use crate::engine::errors::ColfError;

/// Where one column's compressed block lives in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnBlockMeta {
    pub offset: u64,
    pub comp_size: u64,
    pub uncomp_size: u64,
    pub has_nulls: bool,
}

impl ColumnBlockMeta {
    pub const LEN: usize = SIZE_U64 * 3 + 1;

    pub fn end(&self) -> u64 {
        self.offset + self.comp_size
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.offset.to_le_bytes());
        buf.extend_from_slice(&self.comp_size.to_le_bytes());
        buf.extend_from_slice(&self.uncomp_size.to_le_bytes());
        buf.push(self.has_nulls as u8);
    }

    pub fn read_from(r: &mut LeSliceReader<'_>) -> Option<Self> {
        Some(Self {
            offset: r.read_u64()?,
            comp_size: r.read_u64()?,
            uncomp_size: r.read_u64()?,
            has_nulls: r.read_u8()? != 0,
        })
    }
}

/// Per-column block locations, positionally aligned with the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTable {
    entries: Vec<ColumnBlockMeta>,
}

impl LocationTable {
    pub fn encoded_len(columns: usize) -> usize {
        columns * ColumnBlockMeta::LEN
    }

    /// Lays blocks out back to back starting at `data_start`, in the given
    /// order: `offset[i] + comp_size[i] == offset[i + 1]`.
    pub fn build<I>(data_start: u64, blocks: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64, bool)>,
    {
        let mut cursor = data_start;
        let entries = blocks
            .into_iter()
            .map(|(comp_size, uncomp_size, has_nulls)| {
                let meta = ColumnBlockMeta {
                    offset: cursor,
                    comp_size,
                    uncomp_size,
                    has_nulls,
                };
                cursor += comp_size;
                meta
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<ColumnBlockMeta>) -> Self {
        Self { entries }
    }

    pub fn parse(bytes: &[u8], columns: usize) -> Result<Self, ColfError> {
        let mut r = LeSliceReader::new(bytes);
        let mut entries = Vec::with_capacity(columns);
        for idx in 0..columns {
            let meta = ColumnBlockMeta::read_from(&mut r).ok_or_else(|| {
                ColfError::Truncated(format!("location table ends before entry {}", idx))
            })?;
            entries.push(meta);
        }
        Ok(Self { entries })
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        let mut buf = Vec::with_capacity(Self::encoded_len(self.entries.len()));
        for e in &self.entries {
            e.write_to(&mut buf);
        }
        w.write_all(&buf)
    }

    pub fn get(&self, idx: usize) -> Option<&ColumnBlockMeta> {
        self.entries.get(idx)
    }

    pub fn entries(&self) -> &[ColumnBlockMeta] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the blocks start at `data_start` and tile the data region
    /// without gaps or overlap.
    pub fn is_contiguous(&self, data_start: u64) -> bool {
        let mut expected = data_start;
        for e in &self.entries {
            if e.offset != expected {
                return false;
            }
            expected = e.end();
        }
        true
    }

    /// Offset one past the last block.
    pub fn data_end(&self, data_start: u64) -> u64 {
        self.entries.last().map_or(data_start, ColumnBlockMeta::end)
    }
}
