use crate::engine::core::column::format::{DType, FormatVersion, PayloadHeader};
use crate::engine::core::column::null_bitmap::{NullBitmap, NullBitmapBuilder};
use crate::engine::errors::ColfError;
use crate::engine::schema::inference::{parse_float64, parse_int32};
use crate::engine::schema::types::ColumnDescriptor;
use crate::engine::types::is_null_marker;

/// Uncompressed payload of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedColumn {
    pub payload: Vec<u8>,
    pub has_nulls: bool,
}

/// Encodes one column's raw text values into its payload:
/// `dtype tag | has-nulls | [null bitmap] | typed data`.
///
/// Nulls are recomputed here and must agree with the nullability committed
/// by inference; so must every numeric parse.
pub fn encode_column<S: AsRef<str>>(
    desc: &ColumnDescriptor,
    values: &[S],
    version: FormatVersion,
) -> Result<EncodedColumn, ColfError> {
    let rows = values.len();
    let mut nulls = NullBitmapBuilder::with_rows(rows);
    for (i, v) in values.iter().enumerate() {
        if is_null_marker(v.as_ref()) {
            nulls.set_null(i);
        }
    }
    let has_nulls = nulls.has_nulls();
    if has_nulls != desc.nullable {
        return Err(ColfError::InconsistentSchema(format!(
            "column '{}' declared nullable={} but its values have_nulls={}",
            desc.name, desc.nullable, has_nulls
        )));
    }

    let data_len = desc.dtype.fixed_width().map_or(rows * 4, |w| rows * w);
    let bitmap_len = if has_nulls { NullBitmap::byte_len(rows) } else { 0 };
    let mut buf = Vec::with_capacity(PayloadHeader::LEN + bitmap_len + data_len);
    PayloadHeader::new(desc.dtype, has_nulls).write_to(&mut buf);
    if has_nulls {
        buf.extend_from_slice(nulls.as_bytes());
    }

    let bitmap = nulls.view();
    match desc.dtype {
        DType::Int32 => {
            for (i, v) in values.iter().enumerate() {
                let n = if bitmap.is_null(i) {
                    0
                } else {
                    parse_int32(v.as_ref()).ok_or_else(|| mismatch(desc, i, v.as_ref()))?
                };
                buf.extend_from_slice(&n.to_le_bytes());
            }
        }
        DType::Float64 => {
            for (i, v) in values.iter().enumerate() {
                let n = if bitmap.is_null(i) {
                    0.0
                } else {
                    parse_float64(v.as_ref()).ok_or_else(|| mismatch(desc, i, v.as_ref()))?
                };
                buf.extend_from_slice(&n.to_le_bytes());
            }
        }
        DType::Utf8 => encode_utf8(desc, values, &bitmap, version, &mut buf)?,
    }

    Ok(EncodedColumn {
        payload: buf,
        has_nulls,
    })
}

/// v1 writes one start offset per row, with null rows pointing at 0. v2
/// writes `rows + 1` cumulative offsets where a null row spans zero bytes
/// (nothing at all for zero rows). Non-null strings are stored untrimmed.
fn encode_utf8<S: AsRef<str>>(
    desc: &ColumnDescriptor,
    values: &[S],
    bitmap: &NullBitmap<'_>,
    version: FormatVersion,
    buf: &mut Vec<u8>,
) -> Result<(), ColfError> {
    let mut offsets: Vec<u32> = Vec::with_capacity(values.len() + 1);
    let mut data: Vec<u8> = Vec::new();

    if version == FormatVersion::V2 && !values.is_empty() {
        offsets.push(0);
    }
    for (i, v) in values.iter().enumerate() {
        let is_null = bitmap.is_null(i);
        if version == FormatVersion::V1 {
            offsets.push(if is_null { 0 } else { offset_u32(desc, data.len())? });
        }
        if !is_null {
            data.extend_from_slice(v.as_ref().as_bytes());
        }
        if version == FormatVersion::V2 {
            offsets.push(offset_u32(desc, data.len())?);
        }
    }
    if version == FormatVersion::V1 {
        offset_u32(desc, data.len())?;
    }

    buf.reserve(offsets.len() * 4 + data.len());
    for off in offsets {
        buf.extend_from_slice(&off.to_le_bytes());
    }
    buf.extend_from_slice(&data);
    Ok(())
}

fn offset_u32(desc: &ColumnDescriptor, len: usize) -> Result<u32, ColfError> {
    u32::try_from(len).map_err(|_| {
        ColfError::MalformedInput(format!(
            "column '{}' string data exceeds {} bytes",
            desc.name,
            u32::MAX
        ))
    })
}

fn mismatch(desc: &ColumnDescriptor, row: usize, value: &str) -> ColfError {
    ColfError::InconsistentSchema(format!(
        "column '{}' row {}: '{}' is not a valid {}",
        desc.name, row, value, desc.dtype
    ))
}
