use tracing::{debug, warn};

use crate::engine::core::column::format::{DType, FormatVersion, PayloadHeader};
use crate::engine::core::column::le_slice_reader::{LeSliceReader, SIZE_U32};
use crate::engine::core::column::null_bitmap::NullBitmap;
use crate::engine::errors::ColfError;
use crate::engine::schema::types::ColumnDescriptor;
use crate::engine::types::{Cell, Value};

/// Decodes one uncompressed payload into exactly `rows` cells.
///
/// `has_nulls` comes from the location table and is authoritative; the
/// payload's own dtype and has-nulls bytes are read past and only logged
/// when they disagree.
pub fn decode_column(
    payload: &[u8],
    desc: &ColumnDescriptor,
    rows: usize,
    has_nulls: bool,
    version: FormatVersion,
) -> Result<Vec<Cell>, ColfError> {
    let mut r = LeSliceReader::new(payload);
    let header = r
        .take(PayloadHeader::LEN)
        .and_then(PayloadHeader::read_from)
        .ok_or_else(|| corrupt(desc, "payload shorter than its header"))?;
    if header.dtype_tag != u8::from(desc.dtype) || (header.has_nulls != 0) != has_nulls {
        warn!(
            target: "colf::decoder",
            column = %desc.name,
            payload_tag = header.dtype_tag,
            payload_has_nulls = header.has_nulls,
            "payload header disagrees with container metadata; using metadata"
        );
    }

    let bits = if has_nulls {
        Some(
            r.take(NullBitmap::byte_len(rows))
                .ok_or_else(|| corrupt(desc, "null bitmap truncated"))?,
        )
    } else {
        None
    };
    let nulls = NullBitmap::new(bits);

    match desc.dtype {
        DType::Int32 => decode_fixed(&mut r, desc, rows, &nulls, |r| {
            r.read_i32().map(|v| Cell::Value(Value::Int32(v)))
        }),
        DType::Float64 => decode_fixed(&mut r, desc, rows, &nulls, |r| {
            r.read_f64().map(|v| Cell::Value(Value::Float64(v)))
        }),
        DType::Utf8 => match version {
            FormatVersion::V1 => decode_utf8_start_offsets(&mut r, desc, rows, &nulls),
            FormatVersion::V2 => decode_utf8_cumulative(&mut r, desc, rows, &nulls),
        },
    }
}

fn decode_fixed<F>(
    r: &mut LeSliceReader<'_>,
    desc: &ColumnDescriptor,
    rows: usize,
    nulls: &NullBitmap<'_>,
    read_one: F,
) -> Result<Vec<Cell>, ColfError>
where
    F: Fn(&mut LeSliceReader<'_>) -> Option<Cell>,
{
    let width = desc.dtype.fixed_width().unwrap_or(SIZE_U32);
    let needed = rows
        .checked_mul(width)
        .ok_or_else(|| corrupt(desc, &format!("{rows} rows overflow the payload size")))?;
    if !r.has_bytes(needed) {
        return Err(corrupt(
            desc,
            &format!("{} data shorter than {rows} rows", desc.dtype),
        ));
    }

    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let cell = read_one(r)
            .ok_or_else(|| corrupt(desc, &format!("{} data ends at row {i}", desc.dtype)))?;
        out.push(if nulls.is_null(i) { Cell::Null } else { cell });
    }
    Ok(out)
}

fn read_offsets(
    r: &mut LeSliceReader<'_>,
    desc: &ColumnDescriptor,
    count: usize,
) -> Result<Vec<usize>, ColfError> {
    if !count
        .checked_mul(SIZE_U32)
        .is_some_and(|needed| r.has_bytes(needed))
    {
        return Err(corrupt(desc, "offsets array truncated"));
    }
    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        let off = r
            .read_u32()
            .ok_or_else(|| corrupt(desc, "offsets array truncated"))?;
        offsets.push(off as usize);
    }
    Ok(offsets)
}

/// Legacy layout: one start offset per row, null rows all point at 0.
///
/// The end of a non-null row's span is the start of the next row that the
/// bitmap marks non-null and whose offset differs, else the buffer end. Null
/// rows never bound a span even though their offset is 0, which is also a
/// legitimate start for the first string.
fn decode_utf8_start_offsets(
    r: &mut LeSliceReader<'_>,
    desc: &ColumnDescriptor,
    rows: usize,
    nulls: &NullBitmap<'_>,
) -> Result<Vec<Cell>, ColfError> {
    let offsets = read_offsets(r, desc, rows)?;
    let buffer = r.rest();

    // Walk backwards carrying (offset, end) of the nearest later non-null row.
    // If that row shares our offset, its end is ours too.
    let mut ends = vec![buffer.len(); rows];
    let mut next: Option<(usize, usize)> = None;
    for i in (0..rows).rev() {
        if nulls.is_null(i) {
            continue;
        }
        let end = match next {
            Some((off, _)) if off != offsets[i] => off,
            Some((_, end)) => end,
            None => buffer.len(),
        };
        ends[i] = end;
        next = Some((offsets[i], end));
    }

    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        if nulls.is_null(i) {
            out.push(Cell::Null);
            continue;
        }
        out.push(string_cell(desc, i, buffer, offsets[i], ends[i])?);
    }
    Ok(out)
}

/// `rows + 1` monotonic offsets; row i spans `offsets[i]..offsets[i + 1]`.
fn decode_utf8_cumulative(
    r: &mut LeSliceReader<'_>,
    desc: &ColumnDescriptor,
    rows: usize,
    nulls: &NullBitmap<'_>,
) -> Result<Vec<Cell>, ColfError> {
    if rows == 0 {
        return Ok(Vec::new());
    }
    let count = rows
        .checked_add(1)
        .ok_or_else(|| corrupt(desc, "offsets array truncated"))?;
    let offsets = read_offsets(r, desc, count)?;
    let buffer = r.rest();

    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        if nulls.is_null(i) {
            out.push(Cell::Null);
            continue;
        }
        out.push(string_cell(desc, i, buffer, offsets[i], offsets[i + 1])?);
    }
    Ok(out)
}

fn string_cell(
    desc: &ColumnDescriptor,
    row: usize,
    buffer: &[u8],
    start: usize,
    end: usize,
) -> Result<Cell, ColfError> {
    let span = buffer.get(start..end).ok_or_else(|| {
        corrupt(
            desc,
            &format!("row {row} span {start}..{end} outside buffer of {} bytes", buffer.len()),
        )
    })?;
    match String::from_utf8(span.to_vec()) {
        Ok(s) => Ok(Cell::Value(Value::Utf8(s))),
        Err(e) => {
            debug!(target: "colf::decoder", column = %desc.name, row, "invalid UTF-8, keeping raw bytes");
            Ok(Cell::Value(Value::Bytes(e.into_bytes())))
        }
    }
}

fn corrupt(desc: &ColumnDescriptor, what: &str) -> ColfError {
    ColfError::CorruptPayload(format!("column '{}': {}", desc.name, what))
}
