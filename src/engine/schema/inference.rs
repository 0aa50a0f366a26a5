use tracing::debug;

use crate::engine::core::column::format::DType;
use crate::engine::errors::ColfError;
use crate::engine::schema::types::{ColumnDescriptor, Schema};
use crate::engine::types::{RawTable, is_null_marker};

/// Parses a trimmed base-10 integer that fits in 32 signed bits.
pub fn parse_int32(text: &str) -> Option<i32> {
    let t = text.trim();
    let digits = t.strip_prefix(['+', '-']).unwrap_or(t);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse::<i32>().ok()
}

/// Parses a trimmed ASCII decimal or scientific number. Named specials such
/// as `inf` or `nan` are not numbers here.
pub fn parse_float64(text: &str) -> Option<f64> {
    let t = text.trim();
    if !is_ascii_decimal(t) {
        return None;
    }
    t.parse::<f64>().ok()
}

fn is_ascii_decimal(t: &str) -> bool {
    let b = t.as_bytes();
    let mut i = 0;
    let skip_digits = |i: &mut usize| {
        let start = *i;
        while *i < b.len() && b[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let mut mantissa_digits = skip_digits(&mut i);
    if i < b.len() && b[i] == b'.' {
        i += 1;
        mantissa_digits += skip_digits(&mut i);
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        if skip_digits(&mut i) == 0 {
            return false;
        }
    }
    i == b.len()
}

/// Classifies one column from its raw text values.
///
/// The dtype starts at int32 and only widens (int32 -> float64 -> utf8).
/// Null markers make the column nullable and take no part in narrowing. A
/// column with no non-null value at all is utf8.
pub fn infer_column<S: AsRef<str>>(values: &[S]) -> (DType, bool) {
    let mut nullable = false;
    let mut seen_value = false;
    let mut dtype = DType::Int32;

    for v in values {
        let v = v.as_ref();
        if is_null_marker(v) {
            nullable = true;
            continue;
        }
        seen_value = true;
        if dtype == DType::Int32 && parse_int32(v).is_none() {
            dtype = DType::Float64;
        }
        if dtype == DType::Float64 && parse_float64(v).is_none() {
            dtype = DType::Utf8;
        }
    }

    if !seen_value {
        dtype = DType::Utf8;
    }
    (dtype, nullable)
}

/// Runs [`infer_column`] over every column of the table.
pub fn infer_schema(table: &RawTable) -> Result<Schema, ColfError> {
    let columns = table
        .header()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let (dtype, nullable) = infer_column(&table.column(idx));
            debug!(target: "colf::inference", column = %name, %dtype, nullable, "inferred column type");
            ColumnDescriptor::new(name.clone(), dtype, nullable)
        })
        .collect();
    Schema::new(table.num_rows(), columns)
}
