use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::engine::errors::ColfError;
use crate::engine::schema::types::Schema;
use crate::engine::types::{ColumnSet, RawTable, Row};

fn csv_err(err: csv::Error) -> ColfError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => ColfError::Io(io),
            other => ColfError::MalformedInput(format!("{:?}", other)),
        }
    } else {
        ColfError::MalformedInput(err.to_string())
    }
}

/// Reads a header row plus records into a [`RawTable`]. Short records are
/// padded with empty fields; longer ones are rejected.
pub fn read_csv<R: Read>(input: R) -> Result<RawTable, ColfError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = RawTable::new(header);

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        table.push_record(record.iter().map(str::to_string).collect())?;
    }
    debug!(
        target: "colf::csv",
        columns = table.num_columns(),
        rows = table.num_rows(),
        "csv loaded"
    );
    Ok(table)
}

pub fn read_csv_path(path: &Path) -> Result<RawTable, ColfError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// Writes the schema's column names followed by one record per row.
pub fn write_rows_csv<W: Write>(schema: &Schema, rows: &[Row], out: W) -> Result<(), ColfError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(schema.column_names())
        .map_err(csv_err)?;
    for row in rows {
        let fields: Vec<_> = schema
            .column_names()
            .map(|name| row.get(name).map(|c| c.to_text()).unwrap_or_default())
            .collect();
        writer
            .write_record(fields.iter().map(|f| f.as_bytes()))
            .map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a column set as CSV, columns in map order, rows up to the longest
/// column.
pub fn write_columns_csv<W: Write>(columns: &ColumnSet, out: W) -> Result<(), ColfError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(columns.keys().map(String::as_bytes))
        .map_err(csv_err)?;

    let num_rows = columns.values().map(Vec::len).max().unwrap_or(0);
    for row in 0..num_rows {
        let fields: Vec<_> = columns
            .values()
            .map(|values| values.get(row).map(|c| c.to_text()).unwrap_or_default())
            .collect();
        writer
            .write_record(fields.iter().map(|f| f.as_bytes()))
            .map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}
