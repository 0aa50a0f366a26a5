use crate::engine::types::RawTable;

/// Builds a [`RawTable`] column by column. Shorter columns are padded with
/// empty text, which reads as null.
pub struct RawTableFactory {
    header: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl RawTableFactory {
    pub fn new() -> Self {
        Self {
            header: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, values: &[&str]) -> Self {
        self.header.push(name.to_string());
        self.columns
            .push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Header plus the three-row table used across the reader and writer
    /// tests: an int, a nullable float and a nullable string column.
    pub fn sample(self) -> Self {
        self.with_column("id", &["1", "2", "3"])
            .with_column("score", &["1.5", "", "2"])
            .with_column("name", &["alice", "", "carol"])
    }

    pub fn create(self) -> RawTable {
        let rows = self.columns.iter().map(Vec::len).max().unwrap_or(0);
        let records = (0..rows)
            .map(|r| {
                self.columns
                    .iter()
                    .map(|col| col.get(r).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        RawTable::with_records(self.header, records).expect("factory records fit the header")
    }
}
