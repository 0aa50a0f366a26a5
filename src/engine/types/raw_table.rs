use crate::engine::errors::ColfError;

/// Row-oriented text input: a header fixing column order plus records of
/// text fields aligned with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    pub fn with_records<I, S>(header: I, records: Vec<Vec<String>>) -> Result<Self, ColfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(header);
        table.records.reserve(records.len());
        for record in records {
            table.push_record(record)?;
        }
        Ok(table)
    }

    /// Appends one record. Missing trailing fields are filled with empty
    /// text (null); extra fields are rejected.
    pub fn push_record(&mut self, mut record: Vec<String>) -> Result<(), ColfError> {
        if record.len() > self.header.len() {
            return Err(ColfError::MalformedInput(format!(
                "record {} has {} fields but the header declares {}",
                self.records.len(),
                record.len(),
                self.header.len()
            )));
        }
        record.resize(self.header.len(), String::new());
        self.records.push(record);
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    pub fn num_columns(&self) -> usize {
        self.header.len()
    }

    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    /// Ordered raw values of one column.
    pub fn column(&self, idx: usize) -> Vec<&str> {
        self.records.iter().map(|r| r[idx].as_str()).collect()
    }
}
