use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::core::column::format::DType;
use crate::engine::errors::ColfError;
use crate::engine::types::{Cell, Row};

/// Largest row count whose materialized rows and columns can be addressed.
pub const MAX_ROWS: usize = {
    let cell = std::mem::size_of::<Cell>();
    let row = std::mem::size_of::<Row>();
    isize::MAX as usize / if cell > row { cell } else { row }
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub dtype: DType,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new<S: Into<String>>(name: S, dtype: DType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable,
        }
    }
}

/// Ordered column descriptors plus the row count. Column order is both the
/// logical order of rows and the physical order of blocks in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    num_rows: usize,
    columns: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Fails with `MalformedInput` when two columns share a name or the row
    /// count exceeds [`MAX_ROWS`].
    pub fn new(num_rows: usize, columns: Vec<ColumnDescriptor>) -> Result<Self, ColfError> {
        if num_rows > MAX_ROWS {
            return Err(ColfError::MalformedInput(format!(
                "row count {num_rows} exceeds the limit of {MAX_ROWS}"
            )));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(ColfError::MalformedInput(format!(
                    "duplicate column name '{}'",
                    c.name
                )));
            }
        }
        Ok(Self { num_rows, columns })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(idx)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
