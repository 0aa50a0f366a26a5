pub mod cell;
pub mod raw_table;

pub use cell::{Cell, Value, is_null_marker};
pub use raw_table::RawTable;

use indexmap::IndexMap;

/// One materialized row of a full read, keyed by column name in schema order.
pub type Row = IndexMap<String, Cell>;

/// Result of a selective read: requested column name to its full value
/// sequence, in request order.
pub type ColumnSet = IndexMap<String, Vec<Cell>>;
