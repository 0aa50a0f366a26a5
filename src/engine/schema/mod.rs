pub mod inference;
pub mod metadata;
pub mod types;

pub use inference::{infer_column, infer_schema, parse_float64, parse_int32};
pub use metadata::{FileMetadata, JsonSchemaCodec, SchemaCodec};
pub use types::{ColumnDescriptor, Schema};

#[cfg(test)]
mod metadata_test;
