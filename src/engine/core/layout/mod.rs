pub mod file_header;
pub mod location_table;

pub use file_header::FileHeader;
pub use location_table::{ColumnBlockMeta, LocationTable};
