pub mod colf_writer;
pub mod write_options;

pub use colf_writer::{ColfWriter, WriteSummary};
pub use write_options::WriteOptions;
