pub mod colf_reader;

pub use colf_reader::ColfReader;
