pub mod colf_file_factory;
pub mod raw_table_factory;

pub use colf_file_factory::ColfFileFactory;
pub use raw_table_factory::RawTableFactory;

#[cfg(test)]
mod colf_file_factory_test;
#[cfg(test)]
mod raw_table_factory_test;
