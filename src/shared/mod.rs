pub mod config;
pub mod csv_io;
pub mod storage_header;

#[cfg(test)]
pub mod csv_io_test;
