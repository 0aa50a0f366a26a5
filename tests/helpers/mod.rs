pub mod factories;
pub mod factory;
pub mod tracking_reader;
