pub mod model;

pub use model::{LoggingConfig, Settings, WriterConfig, load_settings};

#[cfg(test)]
mod model_test;
