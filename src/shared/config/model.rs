use std::env;

use serde::Deserialize;

use crate::engine::core::column::compression::CompressionAlgo;

pub const CONFIG_ENV: &str = "COLF_CONFIG";
pub const ENV_PREFIX: &str = "COLF";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub writer: WriterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub console_level: String,
    pub file_level: String,
    /// File logging is off unless a directory is configured.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub compression: CompressionAlgo,
    pub compression_level: Option<i32>,
    pub format_version: u8,
}

/// Layers built-in defaults, an optional config file and `COLF_*` environment
/// variables (`COLF_WRITER__COMPRESSION=zstd`). The file path comes from the
/// argument, then `COLF_CONFIG`, then `config` in the working directory.
pub fn load_settings(path: Option<&str>) -> Result<Settings, config::ConfigError> {
    let config_path = path
        .map(str::to_string)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| "config".to_string());

    let settings: Settings = config::Config::builder()
        .set_default("logging.console_level", "warn")?
        .set_default("logging.file_level", "info")?
        .set_default("writer.compression", CompressionAlgo::default().name())?
        .set_default("writer.format_version", 1)?
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
