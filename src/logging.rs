use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::shared::config::LoggingConfig;
use tracing::info;

/// Installs the global subscriber. Console output goes to stderr so that
/// commands printing data on stdout stay pipeable.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let console_filter = cfg.console_level.parse::<LevelFilter>()?;
    let file_filter = cfg.file_level.parse::<LevelFilter>()?;

    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = cfg.log_dir.as_ref().map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "colf.log");
        fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
            .with_filter(file_filter)
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    info!(target: "colf::logging", "Logging initialized");
    Ok(())
}

#[cfg(test)]
pub fn init_for_tests() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env().add_directive("colf=debug".parse().unwrap());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
