use std::io;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while writing or reading a COLF file.
///
/// Every variant is terminal for the call that produced it. The one locally
/// recovered condition (invalid UTF-8 inside a utf8 cell) never surfaces here.
#[derive(Debug, Error)]
pub enum ColfError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Truncated file: {0}")]
    Truncated(String),

    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Inconsistent schema: {0}")]
    InconsistentSchema(String),

    #[error("Decompression failed for column '{column}' at offset {offset}: {reason}")]
    Decompression {
        column: String,
        offset: u64,
        reason: String,
    },

    #[error("Corrupt column payload: {0}")]
    CorruptPayload(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ColfError {
    pub fn log_error(&self) {
        match self {
            ColfError::MalformedInput(e) => {
                error!("Malformed input: {}", e);
                debug!("Malformed input details: {:?}", self);
            }
            ColfError::UnsupportedFormat(e) => {
                error!("Unsupported format: {}", e);
                debug!("Unsupported format details: {:?}", self);
            }
            ColfError::Truncated(e) => {
                error!("Truncated file: {}", e);
                debug!("Truncated file details: {:?}", self);
            }
            ColfError::SchemaParse(e) => {
                error!("Schema parse error: {}", e);
                debug!("Schema parse error details: {:?}", self);
            }
            ColfError::UnknownColumn(name) => {
                error!("Unknown column: {}", name);
                debug!("Unknown column details: {:?}", self);
            }
            ColfError::InconsistentSchema(e) => {
                error!("Inconsistent schema: {}", e);
                debug!("Inconsistent schema details: {:?}", self);
            }
            ColfError::Decompression {
                column,
                offset,
                reason,
            } => {
                error!("Decompression failed for column '{}': {}", column, reason);
                debug!("Decompression failure at offset {}: {:?}", offset, self);
            }
            ColfError::CorruptPayload(e) => {
                error!("Corrupt column payload: {}", e);
                debug!("Corrupt payload details: {:?}", self);
            }
            ColfError::Io(e) => {
                error!("I/O error: {}", e);
                debug!("I/O error details: {:?}", e);
            }
        }
    }

    /// Maps a short read onto `Truncated`, keeping other I/O failures as-is.
    pub fn from_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ColfError::Truncated(format!("{} is shorter than declared", what))
        } else {
            ColfError::Io(err)
        }
    }
}
