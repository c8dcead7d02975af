//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `RutaError` where the
//! failure originates in core types (configuration, coordinate parsing).

use thiserror::Error;

/// The base error type for `ruta-core` and the configuration layer.
#[derive(Debug, Error)]
pub enum RutaError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ruta-core`.
pub type RutaResult<T> = Result<T, RutaError>;
