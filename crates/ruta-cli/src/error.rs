//! Application error type.

use thiserror::Error;

use ruta_core::RutaError;
use ruta_output::OutputError;
use ruta_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] RutaError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
