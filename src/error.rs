// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Invalid grid region: plane extents {extent_h} x {extent_v} must both be positive")]
    InvalidRegion { extent_h: f64, extent_v: f64 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Not enough memory for {what}")]
    OutOfMemory { what: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },

    #[error("Contour start level {start_level} is above the maximum grid height {max_height}")]
    StartAboveRange { start_level: f64, max_height: f64 },
}

pub type RasterResult<T> = Result<T, RasterError>;

/// Nicht-fatale Hinweise, die der Aufrufer sehen soll, ohne dass die
/// Pipeline abbricht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterWarning {
    /// Das Gitter hätte genau eine oder mehr als 10.000.000 Zellen.
    UnusualGridSize { cell_count: u64 },
}
