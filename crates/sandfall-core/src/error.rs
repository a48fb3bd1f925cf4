//! Error taxonomy for the simulation core

use thiserror::Error;

/// Errors raised by grid access and brush configuration.
///
/// Steady-state frame operations (painting, settling, input handling) never
/// fail; they clip or ignore out-of-range input instead.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
    #[error("brush bounds {min}..={max} are invalid")]
    InvalidBrush { min: u32, max: u32 },
    #[error("brush size {size} must be odd")]
    EvenBrushSize { size: u32 },
    #[error("brush step {step} must be even to keep sizes odd")]
    OddBrushStep { step: u32 },
    #[error("{cells} cells do not fill a {width}x{height} grid")]
    CellCountMismatch {
        width: usize,
        height: usize,
        cells: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
