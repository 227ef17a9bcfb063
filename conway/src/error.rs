// error.rs - Failure values reported by the simulation core

use thiserror::Error;

use crate::simulation::RunState;

/// Every failure is recoverable: the operation that produced it left the
/// simulation untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifeError {
    #[error("Error loading state: {0}")]
    MalformedState(String),

    #[error("State is {}x{} but the grid is {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: RunState,
    },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
