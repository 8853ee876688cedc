//! Errors raised while constructing gate matrices

use std::fmt;

/// Errors that can occur when building a gate matrix or resolving a gate by name
#[derive(Debug, Clone, PartialEq)]
pub enum GateError {
    /// Matrix is not square or rows have unequal length
    NotSquare { rows: usize, cols: usize },
    /// Matrix side is not a power of two (or is smaller than 2)
    InvalidSize { size: usize },
    /// Matrix contains NaN or infinite values
    InvalidValues,
    /// Matrix is not unitary (U†U ≠ I)
    NotUnitary { max_deviation: f64, tolerance: f64 },
    /// No gate with this name exists
    UnknownGate(String),
    /// Wrong number of numeric parameters for a named gate
    InvalidParameters {
        gate: String,
        expected: usize,
        actual: usize,
    },
    /// A rotation or phase angle is NaN or infinite
    NonFiniteAngle { gate: String, value: f64 },
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::NotSquare { rows, cols } => {
                write!(f, "Matrix must be square, got {}x{}", rows, cols)
            },
            GateError::InvalidSize { size } => {
                write!(
                    f,
                    "Matrix side {} is not a power of two >= 2; a k-qubit gate needs 2^k x 2^k",
                    size
                )
            },
            GateError::InvalidValues => write!(f, "Matrix contains NaN or infinite values"),
            GateError::NotUnitary {
                max_deviation,
                tolerance,
            } => write!(
                f,
                "Matrix is not unitary: max deviation {:.2e} exceeds tolerance {:.2e}",
                max_deviation, tolerance
            ),
            GateError::UnknownGate(name) => write!(f, "Unknown gate '{}'", name),
            GateError::InvalidParameters {
                gate,
                expected,
                actual,
            } => write!(
                f,
                "Gate '{}' expects {} parameter(s), got {}",
                gate, expected, actual
            ),
            GateError::NonFiniteAngle { gate, value } => {
                write!(f, "Gate '{}' needs a finite angle, got {}", gate, value)
            },
        }
    }
}

impl std::error::Error for GateError {}

/// Result type for gate construction
pub type Result<T> = std::result::Result<T, GateError>;
