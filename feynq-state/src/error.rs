//! Amplitude-vector errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Qubit {index} is outside the {num_qubits}-qubit register")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// A qubit listed twice across a gate's targets and controls
    #[error("Qubit {index} appears more than once in a gate")]
    DuplicateQubit { index: usize },

    /// Amplitude count is not 2^n
    #[error("{dimension} amplitudes do not form a register; need a power of two")]
    InvalidDimension { dimension: usize },

    /// The state has (numerically) zero norm, so no outcome can be drawn
    #[error("Amplitude vector has degenerate norm {norm}")]
    NotNormalized { norm: f64 },

    /// Gate matrix side does not match 2^(target count)
    #[error("Gate matrix has side {actual}, its targets need {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{requested} qubits requested, at most {maximum} supported")]
    TooManyQubits { requested: usize, maximum: usize },

    /// The amplitude buffer could not be reserved
    #[error("Could not reserve {size} bytes of amplitudes")]
    AllocationError { size: usize },
}

pub type Result<T> = std::result::Result<T, StateError>;
