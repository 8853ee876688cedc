//! Error types for circuit construction

use crate::QubitId;
use feynq_gates::GateError;
use std::fmt;
use thiserror::Error;

/// Which index space an out-of-range index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Qubit,
    Clbit,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Qubit => write!(f, "qubit"),
            IndexKind::Clbit => write!(f, "classical bit"),
        }
    }
}

/// Errors that can occur while building or (de)serializing a circuit
///
/// All structural checks happen when an operation is appended, so a
/// [`Circuit`](crate::Circuit) that exists is always valid to execute.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Qubit or classical-bit index is not below the declared count
    #[error("Invalid {kind} index {index}: circuit has only {limit}")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        limit: usize,
    },

    /// Custom matrix size does not match 2^(target count)
    #[error("Gate matrix dimension {actual} does not match the {expected} required by its targets")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Strict circuits reject matrices that fail the unitarity check
    #[error("Gate '{gate}' is not unitary: max deviation {max_deviation:.2e} exceeds {tolerance:.2e}")]
    NonUnitaryGate {
        gate: String,
        max_deviation: f64,
        tolerance: f64,
    },

    /// Gate applied to wrong number of qubits
    #[error("Gate '{gate}' requires {expected} target qubit(s), but {actual} were provided")]
    InvalidQubitCount {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// Same qubit used twice in one gate
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Amplitude vector for this many qubits would exceed the ceiling
    #[error("{requested} qubits requested, but at most {maximum} are supported")]
    ResourceLimitExceeded { requested: usize, maximum: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Gate matrix could not be built
    #[error("Invalid gate: {0}")]
    Gate(#[from] GateError),

    /// Circuit contains operations with no inverse
    #[error("Circuit is not invertible: {0}")]
    NotInvertible(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),

    /// Parse failure; `line` is 1-based, 0 when not line-oriented
    #[error("Deserialization failed at line {line}: {reason}")]
    DeserializationError { line: usize, reason: String },

    #[error("Format version mismatch: expected <= {expected}, found {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl QuantumError {
    /// Create an out-of-range qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Qubit,
            index: qubit,
            limit: num_qubits,
        }
    }

    /// Create an out-of-range classical bit error
    pub fn invalid_clbit(clbit: usize, num_clbits: usize) -> Self {
        Self::IndexOutOfRange {
            kind: IndexKind::Clbit,
            index: clbit,
            limit: num_clbits,
        }
    }

    /// Create an invalid qubit count error
    pub fn invalid_qubit_count(gate: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InvalidQubitCount {
            gate: gate.into(),
            expected,
            actual,
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::DeserializationError {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("qubit index 5"));
        assert!(msg.contains("3"));
    }

    #[test]
    fn test_invalid_clbit_error() {
        let msg = QuantumError::invalid_clbit(2, 1).to_string();
        assert!(msg.contains("classical bit index 2"));
    }

    #[test]
    fn test_invalid_qubit_count_error() {
        let err = QuantumError::invalid_qubit_count("swap", 2, 1);
        let msg = format!("{}", err);
        assert!(msg.contains("swap"));
        assert!(msg.contains("2"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn test_empty_circuit_error() {
        let msg = QuantumError::EmptyCircuit.to_string();
        assert!(msg.contains("at least one qubit"));
    }

    #[test]
    fn test_gate_error_converts() {
        let err: QuantumError = GateError::UnknownGate("foo".into()).into();
        assert!(matches!(err, QuantumError::Gate(_)));
        assert!(err.to_string().contains("foo"));
    }
}
