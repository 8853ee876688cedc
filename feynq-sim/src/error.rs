//! Error types for the simulator

use feynq_core::QuantumError;
use feynq_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Shots must be at least one
    #[error("Invalid shot count {0}: at least one shot is required")]
    InvalidShotCount(usize),

    /// The amplitude vectors would not fit the configured ceiling
    #[error(
        "Resource limit exceeded: {num_qubits} qubits need {required_bytes} bytes, limit is {limit_bytes} bytes"
    )]
    ResourceLimitExceeded {
        num_qubits: usize,
        required_bytes: usize,
        limit_bytes: usize,
    },

    /// Invalid configuration
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// Error from circuit construction or validation
    #[error("Circuit error: {0}")]
    Circuit(#[from] QuantumError),

    /// Error from state operations
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Norm drift beyond the catastrophic threshold
    #[error("Numerical instability: state norm² drifted to {norm_sqr}, tolerance {tolerance}")]
    NumericalInstability { norm_sqr: f64, tolerance: f64 },
}

impl SimulatorError {
    /// Errors that abort a single shot rather than the whole execution
    pub fn is_shot_failure(&self) -> bool {
        matches!(
            self,
            SimulatorError::NumericalInstability { .. }
                | SimulatorError::State(StateError::NotNormalized { .. })
        )
    }
}
