//! feynq: a shot-based state-vector quantum circuit simulator
//!
//! This crate re-exports the workspace:
//!
//! - [`feynq_gates`]: gate kinds and their matrices
//! - [`feynq_core`]: circuits, operations, text and JSON formats
//! - [`feynq_state`]: the amplitude vector, gate kernels and measurement
//! - [`feynq_sim`]: the execution engine
//! - [`algorithms`]: Bell pair, search, QFT, phase estimation, teleportation
//!
//! # Example
//!
//! ```
//! use feynq::prelude::*;
//!
//! fn main() -> feynq::Result<()> {
//!     let mut circuit = Circuit::new(2, 2)?;
//!     circuit.h(0)?.cx(0, 1)?.measure_all()?;
//!
//!     let result = circuit.execute(1000, Some(42))?;
//!     assert_eq!(result.get("01") + result.get("10"), 0);
//!     Ok(())
//! }
//! ```

pub use feynq_algorithms as algorithms;
pub use feynq_core::{
    serialization, Circuit, ClassicalCondition, ClbitId, Complex64, Gate, IndexKind, Operation,
    QuantumError, QubitId,
};
pub use feynq_gates::{GateError, GateKind, GateMatrix, UNITARITY_TOLERANCE};
pub use feynq_sim::{
    execute, CircuitExt, ExecutionResult, ExecutionStatistics, ExecutionStrategy,
    MeasurementCounts, Simulator, SimulatorConfig, SimulatorError,
};
pub use feynq_state::{ClassicalRegister, StateError, StateVector};

use thiserror::Error;

/// Any error raised across the workspace
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

/// Type alias for results using the workspace-wide [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Everything needed to build and run circuits
pub mod prelude {
    pub use crate::algorithms::{
        bell_pair, inverse_qft, phase_estimation, qft, search, teleportation,
    };
    pub use crate::{
        Circuit, CircuitExt, ClassicalCondition, ClbitId, ExecutionResult, Gate, GateKind,
        GateMatrix, Operation, QubitId, Simulator, SimulatorConfig,
    };
}
