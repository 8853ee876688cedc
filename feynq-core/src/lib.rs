//! Circuit model for feynq
//!
//! This crate provides the types for building quantum circuits:
//! - [`QubitId`] / [`ClbitId`]: type-safe qubit and classical-bit addressing
//! - [`Gate`]: a gate kind resolved to its matrix, with targets and controls
//! - [`Operation`]: gate, measurement, or classically-controlled gate
//! - [`Circuit`]: an ordered, validated operation list
//!
//! # Example
//! ```
//! use feynq_core::{Circuit, ClassicalCondition, ClbitId, Gate, QubitId};
//! use feynq_gates::GateKind;
//!
//! let mut circuit = Circuit::new(2, 1).unwrap();
//! circuit.h(0).unwrap().measure(0, 0).unwrap();
//!
//! // Flip qubit 1 only when the measurement read 1
//! let x = Gate::new(GateKind::X, &[QubitId::new(1)]).unwrap();
//! circuit.c_if(x, ClassicalCondition::bit(ClbitId::new(0), true)).unwrap();
//! assert!(circuit.has_mid_circuit_measurement());
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;
pub mod serialization;

pub use circuit::{Circuit, MAX_QUBITS};
pub use error::{IndexKind, QuantumError};
pub use gate::Gate;
pub use num_complex::Complex64;
pub use operation::{ClassicalCondition, Operation};
pub use qubit::{ClbitId, QubitId};

/// Type alias for results in feynq-core
pub type Result<T> = std::result::Result<T, QuantumError>;
