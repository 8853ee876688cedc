//! Quantum state for feynq
//!
//! - [`StateVector`]: the 2^n amplitude vector and in-place gate application
//! - [`kernels`]: chunked pairwise / grouped update loops, rayon-parallel on request
//! - measurement: marginal probabilities and collapse ([`StateVector::measure_qubit`])
//! - [`ClassicalRegister`]: bits written by measurements
//! - [`AliasTable`]: O(1) sampling of a fixed outcome distribution
//!
//! # Example
//!
//! ```
//! use feynq_gates::GateKind;
//! use feynq_state::StateVector;
//!
//! let mut state = StateVector::new(2).unwrap();
//! state.apply_gate(&GateKind::H.matrix(), &[0], &[]).unwrap();
//! state.apply_gate(&GateKind::X.matrix(), &[1], &[0]).unwrap();
//!
//! let probs = state.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```

pub mod error;
pub mod kernels;
pub mod measurement;
pub mod register;
pub mod sampling;
pub mod state_vector;

pub use error::{Result, StateError};
pub use measurement::{MeasurementResult, DEGENERATE_PROBABILITY};
pub use register::ClassicalRegister;
pub use sampling::AliasTable;
pub use state_vector::{StateVector, MAX_QUBITS};
