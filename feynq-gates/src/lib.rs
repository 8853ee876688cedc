//! Gate library for feynq
//!
//! Standard single-qubit gate matrices are compile-time constants; rotations
//! and the phase gate are pure functions of their angle. [`GateKind`] is the
//! closed set of gate kinds a circuit can reference, and [`GateMatrix`] is
//! the resolved 2^k × 2^k operator.
//!
//! # Example
//!
//! ```
//! use feynq_gates::{GateKind, matrices};
//!
//! let h = GateKind::H.matrix();
//! assert_eq!(h.dimension(), 2);
//! assert!(h.is_unitary(1e-12));
//!
//! // Inverses are resolved per kind
//! assert_eq!(GateKind::T.inverse(), GateKind::Tdg);
//! let _x = &matrices::PAULI_X;
//! ```

pub mod error;
pub mod kind;
pub mod matrices;
pub mod matrix;
pub mod matrix_ops;

pub use error::{GateError, Result};
pub use kind::GateKind;
pub use matrix::GateMatrix;

/// Default tolerance for unitarity checks of user-supplied matrices
pub const UNITARITY_TOLERANCE: f64 = 1e-9;

/// Largest register a circuit may declare or a state vector may allocate
/// (2^30 amplitudes, 16 GiB)
pub const MAX_QUBITS: usize = 30;
