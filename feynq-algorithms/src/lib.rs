//! Circuit builders for standard algorithms
//!
//! Every builder is a plain function that returns a populated [`Circuit`]
//! built only from the public builder API, so the result can be inspected,
//! serialized, composed with [`Circuit::extend`] or executed like any other
//! circuit.
//!
//! - [`bell_pair`]: maximally entangled pair
//! - [`search`]: amplitude amplification with phase oracle and diffusion
//! - [`qft`] / [`inverse_qft`]: quantum Fourier transform
//! - [`phase_estimation`]: eigenphase readout of a custom unitary
//! - [`teleportation`]: mid-circuit Bell measurement with classical correction
//!
//! # Example
//! ```
//! use feynq_algorithms::bell_pair;
//!
//! let circuit = bell_pair().unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_measurements(), 2);
//! ```

mod bell;
pub mod phase_estimation;
pub mod qft;
pub mod search;
mod teleportation;

pub use bell::bell_pair;
pub use phase_estimation::{phase_estimation, phase_estimation_with_eigenstate};
pub use qft::{inverse_qft, qft};
pub use search::{optimal_iterations, search, search_bitstrings};
pub use teleportation::teleportation;

pub use feynq_core::{Circuit, QuantumError, Result};
