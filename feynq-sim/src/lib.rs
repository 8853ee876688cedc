//! Shot-based execution engine for feynq
//!
//! Runs a [`Circuit`] many times ("shots") and tallies the final classical
//! registers into bitstring counts.
//!
//! # Features
//!
//! - **Full replay**: every shot evolves a fresh amplitude vector, collapsing
//!   on each measurement and feeding results to classically-controlled gates
//! - **Sampling fast path**: circuits that only measure at the end compute
//!   their distribution once and draw every shot from an alias table
//! - **Reproducible parallelism**: shots run on rayon with a ChaCha8 stream
//!   per shot, so counts depend only on the seed
//! - **Deadlines**: a timeout stops launching shots and flags the result
//!   incomplete
//!
//! # Example
//!
//! ```
//! use feynq_core::Circuit;
//! use feynq_sim::CircuitExt;
//!
//! let mut circuit = Circuit::new(1, 1).unwrap();
//! circuit.h(0).unwrap().measure(0, 0).unwrap();
//!
//! let result = circuit.execute(1000, Some(42)).unwrap();
//! assert_eq!(result.total_shots(), 1000);
//! assert!(result.complete);
//! ```

pub mod config;
pub mod error;
mod executor;
pub mod result;
pub mod rng;
mod sampling;
pub mod simulator;
pub mod statistics;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use result::{ExecutionResult, MeasurementCounts};
pub use simulator::Simulator;
pub use statistics::{ExecutionStatistics, ExecutionStrategy};

use feynq_core::Circuit;

/// Execute `circuit` with the default configuration
///
/// With `seed = None` a fresh seed is drawn and reported in the result.
pub fn execute(circuit: &Circuit, shots: usize, seed: Option<u64>) -> Result<ExecutionResult> {
    let simulator = Simulator::default();
    match seed {
        Some(seed) => simulator.execute_with_seed(circuit, shots, seed),
        None => simulator.execute(circuit, shots),
    }
}

/// `circuit.execute(shots, seed)` on [`Circuit`]
pub trait CircuitExt {
    fn execute(&self, shots: usize, seed: Option<u64>) -> Result<ExecutionResult>;
}

impl CircuitExt for Circuit {
    fn execute(&self, shots: usize, seed: Option<u64>) -> Result<ExecutionResult> {
        execute(self, shots, seed)
    }
}
