//! Circuit serialization
//!
//! Two formats are supported:
//! - a line-oriented instruction list ([`text`]), readable and diff-friendly
//! - versioned JSON ([`json`]) via serde
//!
//! Both reproduce the exact operation sequence, so a round-tripped circuit
//! executes identically to the original.

pub mod json;
pub mod text;

pub use json::{SerializedCircuit, SerializedGate, SerializedGateOp, SerializedOperation};

/// Serialization format version
pub const CIRCUIT_FORMAT_VERSION: u32 = 1;
