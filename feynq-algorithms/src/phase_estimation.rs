//! Phase estimation
//!
//! Precision qubits 0..t read out the phase φ of U|ψ⟩ = e^(2πiφ)|ψ⟩ as the
//! integer round(φ·2^t), measured into classical bits 0..t. The target
//! register occupies qubits t..t+k; the custom matrix's local index equals
//! the target register's integer value.

use crate::qft::inverse_qft;
use feynq_core::{Circuit, QuantumError, Result};
use feynq_gates::{GateKind, GateMatrix};

/// Phase estimation with the target register left in |0…0⟩
pub fn phase_estimation(unitary: &GateMatrix, precision: usize) -> Result<Circuit> {
    phase_estimation_with_eigenstate(unitary, precision, 0)
}

/// Phase estimation with the target register prepared in basis state
/// `eigenstate`
///
/// # Errors
/// `InvalidParameter` if `precision` is 0 or `eigenstate` does not fit the
/// target register; `ResourceLimitExceeded` if the total width is too large.
///
/// # Example
/// ```
/// use feynq_algorithms::phase_estimation_with_eigenstate;
/// use feynq_gates::GateKind;
///
/// // P(π/2)|1⟩ = e^(2πi/4)|1⟩
/// let p = GateKind::Phase(std::f64::consts::FRAC_PI_2).matrix();
/// let circuit = phase_estimation_with_eigenstate(&p, 3, 1).unwrap();
/// assert_eq!(circuit.num_qubits(), 4);
/// assert_eq!(circuit.num_clbits(), 3);
/// ```
pub fn phase_estimation_with_eigenstate(
    unitary: &GateMatrix,
    precision: usize,
    eigenstate: usize,
) -> Result<Circuit> {
    if precision == 0 {
        return Err(QuantumError::InvalidParameter(
            "phase estimation needs at least one precision qubit".to_string(),
        ));
    }
    let width = unitary.num_qubits();
    if eigenstate >= unitary.dimension() {
        return Err(QuantumError::InvalidParameter(format!(
            "eigenstate {} outside the {}-qubit target register",
            eigenstate, width
        )));
    }

    let mut circuit = Circuit::new(precision + width, precision)?;
    // First target is the most significant local bit
    let targets: Vec<usize> = (precision..precision + width).rev().collect();

    for j in 0..width {
        if (eigenstate >> j) & 1 == 1 {
            circuit.x(precision + j)?;
        }
    }
    for q in 0..precision {
        circuit.h(q)?;
    }

    let mut power = unitary.clone();
    for q in 0..precision {
        circuit.controlled(GateKind::Unitary(power.clone()), &[q], &targets)?;
        power = power.power(2);
    }

    circuit.extend(&inverse_qft(precision)?)?;
    for q in 0..precision {
        circuit.measure(q, q)?;
    }
    Ok(circuit)
}
