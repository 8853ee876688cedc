//! Quantum Fourier transform
//!
//! With qubit i carrying weight 2^i, [`qft`] maps the basis state |x⟩ to
//! 2^(-n/2) Σ_y e^(2πi·xy/2^n) |y⟩: a Hadamard and a ladder of controlled
//! phases per qubit, then swaps to restore the bit order.

use feynq_core::{Circuit, Result};
use std::f64::consts::PI;

/// QFT over `num_qubits` qubits, no classical bits
pub fn qft(num_qubits: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_qubits, 0)?;
    for j in (0..num_qubits).rev() {
        circuit.h(j)?;
        for k in (0..j).rev() {
            circuit.cp(PI / (1u64 << (j - k)) as f64, k, j)?;
        }
    }
    for i in 0..num_qubits / 2 {
        circuit.swap(i, num_qubits - 1 - i)?;
    }
    Ok(circuit)
}

/// Adjoint of [`qft`]
pub fn inverse_qft(num_qubits: usize) -> Result<Circuit> {
    qft(num_qubits)?.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_counts() {
        let circuit = qft(4).unwrap();
        // 4 H, 6 controlled phases, 2 swaps
        assert_eq!(circuit.len(), 12);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_inverse_reverses_order() {
        let forward = qft(3).unwrap();
        let inverse = inverse_qft(3).unwrap();
        assert_eq!(forward.len(), inverse.len());
        let first = inverse.operations()[0].gate().unwrap();
        assert_eq!(first.name(), "swap");
        let last = inverse.operations().last().unwrap().gate().unwrap();
        assert_eq!(last.name(), "h");
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(qft(0).is_err());
    }
}
