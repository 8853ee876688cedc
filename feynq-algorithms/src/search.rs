//! Amplitude amplification over n qubits
//!
//! The oracle flips the phase of each marked basis state and the diffusion
//! operator reflects about the uniform superposition. Both are built from
//! X, H and one multi-controlled Z per reflection; no 2^n × 2^n matrix is
//! ever formed.

use feynq_core::{Circuit, QuantumError, Result};
use std::f64::consts::PI;

/// ⌊(π/4)·√(2ⁿ/m)⌋ iterations for `marked` of 2^`num_qubits` states
pub fn optimal_iterations(num_qubits: usize, marked: usize) -> usize {
    if marked == 0 {
        return 0;
    }
    let space = (num_qubits as f64).exp2();
    (PI / 4.0 * (space / marked as f64).sqrt()).floor() as usize
}

/// Search circuit for basis states `marked` (bit i of each index is qubit i)
///
/// Qubit i is measured into classical bit i, so a marked index reads back as
/// its own bitstring.
///
/// # Errors
/// `InvalidParameter` if `marked` is empty, contains a duplicate, or holds an
/// index outside [0, 2^num_qubits).
///
/// # Example
/// ```
/// use feynq_algorithms::search;
///
/// let circuit = search(3, &[0b101]).unwrap();
/// assert_eq!(circuit.num_clbits(), 3);
/// ```
pub fn search(num_qubits: usize, marked: &[usize]) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_qubits, num_qubits)?;
    validate_marked(num_qubits, marked)?;

    for q in 0..num_qubits {
        circuit.h(q)?;
    }
    for _ in 0..optimal_iterations(num_qubits, marked.len()) {
        for &state in marked {
            phase_oracle(&mut circuit, state)?;
        }
        diffusion(&mut circuit)?;
    }
    circuit.measure_all()?;
    Ok(circuit)
}

/// [`search`] with marked states given as bitstrings, qubit n-1 leftmost
pub fn search_bitstrings(num_qubits: usize, marked: &[&str]) -> Result<Circuit> {
    let indices = marked
        .iter()
        .map(|bits| parse_bitstring(num_qubits, bits))
        .collect::<Result<Vec<_>>>()?;
    search(num_qubits, &indices)
}

fn parse_bitstring(num_qubits: usize, bits: &str) -> Result<usize> {
    if bits.len() != num_qubits || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(QuantumError::InvalidParameter(format!(
            "marked state {:?} is not a {}-bit string",
            bits, num_qubits
        )));
    }
    usize::from_str_radix(bits, 2)
        .map_err(|e| QuantumError::InvalidParameter(format!("marked state {:?}: {}", bits, e)))
}

fn validate_marked(num_qubits: usize, marked: &[usize]) -> Result<()> {
    if marked.is_empty() {
        return Err(QuantumError::InvalidParameter(
            "search needs at least one marked state".to_string(),
        ));
    }
    let space = 1usize << num_qubits;
    for (i, &state) in marked.iter().enumerate() {
        if state >= space {
            return Err(QuantumError::InvalidParameter(format!(
                "marked state {} outside the {}-qubit space",
                state, num_qubits
            )));
        }
        if marked[..i].contains(&state) {
            return Err(QuantumError::InvalidParameter(format!(
                "marked state {} listed twice",
                state
            )));
        }
    }
    Ok(())
}

/// Flip the phase of the all-ones state of every qubit
fn flip_all_ones(circuit: &mut Circuit) -> Result<()> {
    let last = circuit.num_qubits() - 1;
    let controls: Vec<usize> = (0..last).collect();
    circuit.mcz(&controls, last)?;
    Ok(())
}

/// Apply X to the qubits that are 0 in `state`
fn flip_zeros(circuit: &mut Circuit, state: usize) -> Result<()> {
    for q in 0..circuit.num_qubits() {
        if (state >> q) & 1 == 0 {
            circuit.x(q)?;
        }
    }
    Ok(())
}

/// |state⟩ → -|state⟩, every other basis state unchanged
fn phase_oracle(circuit: &mut Circuit, state: usize) -> Result<()> {
    flip_zeros(circuit, state)?;
    flip_all_ones(circuit)?;
    flip_zeros(circuit, state)
}

/// Reflection about the uniform superposition (up to a global phase)
fn diffusion(circuit: &mut Circuit) -> Result<()> {
    let n = circuit.num_qubits();
    for q in 0..n {
        circuit.h(q)?.x(q)?;
    }
    flip_all_ones(circuit)?;
    for q in 0..n {
        circuit.x(q)?.h(q)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(2, 1), 1);
        assert_eq!(optimal_iterations(3, 1), 2);
        assert_eq!(optimal_iterations(4, 1), 3);
        assert_eq!(optimal_iterations(10, 1), 25);
        assert_eq!(optimal_iterations(4, 4), 1);
        assert_eq!(optimal_iterations(4, 0), 0);
    }

    #[test]
    fn test_invalid_marked_states() {
        assert!(search(2, &[]).is_err());
        assert!(search(2, &[4]).is_err());
        assert!(search(2, &[1, 1]).is_err());
        assert!(search_bitstrings(2, &["1"]).is_err());
        assert!(search_bitstrings(2, &["12"]).is_err());
    }

    #[test]
    fn test_bitstring_marks_match_indices() {
        let by_index = search(3, &[0b110]).unwrap();
        let by_bits = search_bitstrings(3, &["110"]).unwrap();
        assert_eq!(by_index, by_bits);
    }

    #[test]
    fn test_no_wide_matrices() {
        let circuit = search(5, &[3]).unwrap();
        for op in circuit.operations() {
            if let Some(gate) = op.gate() {
                assert_eq!(gate.targets().len(), 1, "unexpected gate {}", gate);
            }
        }
    }
}
