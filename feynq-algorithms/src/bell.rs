use feynq_core::{Circuit, Result};

/// H on qubit 0, CX 0 → 1, both qubits measured into bits 0 and 1
pub fn bell_pair() -> Result<Circuit> {
    let mut circuit = Circuit::new(2, 2)?;
    circuit.h(0)?.cx(0, 1)?.measure_all()?;
    Ok(circuit)
}
