use feynq_core::{Circuit, ClassicalCondition, ClbitId, Gate, QubitId, Result};
use feynq_gates::GateKind;

/// Teleport Rz(φ)·Ry(θ)|0⟩ from qubit 0 to qubit 2
///
/// Qubits 0 and 1 are measured mid-circuit into bits 0 and 1; X (on bit 1)
/// and Z (on bit 0) corrections then act on qubit 2, which is measured into
/// bit 2. Bit 2 reads 1 with probability sin²(θ/2), as if qubit 0 had been
/// measured directly.
pub fn teleportation(theta: f64, phi: f64) -> Result<Circuit> {
    let mut circuit = Circuit::new(3, 3)?;

    circuit.ry(theta, 0)?.rz(phi, 0)?;

    // Shared pair between qubits 1 and 2
    circuit.h(1)?.cx(1, 2)?;

    // Bell measurement of the sender's qubits
    circuit.cx(0, 1)?.h(0)?.measure(0, 0)?.measure(1, 1)?;

    let receiver = [QubitId::new(2)];
    circuit.c_if(
        Gate::new(GateKind::X, &receiver)?,
        ClassicalCondition::bit(ClbitId::new(1), true),
    )?;
    circuit.c_if(
        Gate::new(GateKind::Z, &receiver)?,
        ClassicalCondition::bit(ClbitId::new(0), true),
    )?;

    circuit.measure(2, 2)?;
    Ok(circuit)
}
