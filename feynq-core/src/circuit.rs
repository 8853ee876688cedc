//! Quantum circuit representation

use crate::operation::{ClassicalCondition, Operation};
use crate::{ClbitId, Gate, QuantumError, QubitId, Result};
use feynq_gates::{GateKind, GateMatrix, UNITARITY_TOLERANCE};
use std::fmt;

pub use feynq_gates::MAX_QUBITS;

/// A quantum circuit over `num_qubits` qubits and `num_clbits` classical bits
///
/// Every operation is validated when appended, so execution never sees an
/// out-of-range index or an ill-shaped matrix. Executing a circuit never
/// mutates it.
///
/// # Example
/// ```
/// use feynq_core::Circuit;
///
/// let mut bell = Circuit::new(2, 2).unwrap();
/// bell.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
/// assert_eq!(bell.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    operations: Vec<Operation>,
    strict: bool,
}

impl Circuit {
    /// Create an empty circuit
    ///
    /// # Errors
    /// - `EmptyCircuit` if `num_qubits` is 0
    /// - `ResourceLimitExceeded` if `num_qubits` exceeds [`MAX_QUBITS`]
    pub fn new(num_qubits: usize, num_clbits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, num_clbits, 0)
    }

    /// Create a circuit with pre-allocated operation capacity
    pub fn with_capacity(num_qubits: usize, num_clbits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::ResourceLimitExceeded {
                requested: num_qubits,
                maximum: MAX_QUBITS,
            });
        }
        Ok(Self {
            num_qubits,
            num_clbits,
            operations: Vec::with_capacity(capacity),
            strict: false,
        })
    }

    /// Enable or disable strict validation
    ///
    /// A strict circuit rejects gates whose matrix fails the unitarity check
    /// within [`UNITARITY_TOLERANCE`]. Only affects subsequent appends.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub const fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Number of operations
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations in declared order
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn get_operation(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Validate and append an operation
    pub fn append(&mut self, operation: impl Into<Operation>) -> Result<&mut Self> {
        let operation = operation.into();
        match &operation {
            Operation::Gate(gate) => self.check_gate(gate)?,
            Operation::Measure { qubit, clbit } => {
                self.check_qubit(*qubit)?;
                self.check_clbit(*clbit)?;
            },
            Operation::Conditional { gate, condition } => {
                self.check_gate(gate)?;
                self.check_condition(condition)?;
            },
        }
        self.operations.push(operation);
        Ok(self)
    }

    /// Append every operation of `other`, which must be no wider than `self`
    ///
    /// Either all of `other` is appended or, on error, `self` is unchanged.
    pub fn extend(&mut self, other: &Circuit) -> Result<&mut Self> {
        if other.num_qubits > self.num_qubits {
            return Err(QuantumError::invalid_qubit(other.num_qubits - 1, self.num_qubits));
        }
        if other.num_clbits > self.num_clbits && other.uses_clbits() {
            return Err(QuantumError::invalid_clbit(other.num_clbits - 1, self.num_clbits));
        }
        let before = self.operations.len();
        self.operations.reserve(other.len());
        for op in &other.operations {
            if let Err(e) = self.append(op.clone()).map(|_| ()) {
                self.operations.truncate(before);
                return Err(e);
            }
        }
        Ok(self)
    }

    fn uses_clbits(&self) -> bool {
        self.operations
            .iter()
            .any(|op| !matches!(op, Operation::Gate(_)))
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<()> {
        if qubit.index() >= self.num_qubits {
            return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> Result<()> {
        if clbit.index() >= self.num_clbits {
            return Err(QuantumError::invalid_clbit(clbit.index(), self.num_clbits));
        }
        Ok(())
    }

    fn check_gate(&self, gate: &Gate) -> Result<()> {
        for qubit in gate.qubits() {
            self.check_qubit(qubit)?;
        }
        if self.strict {
            let max_deviation = gate.matrix().unitarity_deviation();
            if max_deviation > UNITARITY_TOLERANCE {
                return Err(QuantumError::NonUnitaryGate {
                    gate: gate.name(),
                    max_deviation,
                    tolerance: UNITARITY_TOLERANCE,
                });
            }
        }
        Ok(())
    }

    fn check_condition(&self, condition: &ClassicalCondition) -> Result<()> {
        if condition.is_empty() {
            return Err(QuantumError::InvalidParameter(
                "classical condition must test at least one bit".to_string(),
            ));
        }
        for &(clbit, _) in condition.terms() {
            self.check_clbit(clbit)?;
        }
        Ok(())
    }

    fn gate_on(&mut self, kind: GateKind, controls: &[usize], targets: &[usize]) -> Result<&mut Self> {
        let controls: Vec<QubitId> = controls.iter().map(|&q| QubitId::new(q)).collect();
        let targets: Vec<QubitId> = targets.iter().map(|&q| QubitId::new(q)).collect();
        let gate = Gate::controlled(kind, &controls, &targets)?;
        self.append(gate)
    }

    /// Append a gate by name, e.g. `gate("crz", &[0, 1], &[0.5])`
    ///
    /// Names follow the instruction format: one leading `c` per control,
    /// controls listed first in `qubits`.
    pub fn gate(&mut self, name: &str, qubits: &[usize], params: &[f64]) -> Result<&mut Self> {
        let qubits: Vec<QubitId> = qubits.iter().map(|&q| QubitId::new(q)).collect();
        let gate = Gate::from_name(name, &qubits, params)?;
        self.append(gate)
    }

    // Single-qubit gates

    pub fn id(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Identity, &[], &[qubit])
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::H, &[], &[qubit])
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::X, &[], &[qubit])
    }

    pub fn y(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Y, &[], &[qubit])
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Z, &[], &[qubit])
    }

    pub fn s(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::S, &[], &[qubit])
    }

    pub fn sdg(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Sdg, &[], &[qubit])
    }

    pub fn t(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::T, &[], &[qubit])
    }

    pub fn tdg(&mut self, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Tdg, &[], &[qubit])
    }

    pub fn rx(&mut self, theta: f64, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Rx(theta), &[], &[qubit])
    }

    pub fn ry(&mut self, theta: f64, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Ry(theta), &[], &[qubit])
    }

    pub fn rz(&mut self, theta: f64, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Rz(theta), &[], &[qubit])
    }

    /// Phase gate diag(1, e^(iθ))
    pub fn p(&mut self, theta: f64, qubit: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Phase(theta), &[], &[qubit])
    }

    // Multi-qubit gates

    /// Controlled-X (CNOT)
    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::X, &[control], &[target])
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Z, &[control], &[target])
    }

    /// Controlled phase
    pub fn cp(&mut self, theta: f64, control: usize, target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Phase(theta), &[control], &[target])
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Swap, &[], &[a, b])
    }

    /// Toffoli
    pub fn ccx(&mut self, c0: usize, c1: usize, target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::X, &[c0, c1], &[target])
    }

    /// Multi-controlled X (generalized Toffoli)
    pub fn mcx(&mut self, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::X, controls, &[target])
    }

    /// Multi-controlled Z: flips the phase of the all-ones state of its qubits
    pub fn mcz(&mut self, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.gate_on(GateKind::Z, controls, &[target])
    }

    /// Custom matrix on `targets`; the first target is the most significant local bit
    pub fn unitary(&mut self, matrix: GateMatrix, targets: &[usize]) -> Result<&mut Self> {
        self.gate_on(GateKind::Unitary(matrix), &[], targets)
    }

    /// Any kind with an arbitrary control set
    pub fn controlled(
        &mut self,
        kind: GateKind,
        controls: &[usize],
        targets: &[usize],
    ) -> Result<&mut Self> {
        self.gate_on(kind, controls, targets)
    }

    // Measurement and classical control

    pub fn measure(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        self.append(Operation::measure(qubit, clbit))
    }

    /// Measure qubit i into classical bit i for every qubit
    pub fn measure_all(&mut self) -> Result<&mut Self> {
        if self.num_clbits < self.num_qubits {
            return Err(QuantumError::invalid_clbit(self.num_qubits - 1, self.num_clbits));
        }
        for q in 0..self.num_qubits {
            self.measure(q, q)?;
        }
        Ok(self)
    }

    /// Apply `gate` only when `condition` holds
    pub fn c_if(&mut self, gate: Gate, condition: ClassicalCondition) -> Result<&mut Self> {
        self.append(Operation::Conditional { gate, condition })
    }

    /// The adjoint circuit: gates reversed and inverted
    ///
    /// # Errors
    /// `NotInvertible` if the circuit measures or conditions on classical bits.
    pub fn inverse(&self) -> Result<Circuit> {
        let mut inverse = Circuit::with_capacity(self.num_qubits, self.num_clbits, self.len())?;
        inverse.strict = self.strict;
        for (i, op) in self.operations.iter().enumerate().rev() {
            match op {
                Operation::Gate(gate) => {
                    inverse.operations.push(Operation::Gate(gate.inverse()));
                },
                other => {
                    return Err(QuantumError::NotInvertible(format!(
                        "operation {} ({}) is not a unitary gate",
                        i, other
                    )));
                },
            }
        }
        Ok(inverse)
    }

    /// True when some gate (conditional or not) follows a measurement
    ///
    /// Circuits without this property measure only at the end, so their
    /// outcome distribution can be computed once and sampled per shot.
    pub fn has_mid_circuit_measurement(&self) -> bool {
        let mut measured = false;
        for op in &self.operations {
            match op {
                Operation::Measure { .. } => measured = true,
                Operation::Gate(_) | Operation::Conditional { .. } if measured => return true,
                _ => {},
            }
        }
        false
    }

    /// Number of measurement operations
    pub fn num_measurements(&self) -> usize {
        self.operations.iter().filter(|op| op.is_measurement()).count()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit({} qubits, {} clbits, {} operations)",
            self.num_qubits,
            self.num_clbits,
            self.operations.len()
        )?;
        for (i, op) in self.operations.iter().enumerate() {
            write!(f, "\n  {:>3}: {}", i, op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_circuit_creation() {
        let circuit = Circuit::new(3, 2).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_creation_limits() {
        assert_eq!(Circuit::new(0, 0), Err(QuantumError::EmptyCircuit));
        assert_eq!(
            Circuit::new(MAX_QUBITS + 1, 0),
            Err(QuantumError::ResourceLimitExceeded {
                requested: MAX_QUBITS + 1,
                maximum: MAX_QUBITS
            })
        );
        assert!(Circuit::new(MAX_QUBITS, 0).is_ok());
    }

    #[test]
    fn test_append_rejects_out_of_range() {
        let mut circuit = Circuit::new(2, 1).unwrap();
        assert_eq!(circuit.h(2).unwrap_err(), QuantumError::invalid_qubit(2, 2));
        assert_eq!(circuit.measure(0, 1).unwrap_err(), QuantumError::invalid_clbit(1, 1));
        assert_eq!(circuit.cx(0, 5).unwrap_err(), QuantumError::invalid_qubit(5, 2));
        // Failed appends leave the circuit untouched
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_conditional_validation() {
        let mut circuit = Circuit::new(2, 1).unwrap();
        let x = Gate::new(GateKind::X, &[QubitId::new(1)]).unwrap();

        let err = circuit
            .c_if(x.clone(), ClassicalCondition::bit(ClbitId::new(3), true))
            .unwrap_err();
        assert_eq!(err, QuantumError::invalid_clbit(3, 1));

        let err = circuit.c_if(x.clone(), ClassicalCondition::default()).unwrap_err();
        assert!(matches!(err, QuantumError::InvalidParameter(_)));

        circuit
            .c_if(x, ClassicalCondition::bit(ClbitId::new(0), true))
            .unwrap();
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_strict_rejects_non_unitary() {
        let m = GateMatrix::from_rows(vec![
            vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
            vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ])
        .unwrap();

        let mut lenient = Circuit::new(1, 0).unwrap();
        assert!(lenient.unitary(m.clone(), &[0]).is_ok());

        let mut strict = Circuit::new(1, 0).unwrap().strict(true);
        let err = strict.unitary(m, &[0]).unwrap_err();
        assert!(matches!(err, QuantumError::NonUnitaryGate { .. }));
        assert!(strict.h(0).is_ok());
    }

    #[test]
    fn test_gate_by_name() {
        let mut by_name = Circuit::new(3, 0).unwrap();
        by_name
            .gate("h", &[0], &[])
            .unwrap()
            .gate("ccx", &[0, 1, 2], &[])
            .unwrap()
            .gate("cp", &[2, 0], &[0.5])
            .unwrap();

        let mut by_builder = Circuit::new(3, 0).unwrap();
        by_builder.h(0).unwrap().ccx(0, 1, 2).unwrap().cp(0.5, 2, 0).unwrap();
        assert_eq!(by_name, by_builder);

        assert!(by_name.gate("rx", &[0], &[]).is_err());
        assert_eq!(by_name.gate("x", &[7], &[]).unwrap_err(), QuantumError::invalid_qubit(7, 3));
    }

    #[test]
    fn test_measure_all_needs_enough_clbits() {
        let mut circuit = Circuit::new(3, 2).unwrap();
        assert!(circuit.measure_all().is_err());
        assert!(circuit.is_empty());

        let mut circuit = Circuit::new(3, 3).unwrap();
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_measurements(), 3);
    }

    #[test]
    fn test_mid_circuit_detection() {
        let mut terminal = Circuit::new(2, 2).unwrap();
        terminal.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        assert!(!terminal.has_mid_circuit_measurement());

        let mut mid = Circuit::new(2, 2).unwrap();
        mid.h(0).unwrap().measure(0, 0).unwrap().x(1).unwrap();
        assert!(mid.has_mid_circuit_measurement());
    }

    #[test]
    fn test_inverse() {
        let mut circuit = Circuit::new(2, 0).unwrap();
        circuit.h(0).unwrap().t(1).unwrap().cx(0, 1).unwrap();

        let inverse = circuit.inverse().unwrap();
        let names: Vec<String> = inverse
            .operations()
            .iter()
            .filter_map(|op| op.gate().map(Gate::name))
            .collect();
        assert_eq!(names, vec!["cx", "tdg", "h"]);

        let mut measured = Circuit::new(1, 1).unwrap();
        measured.measure(0, 0).unwrap();
        assert!(matches!(measured.inverse(), Err(QuantumError::NotInvertible(_))));
    }

    #[test]
    fn test_extend() {
        let mut prep = Circuit::new(2, 0).unwrap();
        prep.h(0).unwrap().cx(0, 1).unwrap();

        let mut circuit = Circuit::new(3, 3).unwrap();
        circuit.extend(&prep).unwrap().measure_all().unwrap();
        assert_eq!(circuit.len(), 5);

        let wide = Circuit::new(4, 0).unwrap();
        assert!(circuit.extend(&wide).is_err());
    }

    #[test]
    fn test_failed_extend_leaves_circuit_unchanged() {
        let skew = GateMatrix::from_rows(vec![
            vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
            vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ])
        .unwrap();
        let mut other = Circuit::new(1, 0).unwrap();
        other.h(0).unwrap().x(0).unwrap().unitary(skew, &[0]).unwrap();

        let mut strict = Circuit::new(1, 0).unwrap().strict(true);
        strict.z(0).unwrap();
        let err = strict.extend(&other).unwrap_err();
        assert!(matches!(err, QuantumError::NonUnitaryGate { .. }));
        assert_eq!(strict.len(), 1);
        assert_eq!(
            strict.operations()[0].gate().map(|g| g.name()),
            Some("z".to_string())
        );
    }

    #[test]
    fn test_non_finite_angle_rejected_at_append() {
        let mut circuit = Circuit::new(2, 1).unwrap();
        assert!(matches!(
            circuit.rx(f64::NAN, 0),
            Err(QuantumError::InvalidParameter(_))
        ));
        assert!(circuit.rz(f64::INFINITY, 1).is_err());
        assert!(circuit.cp(f64::NEG_INFINITY, 0, 1).is_err());
        assert!(circuit.gate("ry", &[0], &[f64::NAN]).is_err());
        assert!(circuit.is_empty());

        // Everything that was accepted reads back from text
        circuit.rx(1e-300, 0).unwrap().p(-2.5e10, 1).unwrap();
        assert_eq!(Circuit::from_text(&circuit.to_text()).unwrap(), circuit);
    }

    #[test]
    fn test_display() {
        let mut circuit = Circuit::new(2, 2).unwrap();
        circuit.h(0).unwrap().cx(0, 1).unwrap();
        let text = circuit.to_string();
        assert!(text.starts_with("Circuit(2 qubits, 2 clbits, 2 operations)"));
        assert!(text.contains("cx q0, q1"));
    }
}
