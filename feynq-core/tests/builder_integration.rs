//! Integration tests for circuit building and serialization

use feynq_core::{Circuit, ClassicalCondition, ClbitId, Gate, Operation, QuantumError, QubitId};
use feynq_gates::{GateKind, GateMatrix};
use proptest::prelude::*;

#[test]
fn test_fluent_builder_chain() {
    let mut circuit = Circuit::new(3, 3).unwrap();
    circuit
        .h(0)
        .unwrap()
        .cx(0, 1)
        .unwrap()
        .ccx(0, 1, 2)
        .unwrap()
        .mcz(&[0, 1], 2)
        .unwrap()
        .measure_all()
        .unwrap();

    assert_eq!(circuit.len(), 7);
    let gates: Vec<String> = circuit
        .operations()
        .iter()
        .filter_map(|op| op.gate().map(Gate::name))
        .collect();
    assert_eq!(gates, vec!["h", "cx", "ccx", "ccz"]);
}

#[test]
fn test_dimension_mismatch_at_append() {
    let mut circuit = Circuit::new(3, 0).unwrap();
    let err = circuit.unitary(GateMatrix::identity(2), &[0, 1, 2]).unwrap_err();
    assert_eq!(
        err,
        QuantumError::DimensionMismatch {
            expected: 8,
            actual: 4
        }
    );
}

#[test]
fn test_text_and_json_agree() {
    let mut circuit = Circuit::new(3, 3).unwrap();
    circuit
        .h(0)
        .unwrap()
        .cx(0, 1)
        .unwrap()
        .measure(0, 0)
        .unwrap()
        .c_if(
            Gate::controlled(GateKind::Phase(0.75), &[QubitId::new(1)], &[QubitId::new(2)]).unwrap(),
            ClassicalCondition::bit(ClbitId::new(0), true),
        )
        .unwrap()
        .measure_all()
        .unwrap();

    let from_text = Circuit::from_text(&circuit.to_text()).unwrap();
    let from_json = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
    assert_eq!(from_text, circuit);
    assert_eq!(from_json, circuit);
}

fn arb_operation(num_qubits: usize) -> impl Strategy<Value = Operation> {
    let single = (0..7usize, 0..num_qubits, -6.3f64..6.3).prop_map(|(k, q, theta)| {
        let kind = match k {
            0 => GateKind::H,
            1 => GateKind::X,
            2 => GateKind::Sdg,
            3 => GateKind::T,
            4 => GateKind::Rx(theta),
            5 => GateKind::Ry(theta),
            _ => GateKind::Phase(theta),
        };
        Operation::Gate(Gate::new(kind, &[QubitId::new(q)]).unwrap())
    });
    let pair = (0..num_qubits, 1..num_qubits, any::<bool>()).prop_map(move |(a, offset, swap)| {
        let b = (a + offset) % num_qubits;
        let gate = if swap {
            Gate::new(GateKind::Swap, &[QubitId::new(a), QubitId::new(b)])
        } else {
            Gate::controlled(GateKind::Rz(0.3), &[QubitId::new(a)], &[QubitId::new(b)])
        };
        Operation::Gate(gate.unwrap())
    });
    let measure = (0..num_qubits).prop_map(|q| Operation::measure(q, q));
    prop_oneof![4 => single, 2 => pair, 1 => measure]
}

proptest! {
    #[test]
    fn prop_text_roundtrip(ops in prop::collection::vec(arb_operation(3), 0..24)) {
        let mut circuit = Circuit::new(3, 3).unwrap();
        for op in ops {
            circuit.append(op).unwrap();
        }
        let back = Circuit::from_text(&circuit.to_text()).unwrap();
        prop_assert_eq!(back, circuit);
    }

    #[test]
    fn prop_double_inverse_is_identity(ops in prop::collection::vec(arb_operation(4), 0..16)) {
        let mut circuit = Circuit::new(4, 4).unwrap();
        for op in ops.into_iter().filter(|op| !op.is_measurement()) {
            circuit.append(op).unwrap();
        }
        let twice = circuit.inverse().unwrap().inverse().unwrap();
        prop_assert_eq!(twice.len(), circuit.len());
        for (a, b) in twice.operations().iter().zip(circuit.operations()) {
            prop_assert_eq!(a.gate().map(Gate::name), b.gate().map(Gate::name));
        }
    }
}
