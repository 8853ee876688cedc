//! JSON serialization types

use super::CIRCUIT_FORMAT_VERSION;
use crate::operation::{ClassicalCondition, Operation};
use crate::{Circuit, ClbitId, Gate, QuantumError, QubitId, Result};
use feynq_gates::{GateKind, GateMatrix};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Serialized representation of a gate kind
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SerializedGate {
    /// Parameterless gate (h, x, swap, ...)
    StandardGate { name: String },
    /// Rotation or phase gate
    ParameterizedGate { name: String, parameters: Vec<f64> },
    /// Custom matrix, row-major as [re, im] pairs
    CustomGate {
        matrix: Vec<[f64; 2]>,
        num_qubits: usize,
    },
}

/// Serialized gate application
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedGateOp {
    pub gate: SerializedGate,
    pub targets: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<usize>,
}

/// Serialized circuit operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SerializedOperation {
    Gate {
        #[serde(flatten)]
        op: SerializedGateOp,
    },
    Measure {
        qubit: usize,
        clbit: usize,
    },
    Conditional {
        #[serde(flatten)]
        op: SerializedGateOp,
        /// (clbit, expected value) pairs, all of which must hold
        condition: Vec<(usize, bool)>,
    },
}

/// Serialized circuit representation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SerializedCircuit {
    /// Format version for compatibility checking
    pub version: u32,
    pub num_qubits: usize,
    #[serde(default)]
    pub num_clbits: usize,
    #[serde(default)]
    pub strict: bool,
    pub operations: Vec<SerializedOperation>,
}

impl SerializedCircuit {
    /// Check version compatibility
    pub fn check_version(&self) -> Result<()> {
        if self.version > CIRCUIT_FORMAT_VERSION {
            return Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: self.version,
            });
        }
        Ok(())
    }

    /// Rebuild the circuit, validating every operation
    pub fn into_circuit(self) -> Result<Circuit> {
        self.check_version()?;
        let mut circuit = Circuit::with_capacity(self.num_qubits, self.num_clbits, self.operations.len())?
            .strict(self.strict);
        for op in &self.operations {
            circuit.append(create_operation(op)?)?;
        }
        Ok(circuit)
    }
}

impl From<&Circuit> for SerializedCircuit {
    fn from(circuit: &Circuit) -> Self {
        Self {
            version: CIRCUIT_FORMAT_VERSION,
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            strict: circuit.is_strict(),
            operations: circuit.operations().iter().map(serialize_operation).collect(),
        }
    }
}

fn serialize_gate_op(gate: &Gate) -> SerializedGateOp {
    let serialized = match gate.kind() {
        GateKind::Unitary(m) => SerializedGate::CustomGate {
            matrix: m.as_slice().iter().map(|c| [c.re, c.im]).collect(),
            num_qubits: m.num_qubits(),
        },
        kind => {
            let parameters = kind.params();
            if parameters.is_empty() {
                SerializedGate::StandardGate {
                    name: kind.name().to_string(),
                }
            } else {
                SerializedGate::ParameterizedGate {
                    name: kind.name().to_string(),
                    parameters,
                }
            }
        },
    };
    SerializedGateOp {
        gate: serialized,
        targets: gate.targets().iter().map(|q| q.index()).collect(),
        controls: gate.controls().iter().map(|q| q.index()).collect(),
    }
}

fn serialize_operation(op: &Operation) -> SerializedOperation {
    match op {
        Operation::Gate(gate) => SerializedOperation::Gate {
            op: serialize_gate_op(gate),
        },
        Operation::Measure { qubit, clbit } => SerializedOperation::Measure {
            qubit: qubit.index(),
            clbit: clbit.index(),
        },
        Operation::Conditional { gate, condition } => SerializedOperation::Conditional {
            op: serialize_gate_op(gate),
            condition: condition
                .terms()
                .iter()
                .map(|&(clbit, value)| (clbit.index(), value))
                .collect(),
        },
    }
}

fn create_gate(serialized: &SerializedGateOp) -> Result<Gate> {
    let kind = match &serialized.gate {
        SerializedGate::StandardGate { name } => GateKind::from_name(name, &[])?,
        SerializedGate::ParameterizedGate { name, parameters } => {
            GateKind::from_name(name, parameters)?
        },
        SerializedGate::CustomGate { matrix, num_qubits } => {
            let dim = u32::try_from(*num_qubits)
                .ok()
                .and_then(|n| 1usize.checked_shl(n))
                .ok_or_else(|| {
                    QuantumError::InvalidParameter(format!("custom gate on {} qubits", num_qubits))
                })?;
            let data = matrix.iter().map(|&[re, im]| Complex64::new(re, im)).collect();
            GateKind::Unitary(GateMatrix::from_flat(dim, data)?)
        },
    };
    let targets: Vec<QubitId> = serialized.targets.iter().map(|&q| QubitId::new(q)).collect();
    let controls: Vec<QubitId> = serialized.controls.iter().map(|&q| QubitId::new(q)).collect();
    Gate::controlled(kind, &controls, &targets)
}

fn create_operation(op: &SerializedOperation) -> Result<Operation> {
    Ok(match op {
        SerializedOperation::Gate { op } => Operation::Gate(create_gate(op)?),
        SerializedOperation::Measure { qubit, clbit } => Operation::measure(*qubit, *clbit),
        SerializedOperation::Conditional { op, condition } => Operation::Conditional {
            gate: create_gate(op)?,
            condition: ClassicalCondition::from_terms(
                condition.iter().map(|&(clbit, value)| (ClbitId::new(clbit), value)),
            ),
        },
    })
}

impl Circuit {
    /// Serialize circuit to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&SerializedCircuit::from(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Serialize circuit to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&SerializedCircuit::from(self))
            .map_err(|e| QuantumError::SerializationError(format!("JSON serialization failed: {}", e)))
    }

    /// Deserialize and validate a circuit from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let serialized: SerializedCircuit = serde_json::from_str(json).map_err(|e| {
            QuantumError::DeserializationError {
                line: e.line(),
                reason: e.to_string(),
            }
        })?;
        serialized.into_circuit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Circuit {
        let mut circuit = Circuit::new(3, 2).unwrap();
        circuit
            .h(0)
            .unwrap()
            .cx(0, 1)
            .unwrap()
            .rz(0.125, 2)
            .unwrap()
            .unitary(GateKind::Ry(0.3).matrix(), &[2])
            .unwrap()
            .measure(0, 0)
            .unwrap()
            .c_if(
                Gate::new(GateKind::X, &[QubitId::new(2)]).unwrap(),
                ClassicalCondition::bit(ClbitId::new(0), true),
            )
            .unwrap()
            .measure(2, 1)
            .unwrap();
        circuit
    }

    #[test]
    fn test_json_roundtrip() {
        let circuit = sample();
        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(circuit, back);
    }

    #[test]
    fn test_strict_flag_survives() {
        let mut circuit = Circuit::new(1, 0).unwrap().strict(true);
        circuit.h(0).unwrap();
        let back = Circuit::from_json(&circuit.to_json_pretty().unwrap()).unwrap();
        assert!(back.is_strict());
    }

    #[test]
    fn test_serialized_operation_shape() {
        let op = SerializedOperation::Measure { qubit: 1, clbit: 0 };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"type":"measure","qubit":1,"clbit":0}"#);
    }

    #[test]
    fn test_future_version_rejected() {
        let json = r#"{"version":99,"num_qubits":1,"operations":[]}"#;
        assert_eq!(
            Circuit::from_json(json),
            Err(QuantumError::VersionMismatch {
                expected: CIRCUIT_FORMAT_VERSION,
                actual: 99
            })
        );
    }

    #[test]
    fn test_invalid_index_rejected_on_load() {
        let json = r#"{"version":1,"num_qubits":1,"num_clbits":1,
            "operations":[{"type":"measure","qubit":3,"clbit":0}]}"#;
        assert_eq!(Circuit::from_json(json), Err(QuantumError::invalid_qubit(3, 1)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Circuit::from_json("{not json"),
            Err(QuantumError::DeserializationError { .. })
        ));
    }
}
