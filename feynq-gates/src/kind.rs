//! Closed set of gate kinds with typed parameters
//!
//! A [`GateKind`] is resolved to its [`GateMatrix`] once, when a gate is
//! appended to a circuit. Controls are not part of the kind; a controlled-X
//! is `GateKind::X` plus one control qubit.

use crate::error::{GateError, Result};
use crate::matrices;
use crate::matrix::GateMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    Identity,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    /// Rotation about X by θ
    Rx(f64),
    /// Rotation about Y by θ
    Ry(f64),
    /// Rotation about Z by θ
    Rz(f64),
    /// diag(1, e^(iθ))
    Phase(f64),
    Swap,
    /// Arbitrary 2^k × 2^k matrix on k targets
    Unitary(GateMatrix),
}

impl GateKind {
    /// Canonical lower-case name used by the instruction format
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Identity => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::Rx(_) => "rx",
            GateKind::Ry(_) => "ry",
            GateKind::Rz(_) => "rz",
            GateKind::Phase(_) => "p",
            GateKind::Swap => "swap",
            GateKind::Unitary(_) => "unitary",
        }
    }

    /// Number of target qubits
    pub fn num_qubits(&self) -> usize {
        match self {
            GateKind::Swap => 2,
            GateKind::Unitary(m) => m.num_qubits(),
            _ => 1,
        }
    }

    /// Resolve to a matrix
    pub fn matrix(&self) -> GateMatrix {
        match self {
            GateKind::Identity => GateMatrix::from_2x2(&matrices::IDENTITY),
            GateKind::X => GateMatrix::from_2x2(&matrices::PAULI_X),
            GateKind::Y => GateMatrix::from_2x2(&matrices::PAULI_Y),
            GateKind::Z => GateMatrix::from_2x2(&matrices::PAULI_Z),
            GateKind::H => GateMatrix::from_2x2(&matrices::HADAMARD),
            GateKind::S => GateMatrix::from_2x2(&matrices::S_GATE),
            GateKind::Sdg => GateMatrix::from_2x2(&matrices::S_GATE_DAGGER),
            GateKind::T => GateMatrix::from_2x2(&matrices::T_GATE),
            GateKind::Tdg => GateMatrix::from_2x2(&matrices::T_GATE_DAGGER),
            GateKind::Rx(theta) => GateMatrix::from_2x2(&matrices::rotation_x(*theta)),
            GateKind::Ry(theta) => GateMatrix::from_2x2(&matrices::rotation_y(*theta)),
            GateKind::Rz(theta) => GateMatrix::from_2x2(&matrices::rotation_z(*theta)),
            GateKind::Phase(theta) => GateMatrix::from_2x2(&matrices::phase(*theta)),
            GateKind::Swap => GateMatrix::from_4x4(&matrices::SWAP),
            GateKind::Unitary(m) => m.clone(),
        }
    }

    /// The kind whose matrix is the adjoint of this one
    pub fn inverse(&self) -> GateKind {
        match self {
            GateKind::S => GateKind::Sdg,
            GateKind::Sdg => GateKind::S,
            GateKind::T => GateKind::Tdg,
            GateKind::Tdg => GateKind::T,
            GateKind::Rx(theta) => GateKind::Rx(-theta),
            GateKind::Ry(theta) => GateKind::Ry(-theta),
            GateKind::Rz(theta) => GateKind::Rz(-theta),
            GateKind::Phase(theta) => GateKind::Phase(-theta),
            GateKind::Unitary(m) => GateKind::Unitary(m.adjoint()),
            other => other.clone(),
        }
    }

    /// Numeric parameters as written by the instruction format
    ///
    /// Rotations carry their angle. A custom matrix is flattened row-major as
    /// interleaved real/imaginary parts.
    pub fn params(&self) -> Vec<f64> {
        match self {
            GateKind::Rx(theta) | GateKind::Ry(theta) | GateKind::Rz(theta) | GateKind::Phase(theta) => {
                vec![*theta]
            },
            GateKind::Unitary(m) => m.as_slice().iter().flat_map(|c| [c.re, c.im]).collect(),
            _ => Vec::new(),
        }
    }

    /// Look a kind up by its canonical name
    pub fn from_name(name: &str, params: &[f64]) -> Result<GateKind> {
        let expect = |n: usize| -> Result<()> {
            if params.len() != n {
                return Err(GateError::InvalidParameters {
                    gate: name.to_string(),
                    expected: n,
                    actual: params.len(),
                });
            }
            Ok(())
        };

        let kind = match name {
            "id" => GateKind::Identity,
            "x" => GateKind::X,
            "y" => GateKind::Y,
            "z" => GateKind::Z,
            "h" => GateKind::H,
            "s" => GateKind::S,
            "sdg" => GateKind::Sdg,
            "t" => GateKind::T,
            "tdg" => GateKind::Tdg,
            "swap" => GateKind::Swap,
            "rx" | "ry" | "rz" | "p" => {
                expect(1)?;
                let theta = params[0];
                if !theta.is_finite() {
                    return Err(GateError::NonFiniteAngle {
                        gate: name.to_string(),
                        value: theta,
                    });
                }
                match name {
                    "rx" => GateKind::Rx(theta),
                    "ry" => GateKind::Ry(theta),
                    "rz" => GateKind::Rz(theta),
                    _ => GateKind::Phase(theta),
                }
            },
            "unitary" => {
                let entries = params.len() / 2;
                let dim = (entries as f64).sqrt().round() as usize;
                if params.len() % 2 != 0 || dim * dim != entries {
                    return Err(GateError::NotSquare {
                        rows: dim,
                        cols: if dim == 0 { 0 } else { entries / dim },
                    });
                }
                let data = params
                    .chunks_exact(2)
                    .map(|pair| Complex64::new(pair[0], pair[1]))
                    .collect();
                return Ok(GateKind::Unitary(GateMatrix::from_flat(dim, data)?));
            },
            other => return Err(GateError::UnknownGate(other.to_string())),
        };

        if !matches!(kind, GateKind::Rx(_) | GateKind::Ry(_) | GateKind::Rz(_) | GateKind::Phase(_)) {
            expect(0)?;
        }
        Ok(kind)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Rx(theta) | GateKind::Ry(theta) | GateKind::Rz(theta) | GateKind::Phase(theta) => {
                write!(f, "{}({:.4})", self.name(), theta)
            },
            GateKind::Unitary(m) => write!(f, "unitary[{}x{}]", m.dimension(), m.dimension()),
            _ => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn all_kinds() -> Vec<GateKind> {
        vec![
            GateKind::Identity,
            GateKind::X,
            GateKind::Y,
            GateKind::Z,
            GateKind::H,
            GateKind::S,
            GateKind::Sdg,
            GateKind::T,
            GateKind::Tdg,
            GateKind::Rx(0.3),
            GateKind::Ry(-1.2),
            GateKind::Rz(PI / 5.0),
            GateKind::Phase(2.0),
            GateKind::Swap,
            GateKind::Unitary(GateKind::Ry(0.7).matrix()),
        ]
    }

    #[test]
    fn test_every_kind_is_unitary() {
        for kind in all_kinds() {
            assert!(kind.matrix().is_unitary(1e-12), "{} not unitary", kind);
            assert_eq!(kind.matrix().num_qubits(), kind.num_qubits());
        }
    }

    #[test]
    fn test_inverse_matrix_is_adjoint() {
        for kind in all_kinds() {
            let product = kind.matrix().multiply(&kind.inverse().matrix()).unwrap();
            let id = GateMatrix::identity(kind.num_qubits());
            for (a, b) in product.as_slice().iter().zip(id.as_slice()) {
                assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
                assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_name_params_roundtrip() {
        for kind in all_kinds() {
            let back = GateKind::from_name(kind.name(), &kind.params()).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_from_name_errors() {
        assert_eq!(
            GateKind::from_name("foo", &[]),
            Err(GateError::UnknownGate("foo".into()))
        );
        assert!(matches!(
            GateKind::from_name("rx", &[]),
            Err(GateError::InvalidParameters { expected: 1, actual: 0, .. })
        ));
        assert!(matches!(
            GateKind::from_name("h", &[1.0]),
            Err(GateError::InvalidParameters { expected: 0, actual: 1, .. })
        ));
        assert!(GateKind::from_name("unitary", &[1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_from_name_rejects_non_finite_angles() {
        for name in ["rx", "ry", "rz", "p"] {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert!(matches!(
                    GateKind::from_name(name, &[value]),
                    Err(GateError::NonFiniteAngle { .. })
                ));
            }
        }
        let msg = GateKind::from_name("rx", &[f64::NAN]).unwrap_err().to_string();
        assert!(msg.contains("'rx'"));
    }

    proptest! {
        #[test]
        fn prop_rotations_unitary_for_any_finite_angle(theta in -1.0e3f64..1.0e3) {
            for kind in [GateKind::Rx(theta), GateKind::Ry(theta), GateKind::Rz(theta), GateKind::Phase(theta)] {
                prop_assert!(kind.matrix().is_unitary(1e-10));
            }
        }

        #[test]
        fn prop_inverse_undoes_rotation(theta in -10.0f64..10.0) {
            for kind in [GateKind::Rx(theta), GateKind::Ry(theta), GateKind::Rz(theta), GateKind::Phase(theta)] {
                let product = kind.inverse().matrix().multiply(&kind.matrix()).unwrap();
                let id = GateMatrix::identity(1);
                for (a, b) in product.as_slice().iter().zip(id.as_slice()) {
                    prop_assert!((a - b).norm() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(GateKind::H.to_string(), "h");
        assert_eq!(GateKind::Rz(0.5).to_string(), "rz(0.5000)");
    }
}
