//! Gate records: a kind, its resolved matrix, and the qubits it touches

use crate::{QuantumError, QubitId, Result};
use feynq_gates::{GateKind, GateMatrix};
use smallvec::SmallVec;
use std::fmt;

/// An immutable gate application
///
/// The matrix acts on `targets` (first target = most significant bit of the
/// local matrix index) and is applied only to basis states where every
/// control qubit is 1. Indices are positional; a gate does not know which
/// circuit it belongs to.
///
/// # Example
/// ```
/// use feynq_core::{Gate, QubitId};
/// use feynq_gates::GateKind;
///
/// let cx = Gate::controlled(GateKind::X, &[QubitId::new(0)], &[QubitId::new(1)]).unwrap();
/// assert_eq!(cx.name(), "cx");
/// assert_eq!(cx.num_qubits(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    kind: GateKind,
    matrix: GateMatrix,
    targets: SmallVec<[QubitId; 2]>,
    controls: SmallVec<[QubitId; 2]>,
}

impl Gate {
    /// Uncontrolled gate on `targets`
    pub fn new(kind: GateKind, targets: &[QubitId]) -> Result<Self> {
        Self::controlled(kind, &[], targets)
    }

    /// Gate on `targets`, active only when all `controls` are 1
    ///
    /// # Errors
    /// - `DimensionMismatch` when a custom matrix does not fit the target count
    /// - `InvalidQubitCount` when a standard kind gets the wrong target count
    /// - `DuplicateQubit` when any qubit appears twice across controls and targets
    /// - `InvalidParameter` when a rotation or phase angle is NaN or infinite
    pub fn controlled(kind: GateKind, controls: &[QubitId], targets: &[QubitId]) -> Result<Self> {
        if let GateKind::Rx(theta) | GateKind::Ry(theta) | GateKind::Rz(theta) | GateKind::Phase(theta) =
            kind
        {
            if !theta.is_finite() {
                return Err(QuantumError::InvalidParameter(format!(
                    "{} angle must be finite, got {}",
                    kind.name(),
                    theta
                )));
            }
        }

        let expected = kind.num_qubits();
        if targets.len() != expected {
            if let GateKind::Unitary(m) = &kind {
                return Err(QuantumError::DimensionMismatch {
                    expected: 1usize.checked_shl(targets.len() as u32).unwrap_or(0),
                    actual: m.dimension(),
                });
            }
            return Err(QuantumError::invalid_qubit_count(
                kind.name(),
                expected,
                targets.len(),
            ));
        }

        let all: SmallVec<[QubitId; 4]> = controls.iter().chain(targets).copied().collect();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                if all[i] == all[j] {
                    return Err(QuantumError::DuplicateQubit(all[i]));
                }
            }
        }

        let matrix = kind.matrix();
        Ok(Self {
            kind,
            matrix,
            targets: SmallVec::from_slice(targets),
            controls: SmallVec::from_slice(controls),
        })
    }

    /// Resolve a gate by its instruction-format name
    ///
    /// Each leading `c` of `name` adds one control, and the controls come
    /// first in `qubits` (`ccx` on `[0, 1, 2]` targets qubit 2).
    ///
    /// # Example
    /// ```
    /// use feynq_core::{Gate, QubitId};
    ///
    /// let qubits = [QubitId::new(0), QubitId::new(1)];
    /// let crz = Gate::from_name("crz", &qubits, &[0.5]).unwrap();
    /// assert_eq!(crz.controls(), &qubits[..1]);
    /// ```
    pub fn from_name(name: &str, qubits: &[QubitId], params: &[f64]) -> Result<Self> {
        // No base gate name starts with 'c'
        let base = name.trim_start_matches('c');
        let num_controls = name.len() - base.len();
        if qubits.len() <= num_controls {
            return Err(QuantumError::invalid_qubit_count(
                name,
                num_controls + 1,
                qubits.len(),
            ));
        }
        let kind = GateKind::from_name(base, params)?;
        let (controls, targets) = qubits.split_at(num_controls);
        Self::controlled(kind, controls, targets)
    }

    /// Custom matrix on `targets`
    pub fn unitary(matrix: GateMatrix, targets: &[QubitId]) -> Result<Self> {
        Self::new(GateKind::Unitary(matrix), targets)
    }

    #[inline]
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Resolved 2^k × 2^k matrix over the targets
    #[inline]
    pub fn matrix(&self) -> &GateMatrix {
        &self.matrix
    }

    #[inline]
    pub fn targets(&self) -> &[QubitId] {
        &self.targets
    }

    #[inline]
    pub fn controls(&self) -> &[QubitId] {
        &self.controls
    }

    /// Controls followed by targets
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Total qubits touched, controls included
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.controls.len() + self.targets.len()
    }

    /// Bit mask of all control qubits
    pub fn control_mask(&self) -> usize {
        self.controls.iter().fold(0, |mask, q| mask | q.mask())
    }

    /// Name with one `c` prefix per control (`x` → `cx` → `ccx`)
    pub fn name(&self) -> String {
        let mut name = "c".repeat(self.controls.len());
        name.push_str(self.kind.name());
        name
    }

    /// Same qubits, adjoint matrix
    pub fn inverse(&self) -> Self {
        let kind = self.kind.inverse();
        let matrix = kind.matrix();
        Self {
            kind,
            matrix,
            targets: self.targets.clone(),
            controls: self.controls.clone(),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        let params = self.kind.params();
        if !params.is_empty() && !matches!(self.kind, GateKind::Unitary(_)) {
            write!(f, "(")?;
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", p)?;
            }
            write!(f, ")")?;
        }
        for (i, q) in self.qubits().enumerate() {
            write!(f, "{}{}", if i == 0 { " " } else { ", " }, q)?;
        }
        Ok(())
    }
}
