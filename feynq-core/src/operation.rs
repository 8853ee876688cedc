//! Circuit operations

use crate::{ClbitId, Gate, QubitId};
use smallvec::SmallVec;
use std::fmt;

/// Conjunction of classical-bit equality tests
///
/// Satisfied when every listed bit currently holds its expected value.
///
/// # Example
/// ```
/// use feynq_core::{ClassicalCondition, ClbitId};
///
/// let cond = ClassicalCondition::bit(ClbitId::new(0), true).and(ClbitId::new(1), false);
/// assert!(cond.evaluate(&[true, false]));
/// assert!(!cond.evaluate(&[true, true]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClassicalCondition {
    terms: SmallVec<[(ClbitId, bool); 2]>,
}

impl ClassicalCondition {
    /// Single test: `clbit == value`
    pub fn bit(clbit: ClbitId, value: bool) -> Self {
        let mut terms = SmallVec::new();
        terms.push((clbit, value));
        Self { terms }
    }

    pub fn and(mut self, clbit: ClbitId, value: bool) -> Self {
        self.terms.push((clbit, value));
        self
    }

    pub fn from_terms(terms: impl IntoIterator<Item = (ClbitId, bool)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    #[inline]
    pub fn terms(&self) -> &[(ClbitId, bool)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate against the classical register contents
    ///
    /// Bits beyond the register read as 0.
    pub fn evaluate(&self, bits: &[bool]) -> bool {
        self.terms
            .iter()
            .all(|&(clbit, value)| bits.get(clbit.index()).copied().unwrap_or(false) == value)
    }
}

impl fmt::Display for ClassicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (clbit, value)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "c[{}]={}", clbit.index(), u8::from(*value))?;
        }
        Ok(())
    }
}

/// One step of a circuit
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Unconditional gate
    Gate(Gate),
    /// Measure `qubit` in the computational basis into `clbit`, collapsing the state
    Measure { qubit: QubitId, clbit: ClbitId },
    /// Gate applied only when `condition` holds at that point of the shot
    Conditional {
        gate: Gate,
        condition: ClassicalCondition,
    },
}

impl Operation {
    pub fn measure(qubit: usize, clbit: usize) -> Self {
        Operation::Measure {
            qubit: QubitId::new(qubit),
            clbit: ClbitId::new(clbit),
        }
    }

    /// The gate carried by this operation, if any
    pub fn gate(&self) -> Option<&Gate> {
        match self {
            Operation::Gate(gate) | Operation::Conditional { gate, .. } => Some(gate),
            Operation::Measure { .. } => None,
        }
    }

    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Gate(gate)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(gate) => write!(f, "{}", gate),
            Operation::Measure { qubit, clbit } => write!(f, "measure {} -> {}", qubit, clbit),
            Operation::Conditional { gate, condition } => {
                write!(f, "if({}) {}", condition, gate)
            },
        }
    }
}
