//! Computational-basis measurement and collapse

use crate::error::{Result, StateError};
use crate::StateVector;
use num_complex::Complex64;

/// Outcome probabilities at or below this are treated as impossible
pub const DEGENERATE_PROBABILITY: f64 = 1e-12;

/// Result of a single-qubit measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    /// Observed bit
    pub outcome: bool,
    /// Probability of that outcome before collapse
    pub probability: f64,
}

impl StateVector {
    /// Marginal probability of reading 1 on `qubit`
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64> {
        let (_, p1) = self.marginals(qubit)?;
        Ok(p1)
    }

    /// |amplitude|² for every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes().iter().map(|a| a.norm_sqr()).collect()
    }

    fn marginals(&self, qubit: usize) -> Result<(f64, f64)> {
        if qubit >= self.num_qubits() {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits(),
            });
        }
        let mask = 1usize << qubit;
        let (mut p0, mut p1) = (0.0, 0.0);
        for (idx, amp) in self.amplitudes().iter().enumerate() {
            if idx & mask == 0 {
                p0 += amp.norm_sqr();
            } else {
                p1 += amp.norm_sqr();
            }
        }
        Ok((p0, p1))
    }

    /// Measure `qubit` and collapse the state
    ///
    /// `random_value` is a uniform draw from [0, 1); the outcome is 1 when it
    /// falls below P(1). If the selected outcome has (numerically) zero
    /// probability the complementary outcome is taken instead, so collapse
    /// never divides by zero.
    ///
    /// # Errors
    /// `InvalidQubitIndex` for a bad index, `NotNormalized` if the state has
    /// zero norm.
    pub fn measure_qubit(&mut self, qubit: usize, random_value: f64) -> Result<MeasurementResult> {
        let (p0, p1) = self.marginals(qubit)?;
        if !(p0 + p1).is_finite() {
            return Err(StateError::NotNormalized {
                norm: (p0 + p1).sqrt(),
            });
        }

        let mut outcome = random_value < p1;
        let mut probability = if outcome { p1 } else { p0 };
        if probability <= DEGENERATE_PROBABILITY {
            outcome = !outcome;
            probability = if outcome { p1 } else { p0 };
        }
        if probability <= DEGENERATE_PROBABILITY {
            return Err(StateError::NotNormalized {
                norm: (p0 + p1).sqrt(),
            });
        }

        let inv_norm = 1.0 / probability.sqrt();
        let keep = usize::from(outcome);
        for (idx, amp) in self.amplitudes_mut().iter_mut().enumerate() {
            if (idx >> qubit) & 1 != keep {
                *amp = Complex64::new(0.0, 0.0);
            } else {
                *amp *= inv_norm;
            }
        }

        Ok(MeasurementResult {
            outcome,
            probability,
        })
    }
}
