//! Dense amplitude vector

use crate::error::{Result, StateError};
use crate::kernels;
use feynq_gates::GateMatrix;
use num_complex::Complex64;

pub use feynq_gates::MAX_QUBITS;

/// Quantum state as 2^n complex amplitudes
///
/// Bit `i` of an amplitude's index is the value of qubit `i` in that basis
/// state, so index 0 is |0…0⟩.
///
/// # Example
///
/// ```
/// use feynq_state::StateVector;
///
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
    parallel: bool,
}

impl StateVector {
    /// Create a state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// `TooManyQubits` above [`MAX_QUBITS`], `AllocationError` if the
    /// amplitude buffer cannot be reserved.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: num_qubits,
                maximum: MAX_QUBITS,
            });
        }

        let dimension = 1usize << num_qubits;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(dimension)
            .map_err(|_| StateError::AllocationError {
                size: dimension * std::mem::size_of::<Complex64>(),
            })?;
        amplitudes.resize(dimension, Complex64::new(0.0, 0.0));
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            amplitudes,
            parallel: false,
        })
    }

    /// Create a state vector from raw amplitude data
    ///
    /// The amplitudes are taken as given; call [`normalize`](Self::normalize)
    /// if they are not already unit-norm.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let dimension = amplitudes.len();
        if dimension < 1 || !dimension.is_power_of_two() {
            return Err(StateError::InvalidDimension { dimension });
        }
        let num_qubits = dimension.trailing_zeros() as usize;
        if num_qubits > MAX_QUBITS {
            return Err(StateError::TooManyQubits {
                requested: num_qubits,
                maximum: MAX_QUBITS,
            });
        }
        Ok(Self {
            num_qubits,
            amplitudes,
            parallel: false,
        })
    }

    /// Split gate kernels across the rayon pool
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    #[inline]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Sum of squared magnitudes
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Scale all amplitudes so that the norm equals 1
    ///
    /// Returns the norm before scaling. A (numerically) zero vector is left
    /// untouched.
    pub fn normalize(&mut self) -> f64 {
        let norm = self.norm();
        if norm > 1e-10 {
            let inv_norm = 1.0 / norm;
            for amplitude in &mut self.amplitudes {
                *amplitude *= inv_norm;
            }
        }
        norm
    }

    /// True if |Σ|a|² - 1| <= epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() <= epsilon
    }

    /// Reset the state to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Apply `matrix` to `targets`, restricted to basis states where every
    /// control qubit is 1
    ///
    /// The first target is the most significant bit of the matrix's local
    /// index. No 2^n × 2^n operator is ever formed: a k-target gate updates
    /// disjoint groups of 2^k amplitudes.
    ///
    /// # Errors
    /// - `InvalidQubitIndex` for any index outside [0, n)
    /// - `DuplicateQubit` if a qubit appears twice across targets and controls
    /// - `DimensionMismatch` if the matrix is not 2^k × 2^k for k targets
    pub fn apply_gate(
        &mut self,
        matrix: &GateMatrix,
        targets: &[usize],
        controls: &[usize],
    ) -> Result<()> {
        let mut seen = 0usize;
        for &q in targets.iter().chain(controls) {
            self.check_qubit(q)?;
            if seen & (1 << q) != 0 {
                return Err(StateError::DuplicateQubit { index: q });
            }
            seen |= 1 << q;
        }

        // Distinct in-range targets, so the shift cannot overflow
        let expected = 1usize << targets.len();
        if targets.is_empty() || matrix.dimension() != expected {
            return Err(StateError::DimensionMismatch {
                expected,
                actual: matrix.dimension(),
            });
        }

        let control_mask = controls.iter().fold(0usize, |mask, &q| mask | (1 << q));
        match matrix.as_2x2() {
            Some(m) => kernels::apply_single_qubit(
                &mut self.amplitudes,
                &m,
                targets[0],
                control_mask,
                self.parallel,
            ),
            None => kernels::apply_multi_qubit(
                &mut self.amplitudes,
                matrix,
                targets,
                control_mask,
                self.parallel,
            ),
        }
        Ok(())
    }
}
