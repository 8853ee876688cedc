//! Owned square gate matrix

use crate::error::{GateError, Result};
use crate::matrix_ops;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2^k × 2^k complex matrix stored row-major
///
/// Row/column index bit `k-1-j` corresponds to the `j`-th target qubit of the
/// gate the matrix belongs to, i.e. the first target is the most significant
/// bit of the local index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct GateMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

/// Wire form; validated on the way back in
#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    dim: usize,
    data: Vec<Complex64>,
}

impl TryFrom<MatrixRepr> for GateMatrix {
    type Error = GateError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        GateMatrix::from_flat(repr.dim, repr.data)
    }
}

impl From<GateMatrix> for MatrixRepr {
    fn from(m: GateMatrix) -> Self {
        MatrixRepr {
            dim: m.dim,
            data: m.data,
        }
    }
}

impl GateMatrix {
    /// Build from a flattened row-major buffer of `dim * dim` entries
    pub fn from_flat(dim: usize, data: Vec<Complex64>) -> Result<Self> {
        if dim < 2 || !dim.is_power_of_two() {
            return Err(GateError::InvalidSize { size: dim });
        }
        if data.len() != dim * dim {
            return Err(GateError::NotSquare {
                rows: dim,
                cols: data.len() / dim,
            });
        }
        if !matrix_ops::is_finite(&data) {
            return Err(GateError::InvalidValues);
        }
        Ok(Self { dim, data })
    }

    /// Build from a list of rows
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Result<Self> {
        let dim = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != dim) {
            return Err(GateError::NotSquare {
                rows: dim,
                cols: bad.len(),
            });
        }
        Self::from_flat(dim, rows.into_iter().flatten().collect())
    }

    /// Wrap a 2×2 constant
    pub fn from_2x2(m: &[[Complex64; 2]; 2]) -> Self {
        Self {
            dim: 2,
            data: m.iter().flatten().copied().collect(),
        }
    }

    /// Wrap a 4×4 constant
    pub fn from_4x4(m: &[[Complex64; 4]; 4]) -> Self {
        Self {
            dim: 4,
            data: m.iter().flatten().copied().collect(),
        }
    }

    /// Identity on `num_qubits` qubits
    pub fn identity(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits.max(1);
        Self {
            dim,
            data: matrix_ops::identity_matrix(dim),
        }
    }

    /// Side length (2^k)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Number of qubits the matrix acts on (k)
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Row-major entries
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// The matrix as a 2×2 array, if it is single-qubit
    pub fn as_2x2(&self) -> Option<[[Complex64; 2]; 2]> {
        if self.dim != 2 {
            return None;
        }
        Some([[self.data[0], self.data[1]], [self.data[2], self.data[3]]])
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        Self {
            dim: self.dim,
            data: matrix_ops::matrix_adjoint(&self.data),
        }
    }

    /// Matrix product `self · other`, or `None` if sizes differ
    pub fn multiply(&self, other: &GateMatrix) -> Option<Self> {
        if self.dim != other.dim {
            return None;
        }
        Some(Self {
            dim: self.dim,
            data: matrix_ops::matrix_multiply(&self.data, &other.data),
        })
    }

    /// Integer power `self^exponent`
    pub fn power(&self, exponent: u64) -> Self {
        Self {
            dim: self.dim,
            data: matrix_ops::matrix_power(&self.data, exponent),
        }
    }

    /// Largest entry-wise deviation of U†U from I
    pub fn unitarity_deviation(&self) -> f64 {
        matrix_ops::unitarity_deviation(&self.data)
    }

    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.unitarity_deviation() <= tolerance
    }

    /// Fail with `NotUnitary` when the deviation exceeds `tolerance`
    pub fn validate_unitary(&self, tolerance: f64) -> Result<()> {
        let max_deviation = self.unitarity_deviation();
        if max_deviation > tolerance {
            return Err(GateError::NotUnitary {
                max_deviation,
                tolerance,
            });
        }
        Ok(())
    }
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dim {
            write!(f, "[")?;
            for col in 0..self.dim {
                if col > 0 {
                    write!(f, ", ")?;
                }
                let c = self.get(row, col);
                write!(f, "{:.4}{:+.4}i", c.re, c.im)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
