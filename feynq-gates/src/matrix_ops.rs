//! Dense matrix helpers for gate matrices
//!
//! All matrices are square and stored as flattened row-major slices.
//! These run at circuit-build time only; the simulator never multiplies
//! full-register matrices.

use num_complex::Complex64;

#[inline]
fn side(matrix: &[Complex64]) -> usize {
    let n = (matrix.len() as f64).sqrt().round() as usize;
    debug_assert_eq!(n * n, matrix.len(), "matrix must be square");
    n
}

/// Create an identity matrix of the given size
pub fn identity_matrix(size: usize) -> Vec<Complex64> {
    let mut matrix = vec![Complex64::new(0.0, 0.0); size * size];
    for i in 0..size {
        matrix[i * size + i] = Complex64::new(1.0, 0.0);
    }
    matrix
}

/// Multiply two square matrices of equal size: C = A · B
pub fn matrix_multiply(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let n = side(a);
    debug_assert_eq!(a.len(), b.len());

    let mut result = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        for k in 0..n {
            let a_ik = a[i * n + k];
            if a_ik == Complex64::new(0.0, 0.0) {
                continue;
            }
            for j in 0..n {
                result[i * n + j] += a_ik * b[k * n + j];
            }
        }
    }
    result
}

/// Conjugate transpose: (A†)ᵢⱼ = (Aⱼᵢ)*
pub fn matrix_adjoint(matrix: &[Complex64]) -> Vec<Complex64> {
    let n = side(matrix);
    let mut result = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        for j in 0..n {
            result[i * n + j] = matrix[j * n + i].conj();
        }
    }
    result
}

/// Raise a matrix to a non-negative integer power by repeated squaring
pub fn matrix_power(matrix: &[Complex64], mut exponent: u64) -> Vec<Complex64> {
    let n = side(matrix);
    let mut result = identity_matrix(n);
    let mut base = matrix.to_vec();

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = matrix_multiply(&result, &base);
        }
        exponent >>= 1;
        if exponent > 0 {
            base = matrix_multiply(&base, &base);
        }
    }
    result
}

/// Largest entry-wise deviation of U†U from the identity
pub fn unitarity_deviation(matrix: &[Complex64]) -> f64 {
    let n = side(matrix);
    let u_dagger_u = matrix_multiply(&matrix_adjoint(matrix), matrix);

    let mut max_deviation: f64 = 0.0;
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let diff = (u_dagger_u[i * n + j] - Complex64::new(expected, 0.0)).norm();
            max_deviation = max_deviation.max(diff);
        }
    }
    max_deviation
}

/// Check if a matrix is unitary (U†U = I) within `tolerance`
pub fn is_unitary(matrix: &[Complex64], tolerance: f64) -> bool {
    unitarity_deviation(matrix) <= tolerance
}

/// Check that every entry is finite
pub fn is_finite(matrix: &[Complex64]) -> bool {
    matrix.iter().all(|c| c.re.is_finite() && c.im.is_finite())
}
