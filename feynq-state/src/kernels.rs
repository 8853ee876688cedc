//! Gate application kernels
//!
//! Both kernels split the amplitude slice into aligned chunks that contain
//! every amplitude a single update touches, so chunks are independent and can
//! be handed to rayon without synchronization.

use feynq_gates::GateMatrix;
use num_complex::Complex64;
use rayon::prelude::*;

fn for_each_chunk<F>(state: &mut [Complex64], chunk_len: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [Complex64]) + Send + Sync,
{
    if parallel && state.len() > chunk_len {
        state
            .par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(idx, chunk)| f(idx * chunk_len, chunk));
    } else {
        for (idx, chunk) in state.chunks_mut(chunk_len).enumerate() {
            f(idx * chunk_len, chunk);
        }
    }
}

/// Apply a 2×2 matrix to `target`, on pairs whose index has every bit of
/// `control_mask` set
///
/// Pairs (i, i | 1<<target) live in chunks of 2·stride.
pub fn apply_single_qubit(
    state: &mut [Complex64],
    gate: &[[Complex64; 2]; 2],
    target: usize,
    control_mask: usize,
    parallel: bool,
) {
    let stride = 1usize << target;
    let [[m00, m01], [m10, m11]] = *gate;

    for_each_chunk(state, stride * 2, parallel, |base, chunk| {
        for j in 0..stride {
            if (base + j) & control_mask != control_mask {
                continue;
            }
            let a = chunk[j];
            let b = chunk[j + stride];
            chunk[j] = m00 * a + m01 * b;
            chunk[j + stride] = m10 * a + m11 * b;
        }
    });
}

/// Local-index → amplitude-offset table for a k-target gate
///
/// Bit `k-1-j` of the local index selects target `j`.
fn group_offsets(targets: &[usize]) -> Vec<usize> {
    let k = targets.len();
    (0..1usize << k)
        .map(|local| {
            targets
                .iter()
                .enumerate()
                .filter(|(j, _)| (local >> (k - 1 - j)) & 1 == 1)
                .fold(0, |offset, (_, &t)| offset | (1 << t))
        })
        .collect()
}

/// Apply a 2^k × 2^k matrix to groups of 2^k amplitudes sharing all
/// non-target bits
pub fn apply_multi_qubit(
    state: &mut [Complex64],
    matrix: &GateMatrix,
    targets: &[usize],
    control_mask: usize,
    parallel: bool,
) {
    let dim = matrix.dimension();
    let offsets = group_offsets(targets);
    let target_mask = offsets[dim - 1];
    let max_target = targets.iter().copied().max().unwrap_or(0);
    let chunk_len = (1usize << (max_target + 1)).min(state.len());
    let m = matrix.as_slice();

    for_each_chunk(state, chunk_len, parallel, |base, chunk| {
        let mut group = vec![Complex64::new(0.0, 0.0); dim];
        for i in 0..chunk.len() {
            if i & target_mask != 0 || (base + i) & control_mask != control_mask {
                continue;
            }
            for (slot, &offset) in group.iter_mut().zip(&offsets) {
                *slot = chunk[i + offset];
            }
            for (row, &offset) in offsets.iter().enumerate() {
                let coeffs = &m[row * dim..(row + 1) * dim];
                chunk[i + offset] = coeffs.iter().zip(&group).map(|(c, a)| c * a).sum();
            }
        }
    });
}
