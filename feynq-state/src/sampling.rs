//! Walker alias sampling of basis-state outcomes
//!
//! Used when a circuit only measures at the end: the outcome distribution is
//! computed once and every shot draws from it in O(1).
//!
//! Reference: Walker, A. J. (1977). "An Efficient Method for Generating
//! Discrete Random Variables with General Distributions"

use crate::error::{Result, StateError};

/// Alias table over indices 0..n
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Probability threshold for each index
    prob: Vec<f64>,
    /// Alias index for each index
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build from (possibly unnormalized) non-negative weights
    ///
    /// # Errors
    /// `InvalidDimension` for an empty slice, `NotNormalized` if the weights
    /// sum to zero.
    pub fn new(weights: &[f64]) -> Result<Self> {
        let n = weights.len();
        if n == 0 {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(StateError::NotNormalized { norm: total.sqrt() });
        }

        let mut scaled: Vec<f64> = weights.iter().map(|&w| w * n as f64 / total).collect();
        let mut prob = vec![0.0; n];
        let mut alias: Vec<usize> = (0..n).collect();

        let (mut small, mut large): (Vec<usize>, Vec<usize>) =
            (0..n).partition(|&i| scaled[i] < 1.0);

        while !small.is_empty() && !large.is_empty() {
            let (Some(s), Some(l)) = (small.pop(), large.pop()) else {
                break;
            };

            prob[s] = scaled[s];
            alias[s] = l;

            scaled[l] = (scaled[l] + scaled[s]) - 1.0;
            if scaled[l] < 1.0 {
                small.push(l);
            } else {
                large.push(l);
            }
        }

        // Leftovers are 1.0 up to rounding
        for i in large.into_iter().chain(small) {
            prob[i] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Sample an index using two uniform draws from [0, 1)
    pub fn sample(&self, mut uniform: impl FnMut() -> f64) -> usize {
        let n = self.prob.len();
        let i = ((uniform() * n as f64) as usize).min(n - 1);
        if uniform() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn frequencies(table: &AliasTable, shots: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut counts = vec![0usize; table.len()];
        for _ in 0..shots {
            counts[table.sample(|| rng.gen::<f64>())] += 1;
        }
        counts.iter().map(|&c| c as f64 / shots as f64).collect()
    }

    #[test]
    fn test_alias_table_uniform() {
        let table = AliasTable::new(&[0.25, 0.25, 0.25, 0.25]).unwrap();
        for freq in frequencies(&table, 20_000, 42) {
            assert!((freq - 0.25).abs() < 0.02, "Frequency {} too far from 0.25", freq);
        }
    }

    #[test]
    fn test_alias_table_nonuniform() {
        let probabilities = [0.5, 0.3, 0.15, 0.05];
        let table = AliasTable::new(&probabilities).unwrap();
        for (i, (freq, prob)) in frequencies(&table, 20_000, 123)
            .into_iter()
            .zip(probabilities)
            .enumerate()
        {
            assert!(
                (freq - prob).abs() < 0.02,
                "Outcome {} frequency {} too far from {}",
                i,
                freq,
                prob
            );
        }
    }

    #[test]
    fn test_zero_weight_never_sampled() {
        let table = AliasTable::new(&[0.0, 2.0, 0.0, 2.0]).unwrap();
        let freqs = frequencies(&table, 5_000, 9);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[2], 0.0);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(AliasTable::new(&[]).is_err());
        assert!(AliasTable::new(&[0.0, 0.0]).is_err());
    }
}
