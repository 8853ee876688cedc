//! Execution results

use crate::statistics::ExecutionStatistics;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Final-register tally
///
/// Maps register bitstrings (classical bit m-1 leftmost) to the number of
/// shots that ended with that register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementCounts {
    counts: HashMap<String, usize>,
    total_shots: usize,
}

impl MeasurementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally from an existing bitstring → count map
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
        }
    }

    /// Record `count` more shots with outcome `bitstring`
    pub fn add(&mut self, bitstring: String, count: usize) {
        *self.counts.entry(bitstring).or_insert(0) += count;
        self.total_shots += count;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: MeasurementCounts) {
        for (bitstring, count) in other.counts {
            self.add(bitstring, count);
        }
    }

    /// Shots that ended with `bitstring`; 0 if never seen
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Empirical probability of a bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Fraction of shots in which classical bit `clbit` read 1
    pub fn marginal(&self, clbit: usize) -> f64 {
        if self.total_shots == 0 {
            return 0.0;
        }
        let ones: usize = self
            .counts
            .iter()
            .filter(|(bitstring, _)| bit_is_set(bitstring, clbit))
            .map(|(_, &count)| count)
            .sum();
        ones as f64 / self.total_shots as f64
    }

    pub fn bitstrings(&self) -> impl Iterator<Item = &String> {
        self.counts.keys()
    }

    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Distinct registers observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent outcome; ties go to the smallest bitstring
    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.sorted().into_iter().next()
    }

    /// Outcomes by descending count, then ascending bitstring
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<_> = self
            .counts
            .iter()
            .map(|(bs, &count)| (bs.as_str(), count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// Empirical distribution over observed bitstrings
    pub fn to_probabilities(&self) -> HashMap<String, f64> {
        self.counts
            .keys()
            .map(|bs| (bs.clone(), self.probability(bs)))
            .collect()
    }
}

fn bit_is_set(bitstring: &str, clbit: usize) -> bool {
    let bytes = bitstring.as_bytes();
    clbit < bytes.len() && bytes[bytes.len() - 1 - clbit] == b'1'
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        let sorted = self.sorted();
        for &(bitstring, count) in sorted.iter().take(10) {
            let shown = if bitstring.is_empty() { "\"\"" } else { bitstring };
            writeln!(
                f,
                "  {}: {} ({:.2}%)",
                shown,
                count,
                self.probability(bitstring) * 100.0
            )?;
        }

        if sorted.len() > 10 {
            writeln!(f, "  ... and {} more outcomes", sorted.len() - 10)?;
        }

        Ok(())
    }
}

/// Outcome of `execute`
///
/// `total_shots()` counts the shots that produced an outcome. Shots aborted
/// by catastrophic numerical drift are reported in `failed_shots` and are not
/// part of the counts. `complete` is false only when a deadline stopped the
/// run before every requested shot was attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub counts: MeasurementCounts,
    pub requested_shots: usize,
    pub failed_shots: usize,
    pub complete: bool,
    /// Seed the run actually used; pass it back to replay the run
    pub seed: u64,
    pub statistics: ExecutionStatistics,
}

impl ExecutionResult {
    /// Shots that produced an outcome
    pub fn total_shots(&self) -> usize {
        self.counts.total_shots()
    }

    /// Shots that were started (successful or failed)
    pub fn attempted_shots(&self) -> usize {
        self.total_shots() + self.failed_shots
    }

    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring)
    }

    pub fn probability(&self, bitstring: &str) -> f64 {
        self.counts.probability(bitstring)
    }

    pub fn marginal(&self, clbit: usize) -> f64 {
        self.counts.marginal(clbit)
    }

    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.counts.most_common()
    }

    pub fn sorted(&self) -> Vec<(&str, usize)> {
        self.counts.sorted()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.counts)?;
        if self.failed_shots > 0 {
            writeln!(f, "  {} failed shots", self.failed_shots)?;
        }
        if !self.complete {
            writeln!(
                f,
                "  incomplete: {} of {} shots attempted",
                self.attempted_shots(),
                self.requested_shots
            )?;
        }
        writeln!(f, "  seed: {}", self.seed)
    }
}
