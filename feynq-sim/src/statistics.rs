//! Execution statistics tracking

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How shots were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Every shot replays the circuit from |0…0⟩
    #[default]
    Replay,
    /// One state evolution, shots drawn from its distribution
    Sampled,
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStrategy::Replay => write!(f, "replay"),
            ExecutionStrategy::Sampled => write!(f, "sampled"),
        }
    }
}

/// Execution statistics for a simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    /// Total execution time
    pub elapsed: Duration,

    /// Strategy chosen for this run
    pub strategy: ExecutionStrategy,

    /// Automatic renormalizations across all shots
    pub renormalizations: usize,

    /// Worker threads available to the run
    pub threads: usize,

    /// Gate applications per replayed shot
    pub gates_per_shot: usize,

    /// Estimated bytes held in amplitude vectors at peak
    pub peak_memory_bytes: usize,
}

impl ExecutionStatistics {
    /// Create a new statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Shots per second for `shots` completed shots
    pub fn shots_per_second(&self, shots: usize) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            shots as f64 / secs
        }
    }

    /// Get peak memory usage in MB
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / 1_000_000.0
    }
}

impl fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        writeln!(f, "  Total time: {:?}", self.elapsed)?;
        writeln!(f, "  Strategy: {}", self.strategy)?;
        writeln!(f, "  Threads: {}", self.threads)?;
        writeln!(f, "  Gates per shot: {}", self.gates_per_shot)?;
        writeln!(f, "  Renormalizations: {}", self.renormalizations)?;
        writeln!(f, "  Peak memory: {:.2} MB", self.peak_memory_mb())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shots_per_second() {
        let mut stats = ExecutionStatistics::new();
        assert_eq!(stats.shots_per_second(100), 0.0);

        stats.elapsed = Duration::from_millis(500);
        assert_eq!(stats.shots_per_second(100), 200.0);
    }

    #[test]
    fn test_display() {
        let stats = ExecutionStatistics {
            strategy: ExecutionStrategy::Sampled,
            threads: 4,
            peak_memory_bytes: 2_000_000,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Strategy: sampled"));
        assert!(text.contains("Threads: 4"));
        assert!(text.contains("2.00 MB"));
    }
}
