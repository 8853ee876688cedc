//! Simulator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the shot-based simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Random seed for reproducible runs
    ///
    /// If None, a seed is drawn from the thread-local entropy source and
    /// reported in the result so the run can be replayed.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Largest register the simulator accepts
    ///
    /// Default: 30 (2^30 amplitudes, 16 GiB per state)
    pub max_qubits: usize,

    /// Memory limit in bytes for amplitude vectors held at the same time
    ///
    /// Set to 0 to bound memory by `max_qubits` only.
    ///
    /// Default: 0
    pub memory_limit: usize,

    /// Use the rayon pool for shots and for large-register gate kernels
    ///
    /// Default: true
    pub parallel: bool,

    /// Minimum number of qubits to split gate kernels across threads
    ///
    /// Smaller registers are updated single-threaded inside each shot to
    /// avoid synchronization overhead.
    ///
    /// Default: 16
    pub parallel_threshold: usize,

    /// Size of a dedicated worker pool
    ///
    /// None runs on the global rayon pool.
    ///
    /// Default: None
    pub num_threads: Option<usize>,

    /// Deadline for a whole execution
    ///
    /// Once it passes no new shots are started; shots already running finish
    /// and the result is flagged incomplete.
    ///
    /// Default: None
    pub timeout: Option<Duration>,

    /// Sample terminal-measurement circuits from one computed distribution
    ///
    /// Only used when no gate follows a measurement. Otherwise every shot
    /// replays the circuit.
    ///
    /// Default: true
    pub sampling_fast_path: bool,

    /// Norm drift (|Σ|a|² - 1|) above which a state is renormalized
    ///
    /// Default: 1e-9
    pub normalization_tolerance: f64,

    /// Norm drift above which a shot is aborted and counted as failed
    ///
    /// Default: 1e-3
    pub catastrophic_tolerance: f64,

    /// Check the norm after every gate
    ///
    /// Default: true
    pub check_normalization: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: feynq_state::MAX_QUBITS,
            memory_limit: 0,
            parallel: true,
            parallel_threshold: 16,
            num_threads: None,
            timeout: None,
            sampling_fast_path: true,
            normalization_tolerance: 1e-9,
            catastrophic_tolerance: 1e-3,
            check_normalization: true,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration optimized for speed
    ///
    /// - Lower kernel parallel threshold
    /// - No per-gate norm checks
    pub fn fast() -> Self {
        Self {
            parallel_threshold: 12,
            check_normalization: false,
            ..Default::default()
        }
    }

    /// Create a configuration optimized for accuracy
    ///
    /// - Every shot replays the full circuit
    /// - Tighter renormalization tolerance
    pub fn accurate() -> Self {
        Self {
            sampling_fast_path: false,
            normalization_tolerance: 1e-12,
            check_normalization: true,
            ..Default::default()
        }
    }

    /// Create a configuration for debugging
    ///
    /// - Single-threaded
    /// - Deterministic seed
    pub fn debug() -> Self {
        Self {
            parallel: false,
            seed: Some(42),
            check_normalization: true,
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set memory limit in bytes
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Enable or disable shot parallelism
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Run on a dedicated pool of `threads` workers
    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_sampling_fast_path(mut self, enabled: bool) -> Self {
        self.sampling_fast_path = enabled;
        self
    }

    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    pub fn with_catastrophic_tolerance(mut self, tolerance: f64) -> Self {
        self.catastrophic_tolerance = tolerance;
        self
    }

    pub fn with_normalization_check(mut self, enabled: bool) -> Self {
        self.check_normalization = enabled;
        self
    }

    /// Bytes for one amplitude vector of `num_qubits` qubits
    pub fn state_bytes(num_qubits: usize) -> usize {
        u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .and_then(|dim| dim.checked_mul(std::mem::size_of::<num_complex::Complex64>()))
            .unwrap_or(usize::MAX)
    }

    /// Memory ceiling actually enforced: `memory_limit`, or one state of
    /// `max_qubits` qubits when unset
    pub fn effective_memory_limit(&self) -> usize {
        if self.memory_limit == 0 {
            Self::state_bytes(self.max_qubits)
        } else {
            self.memory_limit
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_qubits == 0 || self.max_qubits > feynq_state::MAX_QUBITS {
            return Err(format!(
                "max_qubits must be in [1, {}], got {}",
                feynq_state::MAX_QUBITS,
                self.max_qubits
            ));
        }

        if !(self.normalization_tolerance.is_finite() && self.normalization_tolerance > 0.0) {
            return Err(format!(
                "normalization_tolerance must be positive, got {}",
                self.normalization_tolerance
            ));
        }

        if !(self.catastrophic_tolerance.is_finite()
            && self.catastrophic_tolerance > self.normalization_tolerance)
        {
            return Err(format!(
                "catastrophic_tolerance must exceed normalization_tolerance ({}), got {}",
                self.normalization_tolerance, self.catastrophic_tolerance
            ));
        }

        if self.num_threads == Some(0) {
            return Err("num_threads must be > 0".to_string());
        }

        Ok(())
    }
}
