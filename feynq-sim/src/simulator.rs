//! Core simulator implementation

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    executor::{NormGuard, Program, ShotRecord, ShotRunner},
    result::{ExecutionResult, MeasurementCounts},
    rng,
    sampling::SampledPlan,
    statistics::{ExecutionStatistics, ExecutionStrategy},
};
use feynq_core::Circuit;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-worker partial result, merged once all shots are done
#[derive(Debug, Default)]
struct Tally {
    counts: MeasurementCounts,
    failed: usize,
    renormalizations: usize,
}

impl Tally {
    fn record(&mut self, record: ShotRecord) {
        self.counts.add(record.register.bitstring(), 1);
        self.renormalizations += record.renormalizations;
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.counts.merge(other.counts);
        self.failed += other.failed;
        self.renormalizations += other.renormalizations;
        self
    }
}

/// Shot-based state-vector simulator
///
/// Each shot starts from |0…0⟩ with an all-zero classical register and walks
/// the circuit in order; the final registers are tallied into bitstring
/// counts. Shots are independent and run on the rayon pool.
///
/// # Example
///
/// ```
/// use feynq_core::Circuit;
/// use feynq_sim::{Simulator, SimulatorConfig};
///
/// let simulator = Simulator::new(SimulatorConfig::default().with_seed(7)).unwrap();
///
/// let mut circuit = Circuit::new(2, 2).unwrap();
/// circuit.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
///
/// let result = simulator.execute(&circuit, 1000).unwrap();
/// assert_eq!(result.get("00") + result.get("11"), 1000);
/// ```
pub struct Simulator {
    config: SimulatorConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            config: SimulatorConfig::default(),
            pool: None,
        }
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("threads", &self.num_threads())
            .finish()
    }
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation or the
    /// dedicated thread pool cannot be built.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;

        let pool = match config.num_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("feynq-shot-{}", i))
                    .build()
                    .map_err(|e| SimulatorError::InvalidConfig(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Self { config, pool })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Worker threads shots can run on
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Check that one amplitude vector for `circuit` fits the configured
    /// ceiling
    ///
    /// # Errors
    ///
    /// `ResourceLimitExceeded` when the qubit count exceeds `max_qubits` or
    /// the state would not fit in `memory_limit`.
    pub fn check_resources(&self, circuit: &Circuit) -> Result<()> {
        let num_qubits = circuit.num_qubits();
        let required_bytes = SimulatorConfig::state_bytes(num_qubits);
        let limit_bytes = self.config.effective_memory_limit();
        if num_qubits > self.config.max_qubits || required_bytes > limit_bytes {
            return Err(SimulatorError::ResourceLimitExceeded {
                num_qubits,
                required_bytes,
                limit_bytes,
            });
        }
        Ok(())
    }

    /// Execute `circuit` for `shots` shots using the configured seed
    ///
    /// # Errors
    ///
    /// - `InvalidShotCount` if `shots` is 0
    /// - `ResourceLimitExceeded` if the state does not fit the ceiling
    /// - `State` for failures that are not confined to one shot
    pub fn execute(&self, circuit: &Circuit, shots: usize) -> Result<ExecutionResult> {
        self.run(circuit, shots, self.config.seed)
    }

    /// Execute with an explicit seed, overriding the configured one
    pub fn execute_with_seed(
        &self,
        circuit: &Circuit,
        shots: usize,
        seed: u64,
    ) -> Result<ExecutionResult> {
        self.run(circuit, shots, Some(seed))
    }

    #[tracing::instrument(
        name = "execute",
        level = "info",
        skip_all,
        fields(
            num_qubits = circuit.num_qubits(),
            num_clbits = circuit.num_clbits(),
            shots = shots
        )
    )]
    fn run(&self, circuit: &Circuit, shots: usize, seed: Option<u64>) -> Result<ExecutionResult> {
        let start = Instant::now();

        if shots == 0 {
            return Err(SimulatorError::InvalidShotCount(shots));
        }
        self.check_resources(circuit)?;

        let deadline = self.config.timeout.map(|timeout| start + timeout);
        let seed = match seed {
            Some(seed) => seed,
            None => {
                let seed = rng::entropy_seed();
                debug!(seed, "drew run seed from entropy");
                seed
            },
        };

        let num_qubits = circuit.num_qubits();
        let state_bytes = SimulatorConfig::state_bytes(num_qubits);
        let parallel_kernels = self.config.parallel && num_qubits >= self.config.parallel_threshold;
        let parallel_shots = self.parallel_shots_fit(state_bytes, shots);
        let threads = if parallel_shots { self.num_threads() } else { 1 };
        let guard = NormGuard::from_config(&self.config);
        let program = Program::compile(circuit);

        let plan = self.prepare_plan(circuit, &program, guard, parallel_kernels);
        let strategy = if plan.is_some() {
            ExecutionStrategy::Sampled
        } else {
            ExecutionStrategy::Replay
        };
        debug!(
            seed,
            %strategy,
            threads,
            parallel_kernels,
            gates = program.num_gates(),
            "execution plan"
        );

        let (tally, peak_memory_bytes) = match &plan {
            Some(plan) => {
                let tally = self.run_shots(shots, seed, deadline, parallel_shots, |rng| {
                    Ok(ShotRecord {
                        register: plan.sample(rng),
                        renormalizations: 0,
                    })
                })?;
                (tally, state_bytes.saturating_mul(2))
            },
            None => {
                let runner = ShotRunner::new(&program, guard, parallel_kernels);
                let tally =
                    self.run_shots(shots, seed, deadline, parallel_shots, |rng| runner.run(rng))?;
                (tally, state_bytes.saturating_mul(threads))
            },
        };

        let renormalizations =
            tally.renormalizations + plan.as_ref().map_or(0, |p| p.renormalizations());
        let attempted = tally.counts.total_shots() + tally.failed;
        let complete = attempted == shots;

        if renormalizations > 0 {
            warn!(renormalizations, "state norm drifted and was renormalized");
        }
        if tally.failed > 0 {
            warn!(failed = tally.failed, "shots aborted by numerical instability");
        }
        if !complete {
            warn!(attempted, requested = shots, "deadline expired before all shots ran");
        }

        let statistics = ExecutionStatistics {
            elapsed: start.elapsed(),
            strategy,
            renormalizations,
            threads,
            gates_per_shot: program.num_gates(),
            peak_memory_bytes,
        };
        info!(
            %strategy,
            completed = tally.counts.total_shots(),
            failed = tally.failed,
            elapsed_ms = statistics.elapsed.as_secs_f64() * 1e3,
            "execution finished"
        );

        Ok(ExecutionResult {
            counts: tally.counts,
            requested_shots: shots,
            failed_shots: tally.failed,
            complete,
            seed,
            statistics,
        })
    }

    /// Parallel shots hold one state per worker; fall back to sequential
    /// shots when that would break the memory ceiling
    fn parallel_shots_fit(&self, state_bytes: usize, shots: usize) -> bool {
        if !self.config.parallel || shots < 2 {
            return false;
        }
        let workers = self.num_threads().min(shots);
        let fits = state_bytes.saturating_mul(workers) <= self.config.effective_memory_limit();
        if !fits {
            debug!(workers, state_bytes, "running shots sequentially to stay under memory limit");
        }
        fits
    }

    /// The sampling plan, when the circuit and memory ceiling allow one
    fn prepare_plan(
        &self,
        circuit: &Circuit,
        program: &Program<'_>,
        guard: NormGuard,
        parallel_kernels: bool,
    ) -> Option<SampledPlan> {
        if !self.config.sampling_fast_path || circuit.has_mid_circuit_measurement() {
            return None;
        }

        // State, probabilities and alias table are all alive while building
        let dimension = 1usize << circuit.num_qubits();
        let per_entry = std::mem::size_of::<num_complex::Complex64>()
            + 2 * std::mem::size_of::<f64>()
            + std::mem::size_of::<usize>();
        if dimension.saturating_mul(per_entry) > self.config.effective_memory_limit() {
            debug!("sampling tables exceed memory limit, replaying shots");
            return None;
        }

        let build = || SampledPlan::prepare(program, guard, parallel_kernels);
        let prepared = match &self.pool {
            Some(pool) => pool.install(build),
            None => build(),
        };
        match prepared {
            Ok(plan) => Some(plan),
            Err(err) => {
                warn!(error = %err, "sampling plan failed, replaying shots");
                None
            },
        }
    }

    /// Run `shots` shots of `shot`, each with its own random stream
    ///
    /// After the deadline passes no new shot is started. Shot failures are
    /// counted; any other error aborts the run.
    fn run_shots<F>(
        &self,
        shots: usize,
        seed: u64,
        deadline: Option<Instant>,
        parallel: bool,
        shot: F,
    ) -> Result<Tally>
    where
        F: Fn(&mut ChaCha8Rng) -> Result<ShotRecord> + Sync,
    {
        let expired = AtomicBool::new(false);

        let step = |mut tally: Tally, index: usize| -> Result<Tally> {
            if expired.load(Ordering::Relaxed) {
                return Ok(tally);
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                expired.store(true, Ordering::Relaxed);
                return Ok(tally);
            }

            let mut rng = rng::shot_rng(seed, index as u64);
            match shot(&mut rng) {
                Ok(record) => tally.record(record),
                Err(err) if err.is_shot_failure() => {
                    debug!(shot = index, error = %err, "shot failed");
                    tally.failed += 1;
                },
                Err(err) => return Err(err),
            }
            Ok(tally)
        };

        let all_shots = || {
            if parallel {
                (0..shots)
                    .into_par_iter()
                    .try_fold(Tally::default, &step)
                    .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
            } else {
                (0..shots).try_fold(Tally::default(), &step)
            }
        };
        match &self.pool {
            Some(pool) => pool.install(all_shots),
            None => all_shots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feynq_gates::GateMatrix;
    use num_complex::Complex64;
    use std::time::Duration;

    fn bell() -> Circuit {
        let mut circuit = Circuit::new(2, 2).unwrap();
        circuit.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        circuit
    }

    fn mid_circuit() -> Circuit {
        let mut circuit = Circuit::new(2, 2).unwrap();
        circuit
            .h(0)
            .unwrap()
            .measure(0, 0)
            .unwrap()
            .cx(0, 1)
            .unwrap()
            .measure(1, 1)
            .unwrap();
        circuit
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulatorConfig::new().with_max_qubits(0);
        assert!(matches!(
            Simulator::new(config),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_shots() {
        let simulator = Simulator::default();
        assert_eq!(
            simulator.execute(&bell(), 0).unwrap_err(),
            SimulatorError::InvalidShotCount(0)
        );
    }

    #[test]
    fn test_resource_limit() {
        let simulator = Simulator::new(SimulatorConfig::new().with_max_qubits(3)).unwrap();
        let circuit = Circuit::new(4, 0).unwrap();
        assert!(matches!(
            simulator.execute(&circuit, 1),
            Err(SimulatorError::ResourceLimitExceeded { num_qubits: 4, .. })
        ));

        let simulator = Simulator::new(SimulatorConfig::new().with_memory_limit(64)).unwrap();
        assert!(simulator.check_resources(&Circuit::new(2, 0).unwrap()).is_ok());
        assert!(simulator.check_resources(&Circuit::new(3, 0).unwrap()).is_err());
    }

    #[test]
    fn test_strategy_selection() {
        let simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let sampled = simulator.execute(&bell(), 10).unwrap();
        assert_eq!(sampled.statistics.strategy, ExecutionStrategy::Sampled);

        let replayed = simulator.execute(&mid_circuit(), 10).unwrap();
        assert_eq!(replayed.statistics.strategy, ExecutionStrategy::Replay);

        let simulator =
            Simulator::new(SimulatorConfig::debug().with_sampling_fast_path(false)).unwrap();
        let forced = simulator.execute(&bell(), 10).unwrap();
        assert_eq!(forced.statistics.strategy, ExecutionStrategy::Replay);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let simulator = Simulator::default();
        let a = simulator.execute_with_seed(&mid_circuit(), 500, 11).unwrap();
        let b = simulator.execute_with_seed(&mid_circuit(), 500, 11).unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.seed, 11);
    }

    #[test]
    fn test_results_independent_of_thread_count() {
        let sequential = Simulator::new(SimulatorConfig::new().with_parallel(false)).unwrap();
        let pooled = Simulator::new(SimulatorConfig::new().with_num_threads(3)).unwrap();
        for circuit in [bell(), mid_circuit()] {
            let a = sequential.execute_with_seed(&circuit, 300, 5).unwrap();
            let b = pooled.execute_with_seed(&circuit, 300, 5).unwrap();
            assert_eq!(a.counts, b.counts);
        }
        assert_eq!(pooled.num_threads(), 3);
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let simulator = Simulator::default();
        let result = simulator.execute(&mid_circuit(), 200).unwrap();
        let replay = simulator
            .execute_with_seed(&mid_circuit(), 200, result.seed)
            .unwrap();
        assert_eq!(result.counts, replay.counts);
    }

    #[test]
    fn test_expired_deadline_returns_partial_result() {
        let simulator =
            Simulator::new(SimulatorConfig::new().with_timeout(Duration::ZERO)).unwrap();
        let result = simulator.execute(&bell(), 100).unwrap();
        assert!(!result.complete);
        assert!(result.total_shots() < 100);
        assert_eq!(result.requested_shots, 100);
    }

    #[test]
    fn test_catastrophic_shots_are_counted_as_failed() {
        let zero = Complex64::new(0.0, 0.0);
        let two = Complex64::new(2.0, 0.0);
        let mut circuit = Circuit::new(1, 1).unwrap();
        circuit
            .measure(0, 0)
            .unwrap()
            .unitary(GateMatrix::from_2x2(&[[two, zero], [zero, two]]), &[0])
            .unwrap()
            .measure(0, 0)
            .unwrap();

        let simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let result = simulator.execute(&circuit, 20).unwrap();
        assert_eq!(result.failed_shots, 20);
        assert_eq!(result.total_shots(), 0);
        assert!(result.complete);
    }

    #[test]
    fn test_statistics_are_filled() {
        let simulator = Simulator::new(SimulatorConfig::debug()).unwrap();
        let result = simulator.execute(&mid_circuit(), 50).unwrap();
        assert_eq!(result.statistics.threads, 1);
        assert_eq!(result.statistics.gates_per_shot, 2);
        assert_eq!(result.statistics.peak_memory_bytes, 64);
        assert_eq!(result.statistics.renormalizations, 0);
    }
}
