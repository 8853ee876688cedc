//! Terminal-measurement fast path
//!
//! When no gate follows a measurement, every shot evolves the same state up
//! to the measurements. The state is computed once and each shot samples a
//! basis index from the alias table; reading the measured qubits out of that
//! index gives the same joint distribution as collapsing them one by one.

use crate::error::Result;
use crate::executor::{Instruction, NormGuard, Program};
use feynq_state::{AliasTable, ClassicalRegister, StateVector};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

/// Precomputed outcome distribution plus the measurement map
#[derive(Debug, Clone)]
pub(crate) struct SampledPlan {
    table: AliasTable,
    /// (qubit, clbit) in program order
    measurements: SmallVec<[(usize, usize); 8]>,
    num_clbits: usize,
    renormalizations: usize,
}

impl SampledPlan {
    /// Evolve the unitary prefix once and build the sampler
    ///
    /// Conditionals are evaluated against the all-zero register, which is
    /// what every shot would see before its first measurement.
    pub fn prepare(program: &Program<'_>, guard: NormGuard, parallel_kernels: bool) -> Result<Self> {
        let mut state = StateVector::new(program.num_qubits)?.with_parallelism(parallel_kernels);
        let register = ClassicalRegister::new(program.num_clbits);
        let mut measurements = SmallVec::new();
        let mut renormalizations = 0;

        for instruction in &program.instructions {
            match instruction {
                Instruction::Apply {
                    matrix,
                    targets,
                    controls,
                    condition,
                } => {
                    debug_assert!(measurements.is_empty(), "gate after measurement");
                    if condition.map_or(true, |c| c.evaluate(register.bits())) {
                        state.apply_gate(matrix, targets, controls)?;
                        renormalizations += usize::from(guard.check(&mut state)?);
                    }
                },
                Instruction::Measure { qubit, clbit } => measurements.push((*qubit, *clbit)),
            }
        }

        let table = AliasTable::new(&state.probabilities())?;
        Ok(Self {
            table,
            measurements,
            num_clbits: program.num_clbits,
            renormalizations,
        })
    }

    /// Renormalizations performed while preparing the distribution
    pub fn renormalizations(&self) -> usize {
        self.renormalizations
    }

    /// Draw one shot's register
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> ClassicalRegister {
        let mut register = ClassicalRegister::new(self.num_clbits);
        if self.measurements.is_empty() {
            return register;
        }
        let index = self.table.sample(|| rng.gen::<f64>());
        for &(qubit, clbit) in &self.measurements {
            register.set(clbit, (index >> qubit) & 1 == 1);
        }
        register
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::rng::shot_rng;
    use feynq_core::Circuit;

    fn plan_for(circuit: &Circuit) -> SampledPlan {
        let program = Program::compile(circuit);
        SampledPlan::prepare(&program, NormGuard::from_config(&SimulatorConfig::default()), false)
            .unwrap()
    }

    #[test]
    fn test_bell_samples_are_correlated() {
        let mut circuit = Circuit::new(2, 2).unwrap();
        circuit.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        let plan = plan_for(&circuit);

        let mut seen_one = false;
        for shot in 0..200 {
            let bits = plan.sample(&mut shot_rng(5, shot)).bitstring();
            assert!(bits == "00" || bits == "11", "unexpected outcome {}", bits);
            seen_one |= bits == "11";
        }
        assert!(seen_one);
    }

    #[test]
    fn test_measurement_map_permutes_bits() {
        // |q1 q0⟩ = |01⟩ measured with q0 -> c1 and q1 -> c0
        let mut circuit = Circuit::new(2, 2).unwrap();
        circuit.x(0).unwrap().measure(0, 1).unwrap().measure(1, 0).unwrap();
        let plan = plan_for(&circuit);
        assert_eq!(plan.sample(&mut shot_rng(0, 0)).bitstring(), "10");
    }

    #[test]
    fn test_unmeasured_bits_stay_zero() {
        let mut circuit = Circuit::new(1, 3).unwrap();
        circuit.x(0).unwrap().measure(0, 2).unwrap();
        let plan = plan_for(&circuit);
        assert_eq!(plan.sample(&mut shot_rng(0, 0)).bitstring(), "100");

        let mut silent = Circuit::new(1, 2).unwrap();
        silent.h(0).unwrap();
        assert_eq!(plan_for(&silent).sample(&mut shot_rng(0, 0)).bitstring(), "00");
    }
}
