//! Full-replay shot execution
//!
//! A circuit is lowered once into a [`Program`] of plain index lists, then
//! every shot walks it on a private amplitude vector and classical register.

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use feynq_core::{Circuit, ClassicalCondition, Gate, Operation};
use feynq_gates::GateMatrix;
use feynq_state::{ClassicalRegister, StateVector};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

/// One lowered step
#[derive(Debug, Clone)]
pub(crate) enum Instruction<'c> {
    Apply {
        matrix: &'c GateMatrix,
        targets: SmallVec<[usize; 2]>,
        controls: SmallVec<[usize; 2]>,
        condition: Option<&'c ClassicalCondition>,
    },
    Measure {
        qubit: usize,
        clbit: usize,
    },
}

impl<'c> Instruction<'c> {
    fn apply(gate: &'c Gate, condition: Option<&'c ClassicalCondition>) -> Self {
        Instruction::Apply {
            matrix: gate.matrix(),
            targets: gate.targets().iter().map(|q| q.index()).collect(),
            controls: gate.controls().iter().map(|q| q.index()).collect(),
            condition,
        }
    }
}

/// A circuit lowered for execution, shared read-only by all shots
#[derive(Debug, Clone)]
pub(crate) struct Program<'c> {
    pub num_qubits: usize,
    pub num_clbits: usize,
    pub instructions: Vec<Instruction<'c>>,
}

impl<'c> Program<'c> {
    pub fn compile(circuit: &'c Circuit) -> Self {
        let instructions = circuit
            .operations()
            .iter()
            .map(|op| match op {
                Operation::Gate(gate) => Instruction::apply(gate, None),
                Operation::Conditional { gate, condition } => {
                    Instruction::apply(gate, Some(condition))
                },
                Operation::Measure { qubit, clbit } => Instruction::Measure {
                    qubit: qubit.index(),
                    clbit: clbit.index(),
                },
            })
            .collect();

        Self {
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            instructions,
        }
    }

    pub fn num_gates(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Apply { .. }))
            .count()
    }
}

/// Norm checks applied after each gate
#[derive(Debug, Clone, Copy)]
pub(crate) struct NormGuard {
    enabled: bool,
    tolerance: f64,
    catastrophic: f64,
}

impl NormGuard {
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self {
            enabled: config.check_normalization,
            tolerance: config.normalization_tolerance,
            catastrophic: config.catastrophic_tolerance,
        }
    }

    /// Renormalize small drift, reject large drift
    ///
    /// Returns true if the state was renormalized.
    pub fn check(&self, state: &mut StateVector) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let norm_sqr = state.norm_sqr();
        let drift = (norm_sqr - 1.0).abs();
        if drift.is_nan() || drift > self.catastrophic {
            return Err(SimulatorError::NumericalInstability {
                norm_sqr,
                tolerance: self.catastrophic,
            });
        }
        if drift > self.tolerance {
            tracing::debug!(norm_sqr, tolerance = self.tolerance, "renormalizing drifted state");
            state.normalize();
            return Ok(true);
        }
        Ok(false)
    }
}

/// Classical outcome of one shot
#[derive(Debug, Clone)]
pub(crate) struct ShotRecord {
    pub register: ClassicalRegister,
    pub renormalizations: usize,
}

/// Replays a program once per shot
#[derive(Debug, Clone)]
pub(crate) struct ShotRunner<'p, 'c> {
    program: &'p Program<'c>,
    guard: NormGuard,
    parallel_kernels: bool,
}

impl<'p, 'c> ShotRunner<'p, 'c> {
    pub fn new(program: &'p Program<'c>, guard: NormGuard, parallel_kernels: bool) -> Self {
        Self {
            program,
            guard,
            parallel_kernels,
        }
    }

    /// Run one shot from |0…0⟩ with an all-zero register
    pub fn run(&self, rng: &mut ChaCha8Rng) -> Result<ShotRecord> {
        let mut state =
            StateVector::new(self.program.num_qubits)?.with_parallelism(self.parallel_kernels);
        let mut register = ClassicalRegister::new(self.program.num_clbits);
        let mut renormalizations = 0;

        for instruction in &self.program.instructions {
            match instruction {
                Instruction::Apply {
                    matrix,
                    targets,
                    controls,
                    condition,
                } => {
                    if condition.map_or(true, |c| c.evaluate(register.bits())) {
                        state.apply_gate(matrix, targets, controls)?;
                        renormalizations += usize::from(self.guard.check(&mut state)?);
                    }
                },
                Instruction::Measure { qubit, clbit } => {
                    let result = state.measure_qubit(*qubit, rng.gen::<f64>())?;
                    register.set(*clbit, result.outcome);
                },
            }
        }

        Ok(ShotRecord {
            register,
            renormalizations,
        })
    }
}
