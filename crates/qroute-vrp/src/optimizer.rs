//! Single-step amplitude rotation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qroute_hal::{SimError, Simulator};
use qroute_ir::{Gate, Instruction, QubitId, StandardGate};

use crate::encoder::{CircuitStage, VrpCircuit};
use crate::error::VrpResult;

/// What the optimizer did to the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationStep {
    /// Basis state with the largest amplitude magnitude.
    pub basis_index: usize,
    /// Qubit that received the rotation.
    pub target: usize,
    /// Magnitude of the winning amplitude, clamped to `[0, 1]`.
    pub amplitude: f64,
    /// Rotation angle, in `[0, π]`.
    pub angle: f64,
}

/// Reads the state vector once and appends one `Ry` rotation.
///
/// This is a single heuristic step, not a variational loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStepOptimizer;

impl SingleStepOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Rotation angle for an amplitude magnitude: `2·asin(sqrt(|a|))`.
    pub fn rotation_angle(magnitude: f64) -> f64 {
        2.0 * magnitude.clamp(0.0, 1.0).sqrt().asin()
    }

    #[instrument(skip_all, fields(simulator = simulator.name()))]
    pub fn optimize<S: Simulator>(
        &self,
        simulator: &S,
        vrp: &mut VrpCircuit,
    ) -> VrpResult<OptimizationStep> {
        let amplitudes = simulator.simulate_statevector(&vrp.circuit)?;

        let num_qubits = vrp.circuit.num_qubits();
        if num_qubits == 0 {
            return Err(SimError::InvalidCircuit("circuit has no qubits".into()).into());
        }
        let (basis_index, magnitude) = amplitudes
            .argmax_magnitude()
            .ok_or_else(|| SimError::Backend("simulator returned an empty state".into()))?;

        let amplitude = magnitude.clamp(0.0, 1.0);
        let angle = Self::rotation_angle(amplitude);
        let target = basis_index % num_qubits;
        // num_qubits fits a u32, so target does too.
        let qubit = QubitId(target as u32);

        let gate = Gate::from(StandardGate::Ry(angle)).with_label("single-step");
        vrp.circuit.apply(Instruction::gate(gate, [qubit]))?;
        vrp.stage = CircuitStage::Optimized;

        debug!(
            "Max |amplitude| {:.6} at basis {}; ry({:.6}) on {}",
            amplitude, basis_index, angle, qubit
        );

        Ok(OptimizationStep {
            basis_index,
            target,
            amplitude,
            angle,
        })
    }
}
