//! The four-stage routing pipeline.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qroute_hal::Simulator;

use crate::decoder::{DEFAULT_SHOTS, MeasurementDecoder, RouteAssignment};
use crate::encoder::ProblemEncoder;
use crate::error::VrpResult;
use crate::evaluator::total_distance;
use crate::optimizer::{OptimizationStep, SingleStepOptimizer};
use crate::problem::ProblemInstance;
use crate::routes::RoutePlan;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VrpSolution {
    /// Per-customer vehicle-indicator bits.
    pub assignment: RouteAssignment,
    /// Vehicle tours read from the assignment.
    pub plan: RoutePlan,
    /// Distance summed over the tours.
    pub total_distance: f64,
    pub optimization: OptimizationStep,
    pub bitstring: String,
    pub frequency: u64,
    pub shots: u32,
    /// Carried from the problem; not enforced.
    pub vehicle_capacity: u32,
}

/// Runs Encoder, Optimizer, Decoder and Evaluator once, in that order.
///
/// The first failing stage aborts the run.
pub struct VrpPipeline<S: Simulator> {
    simulator: S,
    shots: u32,
}

impl<S: Simulator> VrpPipeline<S> {
    /// Create a pipeline over `simulator` with the default shot count.
    pub fn new(simulator: S) -> Self {
        Self {
            simulator,
            shots: DEFAULT_SHOTS,
        }
    }

    /// Set the number of measurement shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    #[instrument(skip_all, fields(
        customers = problem.num_customers(),
        vehicles = problem.num_vehicles(),
        shots = self.shots,
    ))]
    pub fn solve(&self, problem: &ProblemInstance) -> VrpResult<VrpSolution> {
        let mut circuit = ProblemEncoder::encode_problem(problem)?;
        let optimization = SingleStepOptimizer::new().optimize(&self.simulator, &mut circuit)?;
        let decoded = MeasurementDecoder::new(self.shots).decode(&self.simulator, &circuit)?;

        let plan = RoutePlan::from_assignment(&decoded.assignment, problem.distance_matrix())?;
        let total_distance = total_distance(&plan.tours, problem.distance_matrix())?;

        info!(
            "Solved: routes {} with total distance {}",
            decoded.assignment, total_distance
        );

        Ok(VrpSolution {
            assignment: decoded.assignment,
            plan,
            total_distance,
            optimization,
            bitstring: decoded.bitstring,
            frequency: decoded.frequency,
            shots: self.shots,
            vehicle_capacity: problem.vehicle_capacity(),
        })
    }
}
