//! qroute Vehicle Routing
//!
//! A single-step quantum heuristic for the vehicle routing problem. The
//! pipeline runs four stages once, with no feedback loop:
//!
//! 1. [`ProblemEncoder`] puts one qubit per (customer, vehicle) pair into
//!    equal superposition.
//! 2. [`SingleStepOptimizer`] reads the state vector and appends one `Ry`
//!    rotation sized by the largest amplitude.
//! 3. [`MeasurementDecoder`] measures, keeps the majority bit-string and
//!    reshapes it into per-customer vehicle bits.
//! 4. [`total_distance`] prices the vehicle tours built by [`RoutePlan`].
//!
//! Vehicle capacity is carried but not enforced, and the assignment is not
//! guaranteed to be a valid routing.
//!
//! # Example
//!
//! ```rust
//! use qroute_adapter_sim::StatevectorSimulator;
//! use qroute_vrp::{ProblemInstance, VrpPipeline};
//!
//! let pipeline = VrpPipeline::new(StatevectorSimulator::new().with_seed(3)).with_shots(256);
//! let solution = pipeline.solve(&ProblemInstance::example()).unwrap();
//!
//! assert_eq!(solution.assignment.num_customers(), 4);
//! assert_eq!(solution.assignment.num_vehicles(), 2);
//! println!("Optimized Routes: {}", solution.assignment);
//! println!("Total Distance: {}", solution.total_distance);
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod evaluator;
pub mod optimizer;
pub mod pipeline;
pub mod problem;
pub mod routes;

pub use decoder::{
    DEFAULT_SHOTS, DecodedMeasurement, MeasurementDecoder, RouteAssignment, reshape,
    select_majority,
};
pub use encoder::{CircuitStage, ProblemEncoder, QubitLayout, VrpCircuit};
pub use error::{VrpError, VrpResult};
pub use evaluator::{route_distance, total_distance};
pub use optimizer::{OptimizationStep, SingleStepOptimizer};
pub use pipeline::{VrpPipeline, VrpSolution};
pub use problem::{DistanceMatrix, ProblemInstance};
pub use routes::RoutePlan;
