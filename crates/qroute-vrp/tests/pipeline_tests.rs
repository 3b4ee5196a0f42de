//! End-to-end tests for the routing pipeline.

mod common;

use common::FakeSimulator;
use qroute_adapter_sim::StatevectorSimulator;
use qroute_hal::{Counts, SimError, Simulator};
use qroute_vrp::{
    CircuitStage, DistanceMatrix, MeasurementDecoder, ProblemEncoder, ProblemInstance,
    SingleStepOptimizer, VrpError, VrpPipeline,
};

fn two_customers_one_vehicle() -> ProblemInstance {
    ProblemInstance::new(
        vec![(0.0, 0.0), (1.0, 0.0)],
        vec![(0.0, 0.0)],
        DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]),
        7,
    )
    .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_forced_counts_decode_to_indicator_groups() {
    let counts: Counts = [("01", 10), ("10", 3)].into_iter().collect();
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(counts)).with_shots(13);

    let solution = pipeline.solve(&two_customers_one_vehicle()).unwrap();

    assert_eq!(solution.assignment.groups(), vec![vec![0], vec![1]]);
    assert_eq!(solution.assignment.to_string(), "[[0], [1]]");
    assert_eq!(solution.bitstring, "01");
    assert_eq!(solution.frequency, 10);

    // Customer 0 selected no vehicle; customer 1 rides alone.
    assert_eq!(solution.plan.tours, vec![vec![1]]);
    assert_eq!(solution.plan.unassigned, vec![0]);
    assert_eq!(solution.total_distance, 0.0);
    assert_eq!(solution.vehicle_capacity, 7);
}

#[test]
fn test_tied_counts_take_first_reported_key() {
    let counts: Counts = [("10", 5), ("01", 5)].into_iter().collect();
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(counts));

    let solution = pipeline.solve(&two_customers_one_vehicle()).unwrap();
    assert_eq!(solution.bitstring, "10");
    assert_eq!(solution.plan.tours, vec![vec![0]]);
}

#[test]
fn test_empty_customer_list_is_invalid() {
    let err = ProblemInstance::new(vec![], vec![(0.0, 0.0)], DistanceMatrix::new(vec![]), 1)
        .unwrap_err();
    assert!(matches!(err, VrpError::InvalidDimension(_)));

    let err = ProblemEncoder::encode(0, 3).unwrap_err();
    assert!(matches!(err, VrpError::InvalidDimension(_)));
}

#[test]
fn test_empty_counts_fail_decoding() {
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(Counts::new()));
    let err = pipeline.solve(&two_customers_one_vehicle()).unwrap_err();
    assert!(matches!(err, VrpError::EmptyMeasurement));
}

#[test]
fn test_decoding_unoptimized_circuit_is_rejected() {
    let sim = FakeSimulator::with_counts([("00", 1)].into_iter().collect());
    let circuit = ProblemEncoder::encode(2, 1).unwrap();

    let err = MeasurementDecoder::default().decode(&sim, &circuit).unwrap_err();
    assert!(matches!(
        err,
        VrpError::Simulation(SimError::InvalidCircuit(_))
    ));
    assert_eq!(sim.calls().measurements, 0);
}

#[test]
fn test_statevector_failure_surfaces_as_simulation_error() {
    let sim = FakeSimulator::with_counts(Counts::new()).failing_statevector();
    let pipeline = VrpPipeline::new(sim);

    let err = pipeline.solve(&two_customers_one_vehicle()).unwrap_err();
    assert!(matches!(err, VrpError::Simulation(SimError::Backend(_))));
    assert_eq!(pipeline.simulator().calls().measurements, 0);
}

#[test]
fn test_circuit_too_large_for_simulator() {
    let pipeline = VrpPipeline::new(StatevectorSimulator::new().with_max_qubits(4));
    let err = pipeline.solve(&ProblemInstance::example()).unwrap_err();
    assert!(matches!(
        err,
        VrpError::Simulation(SimError::CircuitTooLarge(_))
    ));
}

#[test]
fn test_short_bitstring_is_malformed() {
    let counts: Counts = [("0", 4)].into_iter().collect();
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(counts));
    let err = pipeline.solve(&two_customers_one_vehicle()).unwrap_err();
    assert!(matches!(err, VrpError::MalformedBitstring(_)));
}

// ============================================================================
// Stage interaction
// ============================================================================

#[test]
fn test_each_simulator_mode_called_once() {
    let counts: Counts = [("11", 2)].into_iter().collect();
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(counts)).with_shots(64);
    pipeline.solve(&two_customers_one_vehicle()).unwrap();

    let calls = pipeline.simulator().calls();
    assert_eq!(calls.statevector, 1);
    assert_eq!(calls.measurements, 1);
    assert_eq!(calls.last_shots, Some(64));

    // The decoder measures a copy: H, H, the rotation, then the measurement.
    let measured = calls.last_measured_circuit.unwrap();
    assert!(measured.is_measured());
    assert_eq!(measured.num_ops(), 4);
    assert_eq!(measured.instructions()[2].name(), "ry");
}

#[test]
fn test_optimizer_targets_largest_amplitude() {
    // 2 qubits; |amp| peaks at index 1.
    let sim = FakeSimulator::with_counts(Counts::new()).with_amplitudes(&[0.1, -0.9, 0.3, 0.3]);
    let mut circuit = ProblemEncoder::encode(2, 1).unwrap();

    let step = SingleStepOptimizer::new().optimize(&sim, &mut circuit).unwrap();
    assert_eq!(step.basis_index, 1);
    assert_eq!(step.target, 1);
    assert!((step.amplitude - 0.9).abs() < 1e-12);
    assert!((step.angle - 2.0 * 0.9_f64.sqrt().asin()).abs() < 1e-12);
    assert_eq!(circuit.stage(), CircuitStage::Optimized);

    let last = circuit.circuit().instructions().last().unwrap();
    assert_eq!(last.qubits[0].index(), 1);
}

#[test]
fn test_optimizer_reduces_large_basis_index() {
    // 2 qubits; the peak at index 3 lands on qubit 3 % 2 = 1.
    let sim = FakeSimulator::with_counts(Counts::new()).with_amplitudes(&[0.0, 0.0, 0.0, 1.0]);
    let mut circuit = ProblemEncoder::encode(1, 2).unwrap();

    let step = SingleStepOptimizer::new().optimize(&sim, &mut circuit).unwrap();
    assert_eq!(step.basis_index, 3);
    assert_eq!(step.target, 1);
    assert!((step.angle - std::f64::consts::PI).abs() < 1e-12);
}

// ============================================================================
// Local simulator
// ============================================================================

#[test]
fn test_encoder_produces_equal_superposition() {
    let sim = StatevectorSimulator::new();
    let circuit = ProblemEncoder::encode(4, 2).unwrap();
    let amps = sim.simulate_statevector(circuit.circuit()).unwrap();

    assert_eq!(amps.num_qubits(), 8);
    let expected = 1.0 / 16.0;
    assert!(amps.magnitudes().iter().all(|m| (m - expected).abs() < 1e-10));
    for q in 0..8 {
        assert!((amps.marginal_one(q).unwrap() - 0.5).abs() < 1e-10);
    }
}

#[test]
fn test_example_end_to_end() {
    let sim = StatevectorSimulator::new().with_seed(2024);
    let pipeline = VrpPipeline::new(sim).with_shots(2048);
    let problem = ProblemInstance::example();

    let solution = pipeline.solve(&problem).unwrap();

    // Uniform state: the first amplitude wins and qubit 0 is rotated.
    assert_eq!(solution.optimization.basis_index, 0);
    assert_eq!(solution.optimization.target, 0);
    assert!((solution.optimization.amplitude - 1.0 / 16.0).abs() < 1e-10);

    assert_eq!(solution.assignment.num_customers(), 4);
    assert_eq!(solution.assignment.num_vehicles(), 2);
    assert_eq!(solution.bitstring.len(), 8);
    assert_eq!(solution.shots, 2048);
    assert_eq!(solution.vehicle_capacity, 10);
    assert_eq!(
        solution.plan.num_served() + solution.plan.unassigned.len(),
        4
    );
    assert!(solution.total_distance >= 0.0);
    assert_eq!(
        solution.total_distance,
        qroute_vrp::total_distance(&solution.plan.tours, problem.distance_matrix()).unwrap()
    );
}

#[test]
fn test_seeded_runs_agree() {
    let problem = ProblemInstance::example();
    let a = VrpPipeline::new(StatevectorSimulator::new().with_seed(5))
        .solve(&problem)
        .unwrap();
    let b = VrpPipeline::new(StatevectorSimulator::new().with_seed(5))
        .solve(&problem)
        .unwrap();
    assert_eq!(a.bitstring, b.bitstring);
    assert_eq!(a.total_distance, b.total_distance);
}

#[test]
fn test_solution_serializes() {
    let counts: Counts = [("01", 10), ("10", 3)].into_iter().collect();
    let pipeline = VrpPipeline::new(FakeSimulator::with_counts(counts));
    let solution = pipeline.solve(&two_customers_one_vehicle()).unwrap();

    let json = serde_json::to_value(&solution).unwrap();
    assert_eq!(json["assignment"], serde_json::json!([[0], [1]]));
    assert_eq!(json["plan"]["tours"], serde_json::json!([[1]]));
    assert_eq!(json["total_distance"], serde_json::json!(0.0));
}
