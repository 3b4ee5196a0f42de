//! The simulator trait.

use qroute_ir::Circuit;

use crate::error::SimResult;
use crate::result::{Amplitudes, Counts};

/// A circuit simulator.
///
/// Simulators are injected into the routing pipeline rather than reached
/// through global state.
///
/// # Contract
///
/// - `simulate_statevector()` returns the final state of the circuit with
///   measurements treated as no-ops. The result has length
///   `2^circuit.num_qubits()`.
/// - `simulate_measurements()` requires every qubit to be measured and
///   returns counts whose bit-strings have one character per classical bit.
/// - Both methods reject circuits wider than `max_qubits()` with
///   [`SimError::CircuitTooLarge`](crate::SimError::CircuitTooLarge).
pub trait Simulator: Send + Sync {
    /// Get the name of this simulator.
    fn name(&self) -> &str;

    /// Largest circuit, in qubits, this simulator accepts.
    fn max_qubits(&self) -> u32;

    /// Run the circuit and return its final amplitudes.
    fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes>;

    /// Run the circuit `shots` times and return the observed bit-strings.
    fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts>;
}

impl<T: Simulator + ?Sized> Simulator for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_qubits(&self) -> u32 {
        (**self).max_qubits()
    }

    fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes> {
        (**self).simulate_statevector(circuit)
    }

    fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        (**self).simulate_measurements(circuit, shots)
    }
}

impl<T: Simulator + ?Sized> Simulator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_qubits(&self) -> u32 {
        (**self).max_qubits()
    }

    fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes> {
        (**self).simulate_statevector(circuit)
    }

    fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        (**self).simulate_measurements(circuit, shots)
    }
}
