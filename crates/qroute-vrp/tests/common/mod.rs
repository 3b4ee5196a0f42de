//! Deterministic stand-in for a real simulator.

#![allow(dead_code)]

use std::sync::Mutex;

use qroute_hal::{Amplitudes, Complex64, Counts, SimError, SimResult, Simulator};
use qroute_ir::Circuit;

/// What a [`FakeSimulator`] saw.
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub statevector: usize,
    pub measurements: usize,
    pub last_shots: Option<u32>,
    pub last_measured_circuit: Option<Circuit>,
}

/// Returns preset amplitudes and counts.
///
/// Without preset amplitudes the state vector is uniform over the circuit's
/// qubits, which is exactly what the encoder produces.
pub struct FakeSimulator {
    amplitudes: Option<Vec<Complex64>>,
    counts: Counts,
    fail_statevector: bool,
    calls: Mutex<Calls>,
}

impl FakeSimulator {
    pub fn with_counts(counts: Counts) -> Self {
        Self {
            amplitudes: None,
            counts,
            fail_statevector: false,
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn with_amplitudes(mut self, values: &[f64]) -> Self {
        self.amplitudes = Some(values.iter().map(|&re| Complex64::new(re, 0.0)).collect());
        self
    }

    pub fn failing_statevector(mut self) -> Self {
        self.fail_statevector = true;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

impl Simulator for FakeSimulator {
    fn name(&self) -> &str {
        "fake"
    }

    fn max_qubits(&self) -> u32 {
        16
    }

    fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes> {
        self.calls.lock().unwrap().statevector += 1;
        if self.fail_statevector {
            return Err(SimError::Backend("statevector unavailable".into()));
        }

        let n = circuit.num_qubits();
        let values = self.amplitudes.clone().unwrap_or_else(|| {
            let len = 1usize << n;
            vec![Complex64::new(1.0 / (len as f64).sqrt(), 0.0); len]
        });
        Amplitudes::new(n, values).ok_or_else(|| SimError::Backend("wrong length".into()))
    }

    fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        let mut calls = self.calls.lock().unwrap();
        calls.measurements += 1;
        calls.last_shots = Some(shots);
        calls.last_measured_circuit = Some(circuit.clone());
        Ok(self.counts.clone())
    }
}
