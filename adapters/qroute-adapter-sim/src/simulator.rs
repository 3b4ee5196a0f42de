//! Simulator implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};

use qroute_hal::{Amplitudes, Counts, SimError, SimResult, Simulator};
use qroute_ir::{Circuit, QubitId};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator.
///
/// Both modes evolve the full statevector, so memory grows as `16 * 2^n`
/// bytes. The default limit is 20 qubits.
pub struct StatevectorSimulator {
    max_qubits: u32,
    rng: Mutex<StdRng>,
}

impl StatevectorSimulator {
    /// Create a simulator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Set the largest accepted circuit width.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Seed the sampler so measurement counts are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        Ok(())
    }

    fn evolve(circuit: &Circuit) -> SimResult<Statevector> {
        let mut sv = Statevector::new(circuit.num_qubits())?;
        for inst in circuit.instructions() {
            sv.apply(inst)?;
        }
        Ok(sv)
    }

    /// Map each measured qubit to the classical bits it writes.
    ///
    /// Fails if a gate touches a qubit after it has been measured.
    fn measurement_map(circuit: &Circuit) -> SimResult<Vec<(QubitId, usize)>> {
        let mut measured = FxHashSet::default();
        let mut writes: FxHashMap<usize, QubitId> = FxHashMap::default();

        for inst in circuit.instructions() {
            if inst.is_measure() {
                for (&q, &c) in inst.qubits.iter().zip(&inst.clbits) {
                    measured.insert(q);
                    writes.insert(c.index(), q);
                }
            } else if inst.is_gate() {
                if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                    return Err(SimError::Unsupported(format!(
                        "gate '{}' acts on {q} after it was measured",
                        inst.name()
                    )));
                }
            }
        }

        let mut map: Vec<_> = writes.into_iter().map(|(c, q)| (q, c)).collect();
        map.sort_by_key(|&(_, c)| c);
        Ok(map)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for StatevectorSimulator {
    fn name(&self) -> &str {
        "statevector"
    }

    fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes> {
        self.check_size(circuit)?;
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        let sv = Self::evolve(circuit)?;
        debug!("Statevector ready in {:?}", start.elapsed());

        Amplitudes::new(num_qubits, sv.into_amplitudes()).ok_or_else(|| {
            SimError::Backend(format!("statevector size mismatch for {num_qubits} qubits"))
        })
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        if shots == 0 {
            return Err(SimError::InvalidShots("shots must be at least 1".into()));
        }
        self.check_size(circuit)?;
        if !circuit.is_measured() {
            return Err(SimError::NotMeasured(format!(
                "circuit '{}' must measure all {} qubits",
                circuit.name(),
                circuit.num_qubits()
            )));
        }
        let map = Self::measurement_map(circuit)?;

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let sv = Self::evolve(circuit)?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let mut counts = Counts::new();
        let mut bits = vec!['0'; circuit.num_clbits()];
        for shot in 0..shots {
            let outcome = sv.sample(&mut *rng);
            for &(q, c) in &map {
                bits[c] = if (outcome >> q.index()) & 1 == 1 { '1' } else { '0' };
            }
            counts.insert(bits.iter().collect::<String>(), 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        debug!(
            "Simulation completed in {:?}: {} distinct outcomes",
            start.elapsed(),
            counts.len()
        );
        Ok(counts)
    }
}
