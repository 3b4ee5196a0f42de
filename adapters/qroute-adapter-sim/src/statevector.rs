//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qroute_hal::{SimError, SimResult};
use qroute_ir::{Instruction, InstructionKind, StandardGate};

/// A 2x2 unitary, row-major.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A dense statevector over `num_qubits` qubits.
///
/// Basis index bit `q` holds qubit `q`.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    ///
    /// Fails with `CircuitTooLarge` when the `2^n` amplitudes cannot be allocated.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        let too_large = || {
            SimError::CircuitTooLarge(format!(
                "cannot allocate a statevector for {num_qubits} qubits"
            ))
        };
        let len = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(too_large)?;

        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(len)
            .map_err(|_| too_large())?;
        amplitudes.resize(len, ZERO);
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    #[cfg(test)]
    fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply one instruction. Measurements leave the state untouched.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return Ok(());
        };
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        if qubits.len() != gate.num_qubits() as usize {
            return Err(SimError::InvalidCircuit(format!(
                "gate '{}' expects {} qubits, got {}",
                gate.name(),
                gate.num_qubits(),
                qubits.len()
            )));
        }
        if let Some(&q) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(SimError::InvalidCircuit(format!(
                "gate '{}' addresses qubit {q} of a {}-qubit state",
                gate.name(),
                self.num_qubits
            )));
        }

        match gate.kind {
            StandardGate::I => {}
            StandardGate::X => self.apply_single(qubits[0], pauli_x()),
            StandardGate::Y => self.apply_single(qubits[0], pauli_y()),
            StandardGate::Z => self.apply_phase(0, qubits[0], PI),
            StandardGate::H => self.apply_single(qubits[0], hadamard()),
            StandardGate::Rx(theta) => self.apply_single(qubits[0], rx(theta)),
            StandardGate::Ry(theta) => self.apply_single(qubits[0], ry(theta)),
            StandardGate::Rz(theta) => self.apply_single(qubits[0], rz(theta)),
            StandardGate::P(theta) => self.apply_phase(0, qubits[0], theta),
            StandardGate::CX => self.apply_controlled(1 << qubits[0], qubits[1], pauli_x()),
            StandardGate::CZ => self.apply_phase(1 << qubits[0], qubits[1], PI),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
        Ok(())
    }

    fn apply_single(&mut self, target: usize, m: Matrix2) {
        self.apply_controlled(0, target, m);
    }

    /// Apply `m` to `target` on every basis state where all `controls` bits are set.
    fn apply_controlled(&mut self, controls: usize, target: usize, m: Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask != 0 || i & controls != controls {
                continue;
            }
            let j = i | tgt_mask;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
        }
    }

    /// Multiply by `e^{iθ}` where the target and all controls are set.
    fn apply_phase(&mut self, controls: usize, target: usize, theta: f64) {
        let mask = controls | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Draw one basis index with probability |amplitude|².
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        let mut last_nonzero = 0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > 0.0 {
                last_nonzero = i;
            }
            cumulative += p;
            if r < cumulative {
                return i;
            }
        }
        // Rounding left the cumulative sum just under 1.
        last_nonzero
    }
}

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn rx(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn ry(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use qroute_ir::QubitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn gate(g: StandardGate, qubits: &[u32]) -> Instruction {
        Instruction::gate(g, qubits.iter().map(|&q| QubitId(q)))
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes()[0], ONE));
        assert!(sv.amplitudes()[1..].iter().all(|&a| approx_eq(a, ZERO)));
    }

    #[test]
    fn test_hadamard_on_every_qubit_is_uniform() {
        let mut sv = Statevector::new(3).unwrap();
        for q in 0..3 {
            sv.apply(&gate(StandardGate::H, &[q])).unwrap();
        }
        let expected = 1.0 / 8.0_f64.sqrt();
        for amp in sv.amplitudes() {
            assert!(approx_eq(*amp, Complex64::new(expected, 0.0)));
        }
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.apply(&gate(StandardGate::CX, &[0, 1])).unwrap();

        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], h));
        assert!(approx_eq(sv.amplitudes()[1], ZERO));
        assert!(approx_eq(sv.amplitudes()[2], ZERO));
        assert!(approx_eq(sv.amplitudes()[3], h));
    }

    #[test]
    fn test_x_sets_bit_of_its_qubit() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::X, &[1])).unwrap();
        assert!(approx_eq(sv.amplitudes()[0b10], ONE));
    }

    #[test]
    fn test_ry_pi_flips() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply(&gate(StandardGate::Ry(PI), &[0])).unwrap();
        assert!(approx_eq(sv.amplitudes()[0], ZERO));
        assert!(approx_eq(sv.amplitudes()[1], ONE));
    }

    #[test]
    fn test_cz_phases_only_both_set() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.apply(&gate(StandardGate::X, &[1])).unwrap();
        sv.apply(&gate(StandardGate::CZ, &[0, 1])).unwrap();

        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0b10], h));
        assert!(approx_eq(sv.amplitudes()[0b11], -h));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();
        sv.apply(&gate(StandardGate::Swap, &[0, 1])).unwrap();
        assert!(approx_eq(sv.amplitudes()[0b10], ONE));
    }

    #[test]
    fn test_rz_matches_phase_up_to_global_phase() {
        let theta = 0.7;
        let mut a = Statevector::new(1).unwrap();
        a.apply(&gate(StandardGate::H, &[0])).unwrap();
        a.apply(&gate(StandardGate::Rz(theta), &[0])).unwrap();

        let mut b = Statevector::new(1).unwrap();
        b.apply(&gate(StandardGate::H, &[0])).unwrap();
        b.apply(&gate(StandardGate::P(theta), &[0])).unwrap();

        let global = Complex64::from_polar(1.0, -theta / 2.0);
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert!(approx_eq(*x, *y * global));
        }
    }

    #[test]
    fn test_unaddressable_width_is_too_large() {
        assert!(matches!(
            Statevector::new(usize::BITS as usize),
            Err(SimError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_out_of_range_qubit_fails() {
        let mut sv = Statevector::new(1).unwrap();
        let err = sv.apply(&gate(StandardGate::H, &[3])).unwrap_err();
        assert!(matches!(err, SimError::InvalidCircuit(_)));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }
}
