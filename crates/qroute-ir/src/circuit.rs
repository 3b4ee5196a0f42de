//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Instructions are stored in the order they were appended. Every appended
/// instruction is validated against the circuit's qubits and classical bits,
/// so a `Circuit` never references an operand it does not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    instructions: Vec<Instruction>,
}

/// Serialized form of [`Circuit`]; instructions are replayed through `apply`.
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let qubit_ids = raw.qubits.iter().map(|q| (q.id.index(), q.to_string()));
        let clbit_ids = raw.clbits.iter().map(|c| (c.id.index(), c.to_string()));
        for (position, (index, found)) in qubit_ids
            .enumerate()
            .chain(clbit_ids.enumerate())
        {
            if index != position {
                return Err(IrError::MisplacedWire { found, position });
            }
        }

        let mut circuit = Self {
            name: raw.name,
            qubits: raw.qubits,
            clbits: raw.clbits,
            instructions: Vec::with_capacity(raw.instructions.len()),
        };
        for inst in raw.instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: Vec::new(),
            clbits: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// A circuit with anonymous qubits `q0..` and classical bits `c0..`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.qubits = (0..num_qubits).map(|i| Qubit::new(QubitId(i))).collect();
        circuit.clbits = (0..num_clbits).map(|i| Clbit::new(ClbitId(i))).collect();
        circuit
    }

    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Append a named register of `size` qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let first = self.qubits.len() as u32;
        let ids: Vec<_> = (first..first + size).map(QubitId).collect();
        self.qubits.extend(
            ids.iter()
                .zip(0..)
                .map(|(&id, i)| Qubit::with_register(id, &name, i)),
        );
        ids
    }

    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Append a named register of `size` classical bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let first = self.clbits.len() as u32;
        let ids: Vec<_> = (first..first + size).map(ClbitId).collect();
        self.clbits.extend(
            ids.iter()
                .zip(0..)
                .map(|(&id, i)| Clbit::with_register(id, &name, i)),
        );
        ids
    }

    /// Validate and append an instruction.
    ///
    /// Nothing is appended when validation fails.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, inst: &Instruction) -> IrResult<()> {
        let gate_name = || inst.as_gate().map(|g| g.name().to_string());

        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let got = inst.qubits.len() as u32;
                if gate.num_qubits() != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            InstructionKind::Measure if inst.qubits.len() != inst.clbits.len() => {
                return Err(IrError::InvalidInstruction(format!(
                    "measurement pairs {} qubits with {} classical bits",
                    inst.qubits.len(),
                    inst.clbits.len(),
                )));
            }
            _ => {}
        }

        if let Some(&qubit) = inst.qubits.iter().find(|q| q.index() >= self.qubits.len()) {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name(),
            });
        }

        let mut seen = FxHashSet::default();
        if let Some(&qubit) = inst.qubits.iter().find(|&&q| !seen.insert(q)) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: gate_name(),
            });
        }

        if let Some(&clbit) = inst.clbits.iter().find(|c| c.index() >= self.clbits.len()) {
            return Err(IrError::ClbitNotFound {
                clbit,
                gate_name: gate_name(),
            });
        }

        Ok(())
    }

    fn one(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, [qubit]))
    }

    fn two(&mut self, gate: StandardGate, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, [a, b]))
    }

    // -- gates ----------------------------------------------------------------

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::H, qubit)
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::X, qubit)
    }

    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Y, qubit)
    }

    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Z, qubit)
    }

    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Rx(theta), qubit)
    }

    /// Rotate `qubit` about the Y axis; `Ry(π)` maps |0⟩ to |1⟩.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Ry(theta), qubit)
    }

    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::Rz(theta), qubit)
    }

    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.one(StandardGate::P(theta), qubit)
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::CX, control, target)
    }

    pub fn cz(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::CZ, a, b)
    }

    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.two(StandardGate::Swap, a, b)
    }

    // -- other operations -----------------------------------------------------

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure qubit `i` into classical bit `i` for every qubit, adding
    /// classical bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for _ in self.clbits.len()..self.qubits.len() {
            self.add_clbit();
        }

        let qubits = self.qubits.iter().map(|q| q.id).collect();
        let clbits = self.clbits[..self.qubits.len()]
            .iter()
            .map(|c| c.id)
            .collect();
        self.apply(Instruction::measure_many(qubits, clbits)?)
    }

    // -- accessors ------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Number of instructions, measurements included.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Circuit depth: the longest chain of instructions sharing a wire.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.qubits.len()];
        let mut clbit_depth = vec![0usize; self.clbits.len()];

        for inst in &self.instructions {
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_depth[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_depth[c.index()]))
                .max()
                .unwrap_or(0);
            let layer = start + 1;
            for q in &inst.qubits {
                qubit_depth[q.index()] = layer;
            }
            for c in &inst.clbits {
                clbit_depth[c.index()] = layer;
            }
        }

        qubit_depth
            .into_iter()
            .chain(clbit_depth)
            .max()
            .unwrap_or(0)
    }

    /// Check that every qubit is measured at least once.
    pub fn is_measured(&self) -> bool {
        if self.qubits.is_empty() {
            return false;
        }
        let measured: FxHashSet<QubitId> = self
            .instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect();
        self.qubits.iter().all(|q| measured.contains(&q.id))
    }

    // -- reference states -----------------------------------------------------

    /// (|00⟩ + |11⟩)/√2, measured.
    pub fn bell() -> IrResult<Self> {
        Self::ghz(2).map(|mut c| {
            c.name = "bell".to_string();
            c
        })
    }

    /// (|0…0⟩ + |1…1⟩)/√2 over `n` qubits, measured. Empty for `n == 0`.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for (control, target) in (0..n).zip(1..n) {
            circuit.cx(QubitId(control), QubitId(target))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}
