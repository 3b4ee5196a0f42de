//! Gate vocabulary.

use serde::{Deserialize, Serialize};

/// Gates the simulator knows how to apply.
///
/// The routing circuits only use `H` and `Ry`; the remaining gates cover
/// the reference states and simulator checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    /// Rotations carry their angle in radians.
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// Phase shift of |1⟩.
    P(f64),
    /// Controlled-X; the first operand is the control.
    CX,
    CZ,
    Swap,
}

impl StandardGate {
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Number of qubit operands.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        match *self {
            StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) | StandardGate::P(a) => {
                Some(a)
            }
            _ => None,
        }
    }
}

/// A gate as placed in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: StandardGate,
    /// Free-form annotation, e.g. the pipeline stage that appended the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate { kind, label: None }
    }
}
