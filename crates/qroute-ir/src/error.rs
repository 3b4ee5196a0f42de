//! Circuit construction errors.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("{qubit} is not part of the circuit{}", context(.gate_name))]
    QubitNotFound {
        qubit: QubitId,
        gate_name: Option<String>,
    },

    #[error("{clbit} is not part of the circuit{}", context(.gate_name))]
    ClbitNotFound {
        clbit: ClbitId,
        gate_name: Option<String>,
    },

    #[error("'{gate_name}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch {
        gate_name: String,
        expected: u32,
        got: u32,
    },

    /// The same qubit appears twice in one instruction.
    #[error("{qubit} used twice{}", context(.gate_name))]
    DuplicateQubit {
        qubit: QubitId,
        gate_name: Option<String>,
    },

    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),

    /// A wire's id does not match its position in the circuit.
    #[error("{found} listed at position {position}")]
    MisplacedWire { found: String, position: usize },
}

#[allow(clippy::ref_option)]
fn context(gate_name: &Option<String>) -> String {
    gate_name
        .as_ref()
        .map(|name| format!(" (referenced by '{name}')"))
        .unwrap_or_default()
}

pub type IrResult<T> = Result<T, IrError>;
