//! Error types for the routing pipeline.

use qroute_hal::SimError;
use qroute_ir::IrError;
use thiserror::Error;

/// Errors raised by any stage of the pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VrpError {
    /// The problem instance is malformed.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// The simulator failed or refused the circuit.
    #[error(transparent)]
    Simulation(#[from] SimError),

    /// The simulator returned no measurement outcomes.
    #[error("Measurement returned no outcomes")]
    EmptyMeasurement,

    /// A route references a cell outside the distance matrix.
    #[error("Index {index} out of range for distance matrix of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Side length of the matrix.
        size: usize,
    },

    /// A measured bit-string does not fit the qubit layout.
    #[error("Malformed bit-string: {0}")]
    MalformedBitstring(String),

    /// Circuit construction failed.
    #[error(transparent)]
    Circuit(#[from] IrError),

    /// Problem file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Problem file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for pipeline operations.
pub type VrpResult<T> = Result<T, VrpError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_wrapped_errors_show_their_message_once() {
        let err = VrpError::from(SimError::CircuitTooLarge("8 qubits, limit 4".into()));
        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(inner) = source {
            chain.push(inner.to_string());
            source = inner.source();
        }
        assert_eq!(chain, vec!["Circuit exceeds simulator capacity: 8 qubits, limit 4"]);
    }

    #[test]
    fn test_circuit_error_is_forwarded() {
        let err = VrpError::from(IrError::InvalidInstruction("ragged".into()));
        assert_eq!(err.to_string(), "Invalid instruction: ragged");
        assert!(err.source().is_none());
    }
}
