//! Error types for the simulator layer.

use thiserror::Error;

/// Errors raised by a [`Simulator`](crate::Simulator).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit exceeds the simulator's qubit limit.
    #[error("Circuit exceeds simulator capacity: {0}")]
    CircuitTooLarge(String),

    /// Measurement mode was requested for a circuit that does not measure every qubit.
    #[error("Circuit is not fully measured: {0}")]
    NotMeasured(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
