//! qroute Circuit Description
//!
//! This crate provides the data structures the routing pipeline uses to describe
//! quantum circuits before they are handed to a simulator.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over a fixed set of
//! qubits and classical bits. Instructions are kept in exactly the order they
//! were appended; simulators replay them front to back.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the built-in gate set, wrapped in [`Gate`]
//! - **Instructions**: [`Instruction`] combining an operation with its operands
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: Equal Superposition
//!
//! ```rust
//! use qroute_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("superposition", 3, 0);
//! for q in 0..3 {
//!     circuit.h(QubitId(q)).unwrap();
//! }
//! circuit.ry(0.25, QubitId(0)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.num_clbits(), 3);
//! assert!(circuit.is_measured());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits |
//! |------|--------|
//! | `I`, `X`, `Y`, `Z`, `H` | 1 |
//! | `Rx`, `Ry`, `Rz`, `P` (angle in radians) | 1 |
//! | `CX`, `CZ`, `Swap` | 2 |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
