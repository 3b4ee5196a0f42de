//! qroute Simulator Abstraction Layer
//!
//! This crate defines the seam between the routing pipeline and whatever
//! executes its circuits.
//!
//! # Overview
//!
//! - A [`Simulator`] trait with a state-vector mode and a measurement mode
//! - [`Amplitudes`] for state-vector results
//! - [`Counts`] for measurement results, kept in first-observation order
//! - [`SimError`] for everything a simulator can refuse
//!
//! # Implementing a Custom Simulator
//!
//! ```rust
//! use num_complex::Complex64;
//! use qroute_hal::{Amplitudes, Counts, SimError, SimResult, Simulator};
//! use qroute_ir::Circuit;
//!
//! /// Always reports the all-zero state.
//! struct ZeroSim;
//!
//! impl Simulator for ZeroSim {
//!     fn name(&self) -> &str { "zero" }
//!
//!     fn max_qubits(&self) -> u32 { 4 }
//!
//!     fn simulate_statevector(&self, circuit: &Circuit) -> SimResult<Amplitudes> {
//!         let n = circuit.num_qubits();
//!         let mut values = vec![Complex64::new(0.0, 0.0); 1 << n];
//!         values[0] = Complex64::new(1.0, 0.0);
//!         Amplitudes::new(n, values).ok_or_else(|| SimError::Backend("bad size".into()))
//!     }
//!
//!     fn simulate_measurements(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
//!         let mut counts = Counts::new();
//!         counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
//!         Ok(counts)
//!     }
//! }
//!
//! let circuit = Circuit::bell().unwrap();
//! let counts = ZeroSim.simulate_measurements(&circuit, 10).unwrap();
//! assert_eq!(counts.most_frequent(), Some(("00", 10)));
//! ```

pub mod error;
pub mod result;
pub mod simulator;

pub use error::{SimError, SimResult};
pub use result::{Amplitudes, Counts};
pub use simulator::Simulator;

pub use num_complex::Complex64;
