//! qroute Local Statevector Simulator
//!
//! This crate provides the [`Simulator`](qroute_hal::Simulator) the `qroute`
//! binary runs against. It uses statevector simulation, which is exact but
//! limited to roughly 20-25 qubits.
//!
//! # Features
//!
//! - **State-vector mode**: the full amplitude vector of the final state
//! - **Measurement mode**: shot sampling with a seedable generator
//! - **All Standard Gates**: every gate in `qroute-ir`
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 8 | ~4 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use qroute_adapter_sim::StatevectorSimulator;
//! use qroute_hal::Simulator;
//! use qroute_ir::Circuit;
//!
//! let sim = StatevectorSimulator::new().with_seed(7);
//! let circuit = Circuit::bell().unwrap();
//! let counts = sim.simulate_measurements(&circuit, 1000).unwrap();
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::StatevectorSimulator;
