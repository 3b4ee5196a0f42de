//! Problem encoding: one qubit per (customer, vehicle) pair.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qroute_ir::{Circuit, QubitId};

use crate::error::{VrpError, VrpResult};
use crate::problem::ProblemInstance;

/// Maps (customer, vehicle) variables onto qubits, customer-major.
///
/// ```text
/// qubit = customer * num_vehicles + vehicle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitLayout {
    num_customers: usize,
    num_vehicles: usize,
}

impl QubitLayout {
    /// Create a layout. Both counts must be non-zero and the product must fit a `u32`.
    pub fn new(num_customers: usize, num_vehicles: usize) -> VrpResult<Self> {
        if num_customers == 0 {
            return Err(VrpError::InvalidDimension(
                "at least one customer is required".into(),
            ));
        }
        if num_vehicles == 0 {
            return Err(VrpError::InvalidDimension(
                "at least one vehicle is required".into(),
            ));
        }
        let fits = num_customers
            .checked_mul(num_vehicles)
            .is_some_and(|n| u32::try_from(n).is_ok());
        if !fits {
            return Err(VrpError::InvalidDimension(format!(
                "{num_customers} customers x {num_vehicles} vehicles exceeds the qubit index range"
            )));
        }
        Ok(Self {
            num_customers,
            num_vehicles,
        })
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn num_qubits(&self) -> usize {
        self.num_customers * self.num_vehicles
    }

    /// Qubit holding "customer is served by vehicle".
    ///
    /// Returns `None` when either index is outside the layout.
    pub fn qubit(&self, customer: usize, vehicle: usize) -> Option<QubitId> {
        if customer >= self.num_customers || vehicle >= self.num_vehicles {
            return None;
        }
        QubitId::try_from(customer * self.num_vehicles + vehicle).ok()
    }

    /// Inverse of [`qubit`](Self::qubit).
    pub fn variable(&self, qubit: QubitId) -> Option<(usize, usize)> {
        let index = qubit.index();
        (index < self.num_qubits()).then(|| (index / self.num_vehicles, index % self.num_vehicles))
    }
}

/// How far a [`VrpCircuit`] has progressed through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitStage {
    /// Superposition only.
    Encoded,
    /// The optimizer rotation has been appended.
    Optimized,
}

/// A circuit together with the layout that gives its qubits meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VrpCircuit {
    pub(crate) circuit: Circuit,
    pub(crate) layout: QubitLayout,
    pub(crate) stage: CircuitStage,
}

impl VrpCircuit {
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn layout(&self) -> QubitLayout {
        self.layout
    }

    pub fn stage(&self) -> CircuitStage {
        self.stage
    }
}

/// Builds the initial superposition circuit.
///
/// No routing constraints are encoded: every variable starts as an
/// independent 50/50 coin.
pub struct ProblemEncoder;

impl ProblemEncoder {
    /// Encode `num_customers x num_vehicles` variables, one Hadamard each.
    #[instrument]
    pub fn encode(num_customers: usize, num_vehicles: usize) -> VrpResult<VrpCircuit> {
        let layout = QubitLayout::new(num_customers, num_vehicles)?;

        let mut circuit = Circuit::new("vrp");
        // Layout guarantees the qubit count fits a u32.
        circuit.add_qreg("x", layout.num_qubits() as u32);

        for customer in 0..num_customers {
            for vehicle in 0..num_vehicles {
                if let Some(q) = layout.qubit(customer, vehicle) {
                    circuit.h(q)?;
                }
            }
        }

        debug!(
            "Encoded {} customers x {} vehicles into {} qubits",
            num_customers,
            num_vehicles,
            circuit.num_qubits()
        );

        Ok(VrpCircuit {
            circuit,
            layout,
            stage: CircuitStage::Encoded,
        })
    }

    /// Encode the dimensions of `problem`.
    pub fn encode_problem(problem: &ProblemInstance) -> VrpResult<VrpCircuit> {
        Self::encode(problem.num_customers(), problem.num_vehicles())
    }
}
