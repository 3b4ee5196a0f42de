//! Measurement decoding.

use ndarray::{Array2, ArrayView1};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::{debug, info, instrument};

use qroute_hal::{Counts, SimError, Simulator};

use crate::encoder::{CircuitStage, QubitLayout, VrpCircuit};
use crate::error::{VrpError, VrpResult};

/// Default number of measurement shots.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Per-customer vehicle-indicator bits, shape `(num_customers, num_vehicles)`.
///
/// Entry `(c, v)` is 1 when the winning bit-string set qubit
/// `c * num_vehicles + v`. Nothing forces exactly one bit per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAssignment {
    bits: Array2<u8>,
}

impl RouteAssignment {
    pub fn from_groups(groups: Vec<Vec<u8>>) -> VrpResult<Self> {
        let rows = groups.len();
        let cols = groups.first().map_or(0, Vec::len);
        if groups.iter().any(|g| g.len() != cols) {
            return Err(VrpError::MalformedBitstring(
                "route groups must all have the same length".into(),
            ));
        }
        if groups.iter().flatten().any(|&b| b > 1) {
            return Err(VrpError::MalformedBitstring(
                "route groups may only contain 0 and 1".into(),
            ));
        }
        let flat = groups.into_iter().flatten().collect();
        let bits = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| VrpError::MalformedBitstring(e.to_string()))?;
        Ok(Self { bits })
    }

    pub fn num_customers(&self) -> usize {
        self.bits.nrows()
    }

    pub fn num_vehicles(&self) -> usize {
        self.bits.ncols()
    }

    /// Indicator bits of one customer.
    pub fn customer(&self, customer: usize) -> Option<ArrayView1<'_, u8>> {
        (customer < self.bits.nrows()).then(|| self.bits.row(customer))
    }

    pub fn groups(&self) -> Vec<Vec<u8>> {
        self.bits.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    pub fn bits(&self) -> &Array2<u8> {
        &self.bits
    }
}

impl fmt::Display for RouteAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.bits.rows().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, bit) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{bit}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl Serialize for RouteAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.bits.nrows()))?;
        for row in self.bits.rows() {
            seq.serialize_element(&row.to_vec())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RouteAssignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Self::from_groups(groups).map_err(serde::de::Error::custom)
    }
}

/// Result of the measurement stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedMeasurement {
    /// Winning bit-string.
    pub bitstring: String,
    /// How often it was observed.
    pub frequency: u64,
    pub shots: u32,
    pub assignment: RouteAssignment,
    /// Every observed outcome, in first-observation order.
    pub counts: Counts,
}

/// Pick the most frequent outcome.
///
/// Ties go to the outcome the simulator reported first.
pub fn select_majority(counts: &Counts) -> VrpResult<(String, u64)> {
    counts
        .most_frequent()
        .map(|(bitstring, frequency)| (bitstring.to_string(), frequency))
        .ok_or(VrpError::EmptyMeasurement)
}

/// Split a bit-string into customer-major groups of `num_vehicles` bits.
pub fn reshape(bitstring: &str, layout: QubitLayout) -> VrpResult<RouteAssignment> {
    if bitstring.len() != layout.num_qubits() {
        return Err(VrpError::MalformedBitstring(format!(
            "expected {} bits, got '{}'",
            layout.num_qubits(),
            bitstring
        )));
    }
    let bits = bitstring
        .chars()
        .map(|c| match c {
            '0' => Ok(0u8),
            '1' => Ok(1u8),
            other => Err(VrpError::MalformedBitstring(format!(
                "unexpected character '{other}' in '{bitstring}'"
            ))),
        })
        .collect::<VrpResult<Vec<u8>>>()?;

    let bits = Array2::from_shape_vec((layout.num_customers(), layout.num_vehicles()), bits)
        .map_err(|e| VrpError::MalformedBitstring(e.to_string()))?;
    Ok(RouteAssignment { bits })
}

/// Measures the optimized circuit and decodes the majority outcome.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementDecoder {
    shots: u32,
}

impl MeasurementDecoder {
    pub fn new(shots: u32) -> Self {
        Self { shots }
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    #[instrument(skip_all, fields(simulator = simulator.name(), shots = self.shots))]
    pub fn decode<S: Simulator>(
        &self,
        simulator: &S,
        vrp: &VrpCircuit,
    ) -> VrpResult<DecodedMeasurement> {
        if vrp.stage == CircuitStage::Encoded {
            return Err(SimError::InvalidCircuit(
                "circuit has not been optimized; nothing to measure yet".into(),
            )
            .into());
        }

        let mut measured = vrp.circuit.clone();
        measured.measure_all()?;

        let counts = simulator.simulate_measurements(&measured, self.shots)?;
        debug!("Received {} distinct outcomes", counts.len());

        let (bitstring, frequency) = select_majority(&counts)?;
        let assignment = reshape(&bitstring, vrp.layout)?;

        info!(
            "Majority outcome {} seen {} of {} shots",
            bitstring,
            frequency,
            counts.total_shots()
        );

        Ok(DecodedMeasurement {
            bitstring,
            frequency,
            shots: self.shots,
            assignment,
            counts,
        })
    }
}

impl Default for MeasurementDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_SHOTS)
    }
}
