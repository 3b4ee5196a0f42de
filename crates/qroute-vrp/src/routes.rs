//! Turning indicator bits into vehicle tours.
//!
//! Each customer row of a [`RouteAssignment`] is read as a vehicle selector:
//! the customer rides with the lowest-indexed vehicle whose bit is set. A
//! vehicle's customers are then visited in nearest-neighbour order, starting
//! from its lowest-indexed customer.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decoder::RouteAssignment;
use crate::error::{VrpError, VrpResult};
use crate::problem::DistanceMatrix;

/// Vehicle tours derived from an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Customer indices visited by each vehicle, in visiting order.
    pub tours: Vec<Vec<usize>>,
    /// Customers with no vehicle bit set.
    pub unassigned: Vec<usize>,
    /// Customers with more than one vehicle bit set.
    pub conflicts: Vec<usize>,
}

impl RoutePlan {
    pub fn from_assignment(
        assignment: &RouteAssignment,
        matrix: &DistanceMatrix,
    ) -> VrpResult<Self> {
        let size = matrix.size();
        if assignment.num_customers() > size {
            return Err(VrpError::IndexOutOfRange {
                index: assignment.num_customers() - 1,
                size,
            });
        }

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); assignment.num_vehicles()];
        let mut unassigned = Vec::new();
        let mut conflicts = Vec::new();

        for (customer, row) in assignment.bits().rows().into_iter().enumerate() {
            let mut selected = row
                .iter()
                .enumerate()
                .filter(|&(_, &bit)| bit == 1)
                .map(|(vehicle, _)| vehicle);

            match selected.next() {
                None => unassigned.push(customer),
                Some(vehicle) => {
                    members[vehicle].push(customer);
                    if selected.next().is_some() {
                        conflicts.push(customer);
                    }
                }
            }
        }

        if !unassigned.is_empty() {
            warn!("Customers {:?} have no vehicle", unassigned);
        }
        if !conflicts.is_empty() {
            warn!(
                "Customers {:?} select several vehicles; keeping the lowest",
                conflicts
            );
        }

        let tours = members
            .into_iter()
            .map(|customers| nearest_neighbour(customers, matrix))
            .collect::<VrpResult<Vec<_>>>()?;
        debug!("Planned tours {:?}", tours);

        Ok(Self {
            tours,
            unassigned,
            conflicts,
        })
    }

    /// Every customer has exactly one vehicle.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty() && self.conflicts.is_empty()
    }

    pub fn num_served(&self) -> usize {
        self.tours.iter().map(Vec::len).sum()
    }
}

/// Order customers greedily by distance, starting at the lowest index.
///
/// `remaining` must be sorted ascending. Ties go to the lower index.
fn nearest_neighbour(mut remaining: Vec<usize>, matrix: &DistanceMatrix) -> VrpResult<Vec<usize>> {
    let size = matrix.size();
    if let Some(&index) = remaining.iter().find(|&&c| c >= size) {
        return Err(VrpError::IndexOutOfRange { index, size });
    }
    if remaining.is_empty() {
        return Ok(remaining);
    }

    let mut tour = Vec::with_capacity(remaining.len());
    let mut current = remaining.remove(0);
    tour.push(current);

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let d = matrix
                .get(current, candidate)
                .ok_or(VrpError::IndexOutOfRange {
                    index: candidate,
                    size,
                })?;
            if d < best_distance {
                best = pos;
                best_distance = d;
            }
        }
        current = remaining.remove(best);
        tour.push(current);
    }
    Ok(tour)
}
