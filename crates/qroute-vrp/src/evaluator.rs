//! Route distance evaluation.

use crate::error::{VrpError, VrpResult};
use crate::problem::DistanceMatrix;

/// Sum of `matrix[route[i]][route[i + 1]]` over one route.
///
/// Routes with fewer than two stops cost nothing. Depot legs are not counted.
pub fn route_distance(route: &[usize], matrix: &DistanceMatrix) -> VrpResult<f64> {
    let size = matrix.size();
    route.windows(2).try_fold(0.0, |total, leg| {
        let (from, to) = (leg[0], leg[1]);
        let d = matrix.get(from, to).ok_or(VrpError::IndexOutOfRange {
            index: if from >= size { from } else { to },
            size,
        })?;
        Ok(total + d)
    })
}

/// Total distance over every route.
pub fn total_distance(routes: &[Vec<usize>], matrix: &DistanceMatrix) -> VrpResult<f64> {
    routes
        .iter()
        .try_fold(0.0, |total, route| Ok(total + route_distance(route, matrix)?))
}
