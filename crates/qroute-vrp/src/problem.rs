//! Vehicle routing problem instances.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{VrpError, VrpResult};

/// A square matrix of travel costs between customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceMatrix(Vec<Vec<f64>>);

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.0.get(from)?.get(to).copied()
    }

    pub fn is_square(&self) -> bool {
        let n = self.0.len();
        self.0.iter().all(|row| row.len() == n)
    }

    /// Check `d[i][j] == d[j][i]` for every pair, within `1e-9`.
    pub fn is_symmetric(&self) -> bool {
        self.is_square()
            && (0..self.size()).all(|i| {
                (0..i).all(|j| (self.0[i][j] - self.0[j][i]).abs() <= 1e-9)
            })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }
}

impl From<Vec<Vec<f64>>> for DistanceMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }
}

/// A validated problem instance.
///
/// The vehicle capacity is carried through to the solution but never
/// constrains the assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct ProblemInstance {
    customers: Vec<(f64, f64)>,
    vehicles: Vec<(f64, f64)>,
    distance_matrix: DistanceMatrix,
    vehicle_capacity: u32,
}

/// Unvalidated on-disk form of [`ProblemInstance`].
#[derive(Deserialize)]
struct RawProblem {
    customers: Vec<(f64, f64)>,
    vehicles: Vec<(f64, f64)>,
    distance_matrix: DistanceMatrix,
    #[serde(default)]
    vehicle_capacity: u32,
}

impl TryFrom<RawProblem> for ProblemInstance {
    type Error = VrpError;

    fn try_from(raw: RawProblem) -> VrpResult<Self> {
        Self::new(
            raw.customers,
            raw.vehicles,
            raw.distance_matrix,
            raw.vehicle_capacity,
        )
    }
}

impl ProblemInstance {
    /// Create a problem instance, checking its dimensions.
    pub fn new(
        customers: Vec<(f64, f64)>,
        vehicles: Vec<(f64, f64)>,
        distance_matrix: DistanceMatrix,
        vehicle_capacity: u32,
    ) -> VrpResult<Self> {
        if customers.is_empty() {
            return Err(VrpError::InvalidDimension(
                "at least one customer is required".into(),
            ));
        }
        if vehicles.is_empty() {
            return Err(VrpError::InvalidDimension(
                "at least one vehicle is required".into(),
            ));
        }
        if !distance_matrix.is_square() {
            return Err(VrpError::InvalidDimension(
                "distance matrix must be square".into(),
            ));
        }
        if distance_matrix.size() != customers.len() {
            return Err(VrpError::InvalidDimension(format!(
                "distance matrix is {n}x{n} but there are {} customers",
                customers.len(),
                n = distance_matrix.size(),
            )));
        }
        if distance_matrix.rows().iter().flatten().any(|d| !d.is_finite()) {
            return Err(VrpError::InvalidDimension(
                "distance matrix entries must be finite".into(),
            ));
        }

        Ok(Self {
            customers,
            vehicles,
            distance_matrix,
            vehicle_capacity,
        })
    }

    /// Build the distance matrix from straight-line distances between customers.
    pub fn euclidean(
        customers: Vec<(f64, f64)>,
        vehicles: Vec<(f64, f64)>,
        vehicle_capacity: u32,
    ) -> VrpResult<Self> {
        let rows = customers
            .iter()
            .map(|&(x1, y1)| {
                customers
                    .iter()
                    .map(|&(x2, y2)| (x1 - x2).hypot(y1 - y2))
                    .collect()
            })
            .collect::<Vec<Vec<f64>>>();
        Self::new(customers, vehicles, DistanceMatrix(rows), vehicle_capacity)
    }

    /// The built-in demo instance: four customers, two vehicles, capacity 10.
    pub fn example() -> Self {
        Self {
            customers: vec![(0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, 6.0)],
            vehicles: vec![(7.0, 8.0), (9.0, 10.0)],
            distance_matrix: DistanceMatrix(vec![
                vec![0.0, 2.0, 4.0, 6.0],
                vec![2.0, 0.0, 3.0, 5.0],
                vec![4.0, 3.0, 0.0, 2.0],
                vec![6.0, 5.0, 2.0, 0.0],
            ]),
            vehicle_capacity: 10,
        }
    }

    /// Load an instance from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> VrpResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VrpError::Io(format!("{}: {e}", path.display())))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let problem: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| VrpError::Parse(format!("{}: {e}", path.display())))?,
            Some("yaml" | "yml") => serde_yaml_ng::from_str(&contents)
                .map_err(|e| VrpError::Parse(format!("{}: {e}", path.display())))?,
            _ => {
                return Err(VrpError::Parse(format!(
                    "{}: expected a .json, .yaml or .yml file",
                    path.display()
                )));
            }
        };

        debug!(
            customers = problem.num_customers(),
            vehicles = problem.num_vehicles(),
            "Loaded problem from {}",
            path.display()
        );
        Ok(problem)
    }

    pub fn customers(&self) -> &[(f64, f64)] {
        &self.customers
    }

    pub fn vehicles(&self) -> &[(f64, f64)] {
        &self.vehicles
    }

    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distance_matrix
    }

    pub fn vehicle_capacity(&self) -> u32 {
        self.vehicle_capacity
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_example_is_valid() {
        let example = ProblemInstance::example();
        let rebuilt = ProblemInstance::new(
            example.customers().to_vec(),
            example.vehicles().to_vec(),
            example.distance_matrix().clone(),
            example.vehicle_capacity(),
        )
        .unwrap();
        assert_eq!(rebuilt, example);
        assert_eq!(example.num_customers(), 4);
        assert_eq!(example.num_vehicles(), 2);
        assert!(example.distance_matrix().is_symmetric());
        assert_eq!(example.distance_matrix().get(1, 3), Some(5.0));
        assert_eq!(example.distance_matrix().get(4, 0), None);
    }

    #[test]
    fn test_empty_customers_rejected() {
        let err = ProblemInstance::new(vec![], vec![(0.0, 0.0)], DistanceMatrix::new(vec![]), 1)
            .unwrap_err();
        assert!(matches!(err, VrpError::InvalidDimension(_)));
    }

    #[test]
    fn test_empty_vehicles_rejected() {
        let matrix = DistanceMatrix::new(vec![vec![0.0]]);
        let err = ProblemInstance::new(vec![(0.0, 0.0)], vec![], matrix, 1).unwrap_err();
        assert!(matches!(err, VrpError::InvalidDimension(_)));
    }

    #[test]
    fn test_matrix_must_match_customers() {
        let err = ProblemInstance::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0)],
            DistanceMatrix::new(vec![vec![0.0]]),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, VrpError::InvalidDimension(_)));

        let err = ProblemInstance::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0)],
            DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, VrpError::InvalidDimension(_)));
    }

    #[test]
    fn test_non_finite_distance_rejected() {
        let err = ProblemInstance::new(
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0)],
            DistanceMatrix::new(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, VrpError::InvalidDimension(_)));
    }

    #[test]
    fn test_euclidean_matrix() {
        let problem =
            ProblemInstance::euclidean(vec![(0.0, 0.0), (3.0, 4.0)], vec![(0.0, 0.0)], 5).unwrap();
        assert_eq!(problem.distance_matrix().get(0, 1), Some(5.0));
        assert_eq!(problem.distance_matrix().get(1, 1), Some(0.0));
        assert!(problem.distance_matrix().is_symmetric());
    }

    #[test]
    fn test_asymmetric_matrix_detected() {
        let m = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![2.0, 0.0]]);
        assert!(m.is_square());
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_json_roundtrip_revalidates() {
        let json = serde_json::to_string(&ProblemInstance::example()).unwrap();
        let back: ProblemInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProblemInstance::example());

        let bad = r#"{"customers":[],"vehicles":[[0,0]],"distance_matrix":[]}"#;
        assert!(serde_json::from_str::<ProblemInstance>(bad).is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "customers: [[0, 0], [1, 1]]\n\
             vehicles: [[5, 5]]\n\
             distance_matrix:\n  - [0, 1.5]\n  - [1.5, 0]\n\
             vehicle_capacity: 3"
        )
        .unwrap();

        let problem = ProblemInstance::from_file(file.path()).unwrap();
        assert_eq!(problem.num_customers(), 2);
        assert_eq!(problem.vehicle_capacity(), 3);
        assert_eq!(problem.distance_matrix().get(0, 1), Some(1.5));
    }

    #[test]
    fn test_from_file_errors() {
        let missing = ProblemInstance::from_file("/nonexistent/problem.json").unwrap_err();
        assert!(matches!(missing, VrpError::Io(_)));

        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let wrong_ext = ProblemInstance::from_file(file.path()).unwrap_err();
        assert!(matches!(wrong_ext, VrpError::Parse(_)));
    }
}
