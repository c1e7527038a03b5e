//! Dense distance matrix.

use super::Metric;
use crate::models::Point;

/// Pairwise distances between the locations of one instance, row-major.
///
/// Rows and columns are dense location indices (the position of each point in
/// its [`Instance`](crate::models::Instance)), not point ids. Every metric is
/// symmetric, so each pair is computed once and mirrored.
///
/// # Examples
///
/// ```
/// use depot_routing::models::Point;
/// use depot_routing::distance::{DistanceMatrix, Metric};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 3.0, 4.0),
///     Point::customer(2, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, Metric::Euclidean);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.row(2), &[dm.get(2, 0), dm.get(2, 1), 0.0]);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    cells: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the matrix from point coordinates under `metric`.
    pub fn from_points(points: &[Point], metric: Metric) -> Self {
        let size = points.len();
        let mut cells = vec![0.0; size * size];
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let d = metric.distance(a.coords(), b.coords());
                cells[i * size + j] = d;
                cells[j * size + i] = d;
            }
        }
        Self { cells, size }
    }

    /// Distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.size + to]
    }

    /// Distances from `from` to every location, indexed by location.
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of bounds.
    #[inline]
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.size;
        &self.cells[start..start + self.size]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }
}
