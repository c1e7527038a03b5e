//! Nearest-neighbor constructive heuristic.
//!
//! Starting from the depot, always move to the nearest unvisited location
//! until every location is in the tour.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.

use crate::models::{Instance, Tour};

/// Builds a tour greedily from the depot.
///
/// Ties are broken in favour of the lowest location index.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Instance, Point, Vehicle};
/// use depot_routing::constructive::nearest_neighbor;
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 3.0, 0.0),
///     Point::customer(2, 1.0, 0.0),
///     Point::customer(3, 2.0, 0.0),
/// ];
/// let instance = Instance::new(points, vec![], Vehicle::new(10, 0)).unwrap();
///
/// let tour = nearest_neighbor(&instance);
/// assert_eq!(tour.locations(), &[0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor(instance: &Instance) -> Tour {
    let n = instance.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = instance.depot();
    visited[current] = true;
    order.push(current);

    while let Some(next) = nearest_unvisited(instance, current, &visited) {
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::new(order)
}

/// Nearest location to `from` not yet marked in `visited`.
pub(crate) fn nearest_unvisited(
    instance: &Instance,
    from: usize,
    visited: &[bool],
) -> Option<usize> {
    let row = instance.distances().row(from);
    let mut best: Option<(usize, f64)> = None;
    for (i, _) in visited.iter().enumerate().filter(|(_, &v)| !v) {
        let d = row[i];
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, Vehicle};

    fn line_instance() -> Instance {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 2.0, 0.0),
            Point::customer(3, 3.0, 0.0),
        ];
        Instance::new(points, vec![], Vehicle::new(100, 0)).expect("valid")
    }

    #[test]
    fn test_nn_line_order() {
        let tour = nearest_neighbor(&line_instance());
        assert_eq!(tour.locations(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 10.0, 0.0), // far
            Point::customer(2, 1.0, 0.0),  // near
        ];
        let inst = Instance::new(points, vec![], Vehicle::new(100, 0)).expect("valid");
        assert_eq!(nearest_neighbor(&inst).locations(), &[0, 2, 1]);
    }

    #[test]
    fn test_nn_depot_not_first_in_input() {
        let points = vec![
            Point::customer(1, 5.0, 0.0),
            Point::customer(2, 1.0, 0.0),
            Point::depot(0, 0.0, 0.0),
        ];
        let inst = Instance::new(points, vec![], Vehicle::new(100, 0)).expect("valid");
        assert_eq!(nearest_neighbor(&inst).locations(), &[2, 1, 0]);
    }

    #[test]
    fn test_nn_tie_lowest_index() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 0.0, 1.0),
            Point::customer(2, 1.0, 0.0),
        ];
        let inst = Instance::new(points, vec![], Vehicle::new(100, 0)).expect("valid");
        assert_eq!(nearest_neighbor(&inst).locations(), &[0, 1, 2]);
    }

    #[test]
    fn test_nn_depot_only() {
        let inst = Instance::new(vec![Point::depot(0, 0.0, 0.0)], vec![], Vehicle::new(1, 0))
            .expect("valid");
        assert_eq!(nearest_neighbor(&inst).locations(), &[0]);
    }
}
