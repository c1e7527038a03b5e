//! Validated problem instance.

use std::collections::HashMap;

use crate::distance::{DistanceMatrix, Metric};
use crate::error::{Result, RoutingError};

use super::{Demand, Point, Vehicle};

/// A validated single-depot capacitated routing instance.
///
/// Points are addressed two ways: by their caller-chosen id, and by a dense
/// location index `0..len()` (their position in the input). Tours and the
/// distance matrix use location indices; routes report point ids.
///
/// Construction checks every data-model invariant: exactly one depot, unique
/// point ids, finite coordinates, at most one positive demand per customer, and a positive vehicle
/// capacity with both endpoints at the depot.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Demand, Instance, Point, Vehicle};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 3.0, 4.0),
///     Point::customer(2, 6.0, 8.0),
/// ];
/// let demands = vec![Demand::new(1, 1, 10), Demand::new(2, 2, 20)];
/// let instance = Instance::new(points, demands, Vehicle::new(100, 0)).unwrap();
///
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.depot(), 0);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(instance.demand(2), Some(20));
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    points: Vec<Point>,
    index: HashMap<usize, usize>,
    depot: usize,
    demands: Vec<Option<i32>>,
    vehicle: Vehicle,
    metric: Metric,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance under the default (Euclidean) metric.
    pub fn new(points: Vec<Point>, demands: Vec<Demand>, vehicle: Vehicle) -> Result<Self> {
        Self::with_metric(points, demands, vehicle, Metric::default())
    }

    /// Builds an instance under the given metric.
    pub fn with_metric(
        points: Vec<Point>,
        demands: Vec<Demand>,
        vehicle: Vehicle,
        metric: Metric,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(RoutingError::EmptyInstance);
        }

        let mut index = HashMap::with_capacity(points.len());
        let mut depot: Option<usize> = None;
        for (i, p) in points.iter().enumerate() {
            let (x, y) = p.coords();
            if !(x.is_finite() && y.is_finite()) {
                return Err(RoutingError::NonFiniteCoordinate { point_id: p.id() });
            }
            if index.insert(p.id(), i).is_some() {
                return Err(RoutingError::DuplicatePointId(p.id()));
            }
            if p.is_depot() {
                if let Some(first) = depot {
                    return Err(RoutingError::MultipleDepots {
                        first: points[first].id(),
                        second: p.id(),
                    });
                }
                depot = Some(i);
            }
        }
        let depot = depot.ok_or(RoutingError::NoDepotFound)?;

        let mut by_location = vec![None; points.len()];
        for d in &demands {
            let loc = *index
                .get(&d.point_id())
                .ok_or(RoutingError::UnknownPointId(d.point_id()))?;
            if loc == depot {
                return Err(RoutingError::DemandOnDepot {
                    point_id: d.point_id(),
                });
            }
            if d.quantity() <= 0 {
                return Err(RoutingError::InvalidQuantity {
                    demand_id: d.id(),
                    quantity: d.quantity(),
                });
            }
            if by_location[loc].replace(d.quantity()).is_some() {
                return Err(RoutingError::DuplicateDemand {
                    point_id: d.point_id(),
                });
            }
        }

        if vehicle.capacity() <= 0 {
            return Err(RoutingError::InvalidCapacity(vehicle.capacity()));
        }
        let depot_id = points[depot].id();
        for endpoint in [vehicle.start(), vehicle.end()] {
            if !index.contains_key(&endpoint) {
                return Err(RoutingError::UnknownPointId(endpoint));
            }
            if endpoint != depot_id {
                return Err(RoutingError::VehicleNotAtDepot { point_id: endpoint });
            }
        }

        let distances = DistanceMatrix::from_points(&points, metric);
        log::debug!(
            "instance: points={} demands={} capacity={} metric={metric:?}",
            points.len(),
            demands.len(),
            vehicle.capacity()
        );

        Ok(Self {
            points,
            index,
            depot,
            demands: by_location,
            vehicle,
            metric,
            distances,
        })
    }

    /// Number of locations, depot included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a validated instance holds at least the depot.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in location-index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point at a location index.
    ///
    /// # Panics
    ///
    /// Panics if `location` is out of bounds.
    pub fn point(&self, location: usize) -> &Point {
        &self.points[location]
    }

    /// Point id of a location index.
    pub fn point_id(&self, location: usize) -> usize {
        self.points[location].id()
    }

    /// Resolves a point by id.
    pub fn lookup(&self, id: usize) -> Result<&Point> {
        self.index_of(id).map(|i| &self.points[i])
    }

    /// Location index of a point id.
    pub fn index_of(&self, id: usize) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(RoutingError::UnknownPointId(id))
    }

    /// Location index of the depot.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Point id of the depot.
    pub fn depot_id(&self) -> usize {
        self.points[self.depot].id()
    }

    /// Location indices of all customers, in ascending order.
    pub fn customers(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| i != self.depot).collect()
    }

    /// Demand quantity at a location, `None` if it has no demand.
    pub fn demand(&self, location: usize) -> Option<i32> {
        self.demands[location]
    }

    /// Shared vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.vehicle.capacity()
    }

    /// The vehicle template applied to every trip.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Metric the distance matrix was built with.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Precomputed distances between location indices.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two location indices.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        vec![
            Point::customer(10, 1.0, 0.0),
            Point::depot(99, 0.0, 0.0),
            Point::customer(20, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_instance_indices() {
        let inst = Instance::new(points(), vec![Demand::new(1, 20, 4)], Vehicle::new(10, 99))
            .expect("valid");
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.depot_id(), 99);
        assert_eq!(inst.index_of(20), Ok(2));
        assert_eq!(inst.point_id(0), 10);
        assert_eq!(inst.customers(), vec![0, 2]);
        assert_eq!(inst.demand(2), Some(4));
        assert_eq!(inst.demand(0), None);
        assert!((inst.distance(1, 2) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_lookup_unknown() {
        let inst = Instance::new(points(), vec![], Vehicle::new(10, 99)).expect("valid");
        assert_eq!(inst.lookup(10).map(|p| p.id()), Ok(10));
        assert_eq!(inst.lookup(5).err(), Some(RoutingError::UnknownPointId(5)));
    }

    #[test]
    fn test_empty_instance() {
        let err = Instance::new(vec![], vec![], Vehicle::new(10, 0)).unwrap_err();
        assert_eq!(err, RoutingError::EmptyInstance);
    }

    #[test]
    fn test_no_depot() {
        let pts = vec![Point::customer(1, 0.0, 0.0)];
        let err = Instance::new(pts, vec![], Vehicle::new(10, 1)).unwrap_err();
        assert_eq!(err, RoutingError::NoDepotFound);
    }

    #[test]
    fn test_multiple_depots() {
        let pts = vec![Point::depot(1, 0.0, 0.0), Point::depot(2, 1.0, 0.0)];
        let err = Instance::new(pts, vec![], Vehicle::new(10, 1)).unwrap_err();
        assert_eq!(err, RoutingError::MultipleDepots { first: 1, second: 2 });
    }

    #[test]
    fn test_duplicate_point_id() {
        let pts = vec![Point::depot(1, 0.0, 0.0), Point::customer(1, 1.0, 0.0)];
        let err = Instance::new(pts, vec![], Vehicle::new(10, 1)).unwrap_err();
        assert_eq!(err, RoutingError::DuplicatePointId(1));
    }

    #[test]
    fn test_non_finite_coordinates() {
        let pts = vec![Point::depot(0, 0.0, 0.0), Point::customer(1, f64::NAN, 0.0)];
        let err = Instance::new(pts, vec![], Vehicle::new(10, 0)).unwrap_err();
        assert_eq!(err, RoutingError::NonFiniteCoordinate { point_id: 1 });

        let pts = vec![Point::depot(0, 0.0, f64::INFINITY), Point::customer(1, 1.0, 0.0)];
        let err = Instance::new(pts, vec![], Vehicle::new(10, 0)).unwrap_err();
        assert_eq!(err, RoutingError::NonFiniteCoordinate { point_id: 0 });
    }

    #[test]
    fn test_demand_validation() {
        let vehicle = Vehicle::new(10, 99);
        let err = Instance::new(points(), vec![Demand::new(1, 7, 1)], vehicle.clone()).unwrap_err();
        assert_eq!(err, RoutingError::UnknownPointId(7));

        let err =
            Instance::new(points(), vec![Demand::new(1, 99, 1)], vehicle.clone()).unwrap_err();
        assert_eq!(err, RoutingError::DemandOnDepot { point_id: 99 });

        let err =
            Instance::new(points(), vec![Demand::new(3, 10, 0)], vehicle.clone()).unwrap_err();
        assert_eq!(
            err,
            RoutingError::InvalidQuantity {
                demand_id: 3,
                quantity: 0
            }
        );

        let dup = vec![Demand::new(1, 10, 1), Demand::new(2, 10, 2)];
        let err = Instance::new(points(), dup, vehicle).unwrap_err();
        assert_eq!(err, RoutingError::DuplicateDemand { point_id: 10 });
    }

    #[test]
    fn test_vehicle_validation() {
        let err = Instance::new(points(), vec![], Vehicle::new(0, 99)).unwrap_err();
        assert_eq!(err, RoutingError::InvalidCapacity(0));

        let err = Instance::new(points(), vec![], Vehicle::new(5, 99).with_end(10)).unwrap_err();
        assert_eq!(err, RoutingError::VehicleNotAtDepot { point_id: 10 });

        let err = Instance::new(points(), vec![], Vehicle::new(5, 42)).unwrap_err();
        assert_eq!(err, RoutingError::UnknownPointId(42));
    }

    #[test]
    fn test_great_circle_instance() {
        let inst = Instance::with_metric(
            points(),
            vec![],
            Vehicle::new(5, 99),
            Metric::GreatCircle { radius: 1.0 },
        )
        .expect("valid");
        assert_eq!(inst.metric(), Metric::GreatCircle { radius: 1.0 });
        assert!(inst.distance(0, 1) > 0.0);
    }
}
