//! Solution evaluator that recomputes distances and checks feasibility.

use serde::{Deserialize, Serialize};

use crate::models::{tour_length, Instance, Solution};

/// Reported routes must match recomputed distances within this tolerance.
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// A constraint a solution breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// Route load above vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Sum of the demands served by the route.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Route visits a customer that has no demand to serve.
    MissingDemand {
        /// Route index.
        route_index: usize,
        /// Point id of the customer.
        point_id: usize,
    },
    /// A customer no route visits.
    MissingCustomer {
        /// Point id of the customer.
        point_id: usize,
    },
    /// A customer visited more than once.
    DuplicateVisit {
        /// Point id of the customer.
        point_id: usize,
    },
    /// Route does not start and end at the depot, or visits it in between.
    DepotMisplaced {
        /// Route index.
        route_index: usize,
    },
    /// Route names a point the instance does not contain.
    UnknownPoint {
        /// Route index.
        route_index: usize,
        /// The unknown id.
        point_id: usize,
    },
    /// Stored route distance differs from the recomputed one.
    DistanceMismatch {
        /// Route index.
        route_index: usize,
        /// Distance stored on the route.
        reported: f64,
        /// Distance recomputed from the instance.
        actual: f64,
    },
}

/// Result of evaluating a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Recomputed total distance over every route.
    pub total_distance: f64,
    /// Every violation found, in route order, then missing customers.
    pub violations: Vec<Violation>,
}

impl Evaluation {
    /// Returns `true` when no violation was found.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks solutions against an instance.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Demand, Instance, Point, Route, Solution, Vehicle};
/// use depot_routing::evaluation::{SolutionEvaluator, Violation};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 3.0, 4.0),
///     Point::customer(2, 6.0, 8.0),
/// ];
/// let demands = vec![Demand::new(0, 1, 10), Demand::new(1, 2, 20)];
/// let instance = Instance::new(points, demands, Vehicle::new(25, 0)).unwrap();
///
/// let mut solution = Solution::new();
/// solution.add_route(Route::new(vec![0, 1, 2, 0], 20.0, 30));
///
/// let evaluation = SolutionEvaluator::new(&instance).evaluate(&solution);
/// assert!((evaluation.total_distance - 20.0).abs() < 1e-10);
/// assert_eq!(
///     evaluation.violations,
///     vec![Violation::CapacityExceeded { route_index: 0, load: 30, capacity: 25 }]
/// );
/// ```
pub struct SolutionEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates an evaluator for `instance`.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Recomputes route distances and collects every violation.
    pub fn evaluate(&self, solution: &Solution) -> Evaluation {
        let instance = self.instance;
        let depot = instance.depot();
        let depot_id = instance.depot_id();
        let mut visits = vec![0u32; instance.len()];
        let mut violations = Vec::new();
        let mut total_distance = 0.0;

        for (route_index, route) in solution.routes().iter().enumerate() {
            let stops = route.stops();
            if stops.len() < 2 || stops[0] != depot_id || stops[stops.len() - 1] != depot_id {
                violations.push(Violation::DepotMisplaced { route_index });
            }

            let mut cycle = vec![depot];
            let mut load = 0i64;
            for &id in route.customer_ids() {
                let loc = match instance.index_of(id) {
                    Ok(loc) => loc,
                    Err(_) => {
                        violations.push(Violation::UnknownPoint {
                            route_index,
                            point_id: id,
                        });
                        continue;
                    }
                };
                if loc == depot {
                    violations.push(Violation::DepotMisplaced { route_index });
                    continue;
                }

                visits[loc] += 1;
                if visits[loc] == 2 {
                    violations.push(Violation::DuplicateVisit { point_id: id });
                }
                match instance.demand(loc) {
                    Some(q) => load += i64::from(q),
                    None => violations.push(Violation::MissingDemand {
                        route_index,
                        point_id: id,
                    }),
                }
                cycle.push(loc);
            }

            if load > i64::from(instance.capacity()) {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load,
                    capacity: instance.capacity(),
                });
            }

            let actual = tour_length(&cycle, instance.distances(), true);
            if (route.total_distance() - actual).abs() > DISTANCE_TOLERANCE {
                violations.push(Violation::DistanceMismatch {
                    route_index,
                    reported: route.total_distance(),
                    actual,
                });
            }
            total_distance += actual;
        }

        for loc in instance.customers() {
            if visits[loc] == 0 {
                violations.push(Violation::MissingCustomer {
                    point_id: instance.point_id(loc),
                });
            }
        }

        log::debug!(
            "evaluate: routes={} distance={total_distance:.3} violations={}",
            solution.num_routes(),
            violations.len()
        );

        Evaluation {
            total_distance,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Demand, Point, Route, Vehicle};

    fn setup() -> Instance {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 1.0, 1.0),
            Point::customer(3, 0.0, 1.0),
        ];
        let demands = vec![
            Demand::new(0, 1, 4),
            Demand::new(1, 2, 4),
            Demand::new(2, 3, 4),
        ];
        Instance::new(points, demands, Vehicle::new(8, 0)).expect("valid")
    }

    #[test]
    fn test_feasible_solution() {
        let inst = setup();
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![0, 1, 2, 0], 2.0 + 2f64.sqrt(), 8));
        sol.add_route(Route::new(vec![0, 3, 0], 2.0, 4));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert!(eval.is_feasible(), "{:?}", eval.violations);
        assert!((eval.total_distance - (4.0 + 2f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_missing_and_duplicate() {
        let inst = setup();
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![0, 1, 0], 2.0, 4));
        sol.add_route(Route::new(vec![0, 1, 0], 2.0, 4));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert_eq!(
            eval.violations,
            vec![
                Violation::DuplicateVisit { point_id: 1 },
                Violation::MissingCustomer { point_id: 2 },
                Violation::MissingCustomer { point_id: 3 },
            ]
        );
    }

    #[test]
    fn test_depot_misplaced_and_unknown() {
        let inst = setup();
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![1, 2, 3, 0, 7, 1], 0.0, 0));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert!(eval.violations.contains(&Violation::DepotMisplaced { route_index: 0 }));
        assert!(eval.violations.contains(&Violation::UnknownPoint {
            route_index: 0,
            point_id: 7
        }));
        assert!(!eval.is_feasible());
    }

    #[test]
    fn test_load_near_i32_max() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 2.0, 0.0),
        ];
        let demands = vec![Demand::new(0, 1, 1), Demand::new(1, 2, i32::MAX)];
        let inst = Instance::new(points, demands, Vehicle::new(i32::MAX, 0)).expect("valid");
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![0, 1, 2, 0], 4.0, i32::MAX));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert_eq!(
            eval.violations,
            vec![Violation::CapacityExceeded {
                route_index: 0,
                load: i64::from(i32::MAX) + 1,
                capacity: i32::MAX,
            }]
        );
    }

    #[test]
    fn test_customer_without_demand() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 0.0, 1.0),
        ];
        let inst =
            Instance::new(points, vec![Demand::new(0, 1, 3)], Vehicle::new(10, 0)).expect("valid");
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![0, 1, 2, 0], 2.0 + 2f64.sqrt(), 3));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert_eq!(
            eval.violations,
            vec![Violation::MissingDemand {
                route_index: 0,
                point_id: 2
            }]
        );
    }

    #[test]
    fn test_distance_mismatch() {
        let inst = setup();
        let mut sol = Solution::new();
        sol.add_route(Route::new(vec![0, 1, 0], 5.0, 4));
        sol.add_route(Route::new(vec![0, 2, 3, 0], 2.0 + 2f64.sqrt(), 8));
        let eval = SolutionEvaluator::new(&inst).evaluate(&sol);
        assert_eq!(eval.violations.len(), 1);
        match &eval.violations[0] {
            Violation::DistanceMismatch {
                route_index,
                reported,
                actual,
            } => {
                assert_eq!(*route_index, 0);
                assert_eq!(*reported, 5.0);
                assert!((actual - 2.0).abs() < 1e-10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
