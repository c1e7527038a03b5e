//! Capacity-constrained split of a depot-first tour into routes.
//!
//! # Algorithm
//!
//! Nodes are tour positions `0..n` (position 0 is the depot). An edge
//! `i → y` means "one route serves positions `i+1..=y`". From each `i` the
//! walk extends `y` while every visited customer has a demand and the
//! running load stays within capacity; the first failure ends the walk.
//!
//! ```text
//! weight(i, y) = d(depot, t[i+1]) + Σ d(t[j], t[j+1]) + d(t[y], depot)
//!                                 j ∈ [i+1, y)
//! ```
//!
//! The cheapest path from position 0 to position `n-1` is found by
//! Bellman-Ford relaxation over the edge list. Its cut points give the
//! routes; the customer order is never changed.
//!
//! # Complexity
//!
//! O(n·E) worst case, E ≤ n² edges; capacity bounds E in practice and the
//! relaxation stops after the first round that changes nothing.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use crate::error::{Result, RoutingError};
use crate::local_search::two_opt;
use crate::models::{tour_length, Instance, Route, Solution, Tour};

/// One candidate route between two cut positions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SegmentEdge {
    from: usize,
    to: usize,
    weight: f64,
}

/// Splits `tour` into capacity-feasible routes of minimum total distance.
///
/// The tour is expected depot first; any other rotation is rotated first.
/// Every route in the result starts and ends with the depot's point id.
///
/// # Errors
///
/// * [`RoutingError::NoDepotFound`] if the tour does not contain the depot.
/// * [`RoutingError::InvalidTour`] if the tour is not a permutation of the
///   instance's locations.
/// * [`RoutingError::InfeasibleDemand`] if no split exists, naming the first
///   customer that cannot be reached: it has no demand, or its demand alone
///   exceeds the capacity.
///
/// # Examples
///
/// ```
/// use depot_routing::decomposition::decompose;
/// use depot_routing::models::{Demand, Instance, Point, Tour, Vehicle};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 1.0, 0.0),
///     Point::customer(2, 2.0, 0.0),
///     Point::customer(3, 3.0, 0.0),
/// ];
/// let demands = (1..=3).map(|i| Demand::new(i, i, 10)).collect();
/// let instance = Instance::new(points, demands, Vehicle::new(20, 0)).unwrap();
///
/// let solution = decompose(&Tour::new(vec![0, 1, 2, 3]), &instance).unwrap();
/// // [1] + [2, 3] = (0→1→0) + (0→2→3→0) = 2 + 6
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.routes()[1].stops(), &[0, 2, 3, 0]);
/// assert!((solution.total_distance() - 8.0).abs() < 1e-10);
/// ```
pub fn decompose(tour: &Tour, instance: &Instance) -> Result<Solution> {
    let depot = instance.depot();
    let mut tour = tour.clone();
    tour.reorder_depot_first(depot)?;
    let t = tour.locations();
    check_permutation(t, instance.len())?;
    let n = t.len();

    if n <= 1 {
        return Ok(Solution::new());
    }

    let edges = segment_edges(t, instance);
    let (dist, pred) = bellman_ford(n, &edges);

    if !dist[n - 1].is_finite() {
        let blocked = dist
            .iter()
            .position(|d| !d.is_finite())
            .unwrap_or(n - 1);
        let location = t[blocked];
        let err = RoutingError::InfeasibleDemand {
            point_id: instance.point_id(location),
            quantity: instance.demand(location),
            capacity: instance.capacity(),
        };
        log::debug!("decompose: infeasible position={blocked} ({err})");
        return Err(err);
    }

    // backtrack from the last position to the depot
    let mut cuts = vec![n - 1];
    let mut at = n - 1;
    while let Some(p) = pred[at] {
        cuts.push(p);
        at = p;
    }
    cuts.reverse();

    let depot_id = instance.depot_id();
    let mut solution = Solution::new();
    let mut cycle = Vec::with_capacity(n);
    for w in cuts.windows(2) {
        let block = &t[w[0] + 1..=w[1]];
        cycle.clear();
        cycle.push(depot);
        cycle.extend_from_slice(block);

        let mut stops: Vec<usize> = cycle.iter().map(|&l| instance.point_id(l)).collect();
        stops.push(depot_id);
        let load = block.iter().filter_map(|&l| instance.demand(l)).sum();
        let distance = tour_length(&cycle, instance.distances(), true);
        solution.add_route(Route::new(stops, distance, load));
    }

    log::debug!(
        "decompose: positions={n} edges={} routes={} distance={:.3}",
        edges.len(),
        solution.num_routes(),
        dist[n - 1]
    );
    Ok(solution)
}

/// Every location `0..len` must appear exactly once.
fn check_permutation(t: &[usize], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    for &loc in t {
        match seen.get_mut(loc) {
            None => {
                return Err(RoutingError::InvalidTour(format!(
                    "location {loc} out of range for {len} points"
                )))
            }
            Some(slot) if *slot => {
                return Err(RoutingError::InvalidTour(format!(
                    "location {loc} visited more than once"
                )))
            }
            Some(slot) => *slot = true,
        }
    }
    if t.len() != len {
        return Err(RoutingError::InvalidTour(format!(
            "tour has {} of {len} locations",
            t.len()
        )));
    }
    Ok(())
}

/// Builds every feasible route edge of a depot-first tour.
fn segment_edges(t: &[usize], instance: &Instance) -> Vec<SegmentEdge> {
    let n = t.len();
    let depot = t[0];
    let capacity = instance.capacity();
    let mut edges = Vec::new();

    for i in 0..n - 1 {
        let mut load = 0i32;
        let mut chain = 0.0;

        for y in i + 1..n {
            let loc = t[y];
            match instance.demand(loc).and_then(|q| load.checked_add(q)) {
                Some(next) if next <= capacity => load = next,
                _ => break,
            }

            chain += if y == i + 1 {
                instance.distance(depot, loc)
            } else {
                instance.distance(t[y - 1], loc)
            };

            edges.push(SegmentEdge {
                from: i,
                to: y,
                weight: chain + instance.distance(loc, depot),
            });
        }
    }

    edges
}

/// Shortest paths from node 0. Returns distances and predecessors.
fn bellman_ford(nodes: usize, edges: &[SegmentEdge]) -> (Vec<f64>, Vec<Option<usize>>) {
    let mut dist = vec![f64::INFINITY; nodes];
    let mut pred = vec![None; nodes];
    dist[0] = 0.0;

    for _ in 1..nodes {
        let mut relaxed = false;
        for e in edges {
            if !dist[e.from].is_finite() {
                continue;
            }
            let candidate = dist[e.from] + e.weight;
            if candidate < dist[e.to] {
                dist[e.to] = candidate;
                pred[e.to] = Some(e.from);
                relaxed = true;
            }
        }
        if !relaxed {
            break;
        }
    }

    (dist, pred)
}

/// Re-optimises each route of `solution` on its own with 2-opt.
///
/// Each route is treated as the closed cycle `depot, customers...`, improved,
/// rotated back to start at the depot and re-closed. Only the order inside a
/// route changes, so coverage and loads are preserved. Route distances are
/// recomputed.
///
/// # Errors
///
/// [`RoutingError::UnknownPointId`] if a route names a point the instance does
/// not know.
pub fn refine_routes(solution: &mut Solution, instance: &Instance) -> Result<()> {
    let depot = instance.depot();
    let depot_id = instance.depot_id();
    let distances = instance.distances();
    let before = solution.total_distance();

    for route in solution.routes_mut() {
        let mut cycle = Vec::with_capacity(route.len() + 1);
        cycle.push(depot);
        for &id in route.customer_ids() {
            cycle.push(instance.index_of(id)?);
        }

        two_opt(&mut cycle, distances);
        if let Some(pos) = cycle.iter().position(|&l| l == depot) {
            cycle.rotate_left(pos);
        }
        let distance = tour_length(&cycle, distances, true);

        let mut stops: Vec<usize> = cycle.iter().map(|&l| instance.point_id(l)).collect();
        stops.push(depot_id);
        route.set_stops(stops, distance);
    }

    log::debug!(
        "refine: routes={} before={before:.3} after={:.3}",
        solution.num_routes(),
        solution.total_distance()
    );
    Ok(())
}
