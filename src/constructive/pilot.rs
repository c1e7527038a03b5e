//! Pilot (lookahead) construction.
//!
//! At every step the two unvisited locations closest to the current one are
//! taken as candidates. Each candidate is scored by its own leg plus a short
//! greedy continuation from it, and the cheaper candidate is appended.
//!
//! # Reference
//!
//! Duin, C. & Voß, S. (1999). "The Pilot Method: A Strategy for Heuristic
//! Repetition with Application to the Steiner Problem in Graphs", *Networks*
//! 34(3), 181-191.

use crate::models::{Instance, Tour};

use super::nearest_neighbor::nearest_unvisited;

/// Candidates compared at each step.
const PILOT_CANDIDATES: usize = 2;

/// Greedy steps simulated after each candidate.
const PILOT_DEPTH: usize = 2;

/// Builds a tour from the depot with a two-candidate, two-step lookahead.
///
/// On equal simulated cost the nearer candidate is kept.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Instance, Point, Vehicle};
/// use depot_routing::constructive::pilot;
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 1.0, 0.0),
///     Point::customer(2, 2.0, 0.0),
/// ];
/// let instance = Instance::new(points, vec![], Vehicle::new(10, 0)).unwrap();
/// assert_eq!(pilot(&instance).locations(), &[0, 1, 2]);
/// ```
pub fn pilot(instance: &Instance) -> Tour {
    let n = instance.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = instance.depot();
    visited[current] = true;
    order.push(current);

    let mut scratch = vec![false; n];
    while order.len() < n {
        let candidates = closest_unvisited(instance, current, &visited, PILOT_CANDIDATES);

        let mut best: Option<(usize, f64)> = None;
        for &c in &candidates {
            scratch.copy_from_slice(&visited);
            let cost = instance.distance(current, c) + greedy_rollout(instance, c, &mut scratch);
            if best.map_or(true, |(_, bc)| cost < bc) {
                best = Some((c, cost));
            }
        }

        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::new(order)
}

/// Up to `k` unvisited locations nearest to `from`, nearest first.
///
/// Equal distances keep ascending index order.
fn closest_unvisited(
    instance: &Instance,
    from: usize,
    visited: &[bool],
    k: usize,
) -> Vec<usize> {
    let mut candidates: Vec<(usize, f64)> = visited
        .iter()
        .enumerate()
        .filter(|(_, &v)| !v)
        .map(|(i, _)| (i, instance.distance(from, i)))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates.truncate(k);
    candidates.into_iter().map(|(i, _)| i).collect()
}

/// Distance of a [`PILOT_DEPTH`]-step nearest-neighbour walk from `start`.
///
/// `visited` is scratch space and is overwritten.
fn greedy_rollout(instance: &Instance, start: usize, visited: &mut [bool]) -> f64 {
    visited[start] = true;
    let mut current = start;
    let mut total = 0.0;
    for _ in 0..PILOT_DEPTH {
        let Some(next) = nearest_unvisited(instance, current, visited) else {
            break;
        };
        total += instance.distance(current, next);
        visited[next] = true;
        current = next;
    }
    total
}
