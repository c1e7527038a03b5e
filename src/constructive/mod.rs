//! Constructive heuristics for building an initial tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor from the depot, O(n²)
//! - [`randomized`] — Depot first, customers shuffled, O(n)
//! - [`grasp_construction`] — Restricted Candidate List draws (Feo & Resende, 1995), O(n²)
//! - [`pilot`] — Two-candidate greedy lookahead (Duin & Voß, 1999), O(n² log n)
//!
//! [`Construction`] selects one of them by configuration.

mod grasp;
mod nearest_neighbor;
mod pilot;
mod randomized;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Instance, Tour};

pub use grasp::grasp_construction;
pub use nearest_neighbor::nearest_neighbor;
pub use pilot::pilot;
pub use randomized::randomized;

/// A construction strategy.
///
/// # Examples
///
/// ```
/// use depot_routing::constructive::Construction;
/// use depot_routing::models::{Instance, Point, Vehicle};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let points = vec![Point::depot(0, 0.0, 0.0), Point::customer(1, 1.0, 1.0)];
/// let instance = Instance::new(points, vec![], Vehicle::new(5, 0)).unwrap();
///
/// let tour = Construction::Grasp { alpha: 0.2 }.build(&instance, &mut StdRng::seed_from_u64(9));
/// assert_eq!(tour.locations(), &[0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// Deterministic nearest-neighbor.
    NearestNeighbor,
    /// Uniformly shuffled customers.
    #[default]
    Randomized,
    /// RCL-based greedy randomized construction.
    Grasp {
        /// Greediness in `[0, 1]`; 0 = greedy, 1 = random.
        alpha: f64,
    },
    /// Lookahead construction.
    Pilot,
}

impl Construction {
    /// Builds a full tour starting at the depot.
    ///
    /// Deterministic variants ignore `rng`.
    pub fn build<R: Rng + ?Sized>(&self, instance: &Instance, rng: &mut R) -> Tour {
        match *self {
            Construction::NearestNeighbor => nearest_neighbor(instance),
            Construction::Randomized => randomized(instance, rng),
            Construction::Grasp { alpha } => grasp_construction(instance, alpha, rng),
            Construction::Pilot => pilot(instance),
        }
    }
}
