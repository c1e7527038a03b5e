//! Perturbation strategies for escaping 2-opt local optima.
//!
//! - [`triple_shift`] — Rotate the values at three random positions
//! - [`oscillating_swap`] — Random swaps, count driven by an oscillating function
//! - [`segment_reorder`] — Exchange two adjacent segments (`A B C D → A C B D`)
//! - [`replace_pair`] — Swap two visited locations for two unused ones
//!
//! Every strategy first rotates the tour so the depot sits at position 0
//! (which leaves its closed length unchanged) and then only touches positions
//! after it. Tours too short for a strategy are left as they are.

mod oscillating;
mod replace;
mod segment;
mod shift;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use oscillating::{ackley, oscillating_swap};
pub use replace::replace_pair;
pub use segment::segment_reorder;
pub use shift::triple_shift;

/// Per-call inputs shared by all strategies.
#[derive(Debug, Clone, Copy)]
pub struct PerturbContext<'a> {
    /// Location index of the depot.
    pub depot: usize,
    /// Zero-based iteration of the calling driver.
    pub iteration: usize,
    /// Every location that may appear in the tour; only read by
    /// [`Perturbation::ReplacePair`].
    pub pool: &'a [usize],
}

/// A perturbation strategy, selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perturbation {
    /// Cyclic shift of three random positions.
    #[default]
    TripleShift,
    /// Exchange of the two interior segments of a three-cut split.
    SegmentReorder,
    /// Iteration-dependent number of random swaps.
    OscillatingSwap,
    /// Replace two visited locations with two unused ones from the pool.
    ///
    /// Only acts on partial tours; `SearchConfig::validate` rejects it for
    /// the full-tour ILS driver.
    ReplacePair,
}

impl Perturbation {
    /// Mutates `tour` in place. Never fails.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        tour: &mut [usize],
        ctx: &PerturbContext<'_>,
        rng: &mut R,
    ) {
        match self {
            Perturbation::TripleShift => triple_shift(tour, ctx.depot, rng),
            Perturbation::SegmentReorder => segment_reorder(tour, ctx.depot, rng),
            Perturbation::OscillatingSwap => oscillating_swap(tour, ctx.depot, ctx.iteration, rng),
            Perturbation::ReplacePair => replace_pair(tour, ctx.depot, ctx.pool, rng),
        }
    }
}

/// Rotates the depot to position 0 and returns the first movable position.
///
/// When the depot is absent every position is movable.
pub(crate) fn anchor_depot(tour: &mut [usize], depot: usize) -> usize {
    match tour.iter().position(|&l| l == depot) {
        Some(pos) => {
            tour.rotate_left(pos);
            1
        }
        None => 0,
    }
}
