//! Improvement drivers built on 2-opt.
//!
//! - [`IlsRunner`] — Iterated Local Search over one tour
//! - [`GraspRunner`] — Repeated GRASP construction plus 2-opt
//!
//! Both stop after a fixed number of iterations or once the best tour has
//! not improved for `max_no_improve` consecutive iterations, and both report
//! through a [`RunControl`].

mod control;
mod grasp;
mod ils;

pub use control::{CancelToken, LogProgress, NoProgress, Progress, ProgressSink, RunControl};
pub use grasp::{GraspConfig, GraspRunner};
pub use ils::{IlsConfig, IlsRunner};

use crate::models::Tour;

/// A new tour must beat the best by more than this to count as improvement.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-10;

/// Outcome of one driver run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverResult {
    /// Best tour found; not rotated.
    pub best: Tour,
    /// Closed length of `best`.
    pub best_distance: f64,
    /// Completed iterations.
    pub iterations: usize,
    /// `true` when the stagnation limit ended the run.
    pub stopped_early: bool,
    /// `true` when cancellation ended the run.
    pub cancelled: bool,
}
