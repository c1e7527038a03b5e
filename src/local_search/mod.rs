//! Local search for improving a visiting order.
//!
//! - [`two_opt`] — Segment reversal to a 2-opt local optimum of the closed tour

mod two_opt;

pub use two_opt::two_opt;
