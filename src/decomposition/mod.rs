//! Splitting a tour into capacity-feasible routes.
//!
//! - [`decompose`] — Optimal cut points for a fixed customer order
//! - [`refine_routes`] — Per-route 2-opt after the split

mod split;

pub use split::{decompose, refine_routes};
