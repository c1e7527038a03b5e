//! End-to-end search: repeated independent trials in parallel.
//!
//! - [`SearchConfig`] — Trials, seed, construction, driver and limits
//! - [`Solver`] — Runs the trials on a rayon pool and keeps the best
//! - [`SearchResult`] — Winning solution with trial bookkeeping

mod config;
mod solver;

pub use config::{Driver, SearchConfig, DEFAULT_SEED};
pub use solver::{SearchResult, Solver};
