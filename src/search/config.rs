//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::Construction;
use crate::error::{Result, RoutingError};
use crate::metaheuristic::{GraspConfig, IlsConfig};
use crate::perturbation::Perturbation;

/// Default base seed for per-trial seed generation.
pub const DEFAULT_SEED: u64 = 12_345;

/// Improvement driver run inside each trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// Build with the configured construction, then Iterated Local Search.
    Ils(IlsConfig),
    /// GRASP multi-start; builds its own tours and ignores the construction.
    Grasp(GraspConfig),
}

impl Default for Driver {
    fn default() -> Self {
        Driver::Ils(IlsConfig::default())
    }
}

/// Configuration of a full search: independent trials, reduced to the best.
///
/// # Examples
///
/// ```
/// use depot_routing::constructive::Construction;
/// use depot_routing::metaheuristic::GraspConfig;
/// use depot_routing::search::{Driver, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_trials(8)
///     .with_seed(7)
///     .with_construction(Construction::Pilot)
///     .with_driver(Driver::Grasp(GraspConfig::default().with_alpha(0.3)))
///     .with_threads(2);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.trials, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of independent trials.
    pub trials: usize,
    /// Base seed; trial seeds are derived from it.
    pub seed: u64,
    /// Initial tour construction for ILS trials.
    pub construction: Construction,
    /// Driver run in every trial.
    pub driver: Driver,
    /// Apply per-route 2-opt after decomposition.
    pub refine_routes: bool,
    /// Worker threads; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Wall-clock budget for the whole search.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: 20,
            seed: DEFAULT_SEED,
            construction: Construction::default(),
            driver: Driver::default(),
            refine_routes: true,
            threads: None,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Sets the number of trials.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the construction heuristic.
    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the driver.
    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    /// Enables or disables per-route refinement.
    pub fn with_refine_routes(mut self, refine: bool) -> Self {
        self.refine_routes = refine;
        self
    }

    /// Sets the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(RoutingError::invalid_config("trials must be positive"));
        }
        if self.threads == Some(0) {
            return Err(RoutingError::invalid_config("threads must be positive"));
        }
        if let Construction::Grasp { alpha } = self.construction {
            check_alpha("construction alpha", alpha)?;
        }
        match &self.driver {
            Driver::Grasp(grasp) => check_alpha("grasp alpha", grasp.alpha)?,
            // a full tour leaves no unused location to swap in
            Driver::Ils(ils) if ils.perturbation == Perturbation::ReplacePair => {
                return Err(RoutingError::invalid_config(
                    "replace_pair cannot perturb a tour over every location",
                ));
            }
            Driver::Ils(_) => {}
        }
        Ok(())
    }
}

fn check_alpha(name: &str, alpha: f64) -> Result<()> {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(RoutingError::invalid_config(format!(
            "{name} must be in [0, 1], got {alpha}"
        )))
    }
}
