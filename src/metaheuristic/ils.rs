//! Iterated Local Search (ILS) with 2-opt.
//!
//! Each iteration perturbs the current tour, descends to a 2-opt local
//! optimum and keeps the result as the new current tour whether or not it
//! beats the best so far (always-walk acceptance). The run stops after
//! `max_iterations`, or earlier once `max_no_improve` consecutive
//! iterations fail to improve the best tour.
//!
//! # Reference
//!
//! Lourenço, H.R., Martin, O.C. & Stützle, T. (2003). "Iterated Local
//! Search", *Handbook of Metaheuristics*, 321-353.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::local_search::two_opt;
use crate::models::{Instance, Tour};
use crate::perturbation::{PerturbContext, Perturbation};

use super::{DriverResult, Progress, RunControl, IMPROVEMENT_EPS};

/// Configuration parameters for Iterated Local Search.
///
/// # Examples
///
/// ```
/// use depot_routing::metaheuristic::IlsConfig;
/// use depot_routing::perturbation::Perturbation;
///
/// let config = IlsConfig::default()
///     .with_max_iterations(500)
///     .with_max_no_improve(25)
///     .with_perturbation(Perturbation::SegmentReorder);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.max_no_improve, 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    /// Maximum number of perturb-and-descend iterations.
    pub max_iterations: usize,
    /// Consecutive non-improving iterations tolerated before stopping.
    pub max_no_improve: usize,
    /// Strategy applied before each descent.
    pub perturbation: Perturbation,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 150,
            max_no_improve: 10,
            perturbation: Perturbation::default(),
        }
    }
}

impl IlsConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation patience.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the perturbation strategy.
    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = perturbation;
        self
    }
}

/// Runs Iterated Local Search.
pub struct IlsRunner;

impl IlsRunner {
    /// Improves `initial` by ILS and returns the best tour seen.
    ///
    /// The best starts as `initial` itself with its closed length. The returned
    /// tour is not rotated; callers that need the depot first reorder it.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_routing::constructive::randomized;
    /// use depot_routing::metaheuristic::{IlsConfig, IlsRunner, RunControl};
    /// use depot_routing::models::{Instance, Point, Vehicle};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let points = vec![
    ///     Point::depot(0, 0.0, 0.0),
    ///     Point::customer(1, 1.0, 0.0),
    ///     Point::customer(2, 1.0, 1.0),
    ///     Point::customer(3, 0.0, 1.0),
    ///     Point::customer(4, 0.5, 2.0),
    /// ];
    /// let instance = Instance::new(points, vec![], Vehicle::new(10, 0)).unwrap();
    /// let mut rng = StdRng::seed_from_u64(42);
    ///
    /// let initial = randomized(&instance, &mut rng);
    /// let start = initial.length(instance.distances(), true);
    /// let result = IlsRunner::run(
    ///     &instance,
    ///     initial,
    ///     &IlsConfig::default(),
    ///     &mut rng,
    ///     RunControl::silent(),
    /// );
    /// assert!(result.best_distance <= start);
    /// ```
    pub fn run<R: Rng + ?Sized>(
        instance: &Instance,
        initial: Tour,
        config: &IlsConfig,
        rng: &mut R,
        control: RunControl<'_>,
    ) -> DriverResult {
        let distances = instance.distances();
        let pool: Vec<usize> = (0..instance.len()).collect();

        let mut current = initial;
        let mut best = current.clone();
        let mut best_distance = best.length(distances, true);

        let mut stagnation = 0;
        let mut iterations = 0;
        let mut stopped_early = false;
        let mut cancelled = false;

        for iteration in 0..config.max_iterations {
            if control.is_cancelled() {
                cancelled = true;
                break;
            }

            let ctx = PerturbContext {
                depot: instance.depot(),
                iteration,
                pool: &pool,
            };
            config
                .perturbation
                .apply(current.locations_mut(), &ctx, rng);
            let distance = two_opt(current.locations_mut(), distances);
            iterations += 1;

            if distance < best_distance - IMPROVEMENT_EPS {
                best.clone_from(&current);
                best_distance = distance;
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            control.report(&Progress::new(
                iterations,
                config.max_iterations,
                best_distance,
            ));

            if stagnation >= config.max_no_improve {
                log::debug!("ils: early stop iteration={iterations} best={best_distance:.3}");
                stopped_early = true;
                break;
            }
        }

        DriverResult {
            best,
            best_distance,
            iterations,
            stopped_early,
            cancelled,
        }
    }
}
