//! GRASP multi-start driver.
//!
//! Every iteration builds a fresh tour with [`grasp_construction`] and
//! descends it with 2-opt; the shortest local optimum is kept. Stopping
//! follows the same rule as ILS: `max_iterations`, or `max_no_improve`
//! consecutive iterations without a better tour.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constructive::grasp_construction;
use crate::local_search::two_opt;
use crate::models::Instance;

use super::{DriverResult, Progress, RunControl, IMPROVEMENT_EPS};

/// Configuration parameters for the GRASP driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Maximum number of construct-and-descend iterations.
    pub max_iterations: usize,
    /// Consecutive non-improving iterations tolerated before stopping.
    pub max_no_improve: usize,
    /// RCL greediness in `[0, 1]`.
    pub alpha: f64,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 150,
            max_no_improve: 10,
            alpha: 0.2,
        }
    }
}

impl GraspConfig {
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

    /// Sets the RCL parameter.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Runs the GRASP driver.
pub struct GraspRunner;

impl GraspRunner {
    /// Returns the best 2-opt-improved GRASP tour.
    ///
    /// At least one iteration always runs, so the result holds a complete
    /// tour even when `max_iterations` is zero or the run is cancelled
    /// immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_routing::metaheuristic::{GraspConfig, GraspRunner, RunControl};
    /// use depot_routing::models::{Instance, Point, Vehicle};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let points = vec![
    ///     Point::depot(0, 0.0, 0.0),
    ///     Point::customer(1, 2.0, 0.0),
    ///     Point::customer(2, 2.0, 2.0),
    ///     Point::customer(3, 0.0, 2.0),
    /// ];
    /// let instance = Instance::new(points, vec![], Vehicle::new(10, 0)).unwrap();
    /// let config = GraspConfig::default().with_alpha(0.5);
    /// let result = GraspRunner::run(
    ///     &instance,
    ///     &config,
    ///     &mut StdRng::seed_from_u64(4),
    ///     RunControl::silent(),
    /// );
    /// assert!((result.best_distance - 8.0).abs() < 1e-9);
    /// ```
    pub fn run<R: Rng + ?Sized>(
        instance: &Instance,
        config: &GraspConfig,
        rng: &mut R,
        control: RunControl<'_>,
    ) -> DriverResult {
        let distances = instance.distances();
        let max_iterations = config.max_iterations.max(1);

        let mut best = grasp_construction(instance, config.alpha, rng);
        let mut best_distance = two_opt(best.locations_mut(), distances);
        let mut iterations = 1;
        let mut stagnation = 0;
        let mut stopped_early = false;
        let mut cancelled = false;

        control.report(&Progress::new(iterations, max_iterations, best_distance));

        while iterations < max_iterations {
            if control.is_cancelled() {
                cancelled = true;
                break;
            }
            if stagnation >= config.max_no_improve {
                log::debug!("grasp: early stop iteration={iterations} best={best_distance:.3}");
                stopped_early = true;
                break;
            }

            let mut candidate = grasp_construction(instance, config.alpha, rng);
            let distance = two_opt(candidate.locations_mut(), distances);
            iterations += 1;

            if distance < best_distance - IMPROVEMENT_EPS {
                best = candidate;
                best_distance = distance;
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            control.report(&Progress::new(iterations, max_iterations, best_distance));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metaheuristic::CancelToken;
    use crate::models::{Point, Vehicle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(side: usize) -> Instance {
        let mut points = Vec::new();
        for i in 0..side * side {
            let (x, y) = ((i % side) as f64, (i / side) as f64);
            points.push(if i == 0 {
                Point::depot(i, x, y)
            } else {
                Point::customer(i, x, y)
            });
        }
        Instance::new(points, vec![], Vehicle::new(10, 0)).expect("valid")
    }

    #[test]
    fn test_grasp_tour_is_complete() {
        let inst = grid(4);
        let mut rng = StdRng::seed_from_u64(9);
        let result = GraspRunner::run(
            &inst,
            &GraspConfig::default(),
            &mut rng,
            RunControl::silent(),
        );
        assert_eq!(result.best.locations()[0], inst.depot());
        let mut sorted = result.best.locations().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
        assert!((result.best.length(inst.distances(), true) - result.best_distance).abs() < 1e-9);
    }

    #[test]
    fn test_grasp_zero_iterations_runs_once() {
        let inst = grid(3);
        let config = GraspConfig::default().with_max_iterations(0);
        let result = GraspRunner::run(
            &inst,
            &config,
            &mut StdRng::seed_from_u64(1),
            RunControl::silent(),
        );
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best.len(), 9);
    }

    #[test]
    fn test_grasp_cancelled_still_returns_tour() {
        let inst = grid(3);
        let token = CancelToken::new();
        token.cancel();
        let control = RunControl::silent().with_cancel(&token);
        let result = GraspRunner::run(
            &inst,
            &GraspConfig::default(),
            &mut StdRng::seed_from_u64(1),
            control,
        );
        assert!(result.cancelled);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best.len(), 9);
    }

    #[test]
    fn test_grasp_greedy_stagnates() {
        // alpha = 0 rebuilds the same tour every time
        let inst = grid(3);
        let config = GraspConfig::default()
            .with_alpha(0.0)
            .with_max_iterations(100)
            .with_max_no_improve(4);
        let result = GraspRunner::run(
            &inst,
            &config,
            &mut StdRng::seed_from_u64(1),
            RunControl::silent(),
        );
        assert!(result.stopped_early);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_grasp_iteration_bound() {
        let inst = grid(4);
        let config = GraspConfig::default()
            .with_alpha(1.0)
            .with_max_iterations(7)
            .with_max_no_improve(100);
        let result = GraspRunner::run(
            &inst,
            &config,
            &mut StdRng::seed_from_u64(5),
            RunControl::silent(),
        );
        assert_eq!(result.iterations, 7);
        assert!(!result.stopped_early);
    }
}
