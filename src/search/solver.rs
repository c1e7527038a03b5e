//! Parallel multi-trial search.
//!
//! Each trial owns a `StdRng` seeded from the run seed and carries a tour
//! through construction, the configured driver, decomposition and optional
//! per-route refinement. Trials run on a rayon pool and share nothing but
//! the instance, the progress sink and the cancellation token. The best
//! completed trial wins; ties go to the lower trial index, so the outcome
//! does not depend on the thread count.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::decomposition::{decompose, refine_routes};
use crate::error::{Result, RoutingError};
use crate::metaheuristic::{
    CancelToken, GraspRunner, IlsRunner, NoProgress, Progress, ProgressSink, RunControl,
};
use crate::models::{Instance, Solution, Tour};

use super::{Driver, SearchConfig};

/// Best solution of a search plus trial bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Routes of the winning trial.
    pub solution: Solution,
    /// `solution.total_distance()`.
    pub total_distance: f64,
    /// Winning tour, depot first.
    pub tour: Tour,
    /// Index of the winning trial.
    pub trial: usize,
    /// Seed of the winning trial.
    pub seed: u64,
    /// Trials that produced a solution.
    pub completed_trials: usize,
    /// Trials whose tour could not be decomposed.
    pub failed_trials: usize,
    /// Trials stopped by cancellation.
    pub cancelled_trials: usize,
}

/// Forwards progress with the trial index filled in.
struct TrialProgress<'a> {
    trial: usize,
    inner: &'a dyn ProgressSink,
}

impl ProgressSink for TrialProgress<'_> {
    fn on_progress(&self, progress: &Progress) {
        let mut p = *progress;
        p.trial = Some(self.trial);
        self.inner.on_progress(&p);
    }
}

/// One completed trial.
#[derive(Debug)]
struct TrialRun {
    idx: usize,
    seed: u64,
    tour: Tour,
    solution: Solution,
    distance: f64,
}

#[derive(Debug)]
enum TrialOutcome {
    Done(TrialRun),
    Failed(RoutingError),
    Cancelled,
}

/// Runs repeated independent trials and keeps the shortest solution.
///
/// # Examples
///
/// ```
/// use depot_routing::models::{Demand, Instance, Point, Vehicle};
/// use depot_routing::search::{SearchConfig, Solver};
///
/// let points = vec![
///     Point::depot(0, 0.0, 0.0),
///     Point::customer(1, 1.0, 0.0),
///     Point::customer(2, 1.0, 1.0),
///     Point::customer(3, 0.0, 1.0),
///     Point::customer(4, -1.0, 0.0),
/// ];
/// let demands = (1..=4).map(|i| Demand::new(i, i, 5)).collect();
/// let instance = Instance::new(points, demands, Vehicle::new(100, 0)).unwrap();
///
/// let solver = Solver::new(&instance, SearchConfig::default().with_trials(4)).unwrap();
/// let result = solver.solve().unwrap();
/// assert_eq!(result.solution.num_routes(), 1);
/// assert_eq!(result.solution.num_served(), 4);
/// ```
pub struct Solver<'a> {
    instance: &'a Instance,
    config: SearchConfig,
}

impl<'a> Solver<'a> {
    /// Creates a solver after validating `config`.
    pub fn new(instance: &'a Instance, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { instance, config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search without progress reporting or external cancellation.
    pub fn solve(&self) -> Result<SearchResult> {
        self.solve_with(&NoProgress, None)
    }

    /// Runs the search, reporting every driver iteration to `progress`.
    ///
    /// Trials notice `cancel` (and the configured time limit) at their next
    /// iteration and are then excluded from the result.
    ///
    /// # Errors
    ///
    /// * [`RoutingError::InfeasibleDemand`] if no trial completed and at
    ///   least one failed to decompose (the lowest-index failure is returned).
    /// * [`RoutingError::Cancelled`] if every trial was cancelled.
    /// * [`RoutingError::ThreadPool`] if the worker pool cannot be built.
    pub fn solve_with(
        &self,
        progress: &dyn ProgressSink,
        cancel: Option<&CancelToken>,
    ) -> Result<SearchResult> {
        let token = match (cancel, self.config.time_limit) {
            (Some(token), Some(limit)) => Some(token.clone().with_time_limit(limit)),
            (None, Some(limit)) => Some(CancelToken::new().with_time_limit(limit)),
            (token, None) => token.cloned(),
        };

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| RoutingError::ThreadPool(e.to_string()))?;

        log::info!(
            "search: start points={} trials={} threads={} driver={:?}",
            self.instance.len(),
            self.config.trials,
            pool.current_num_threads(),
            self.config.driver
        );
        let now = Instant::now();

        let seeds = generate_seeds(self.config.seed, self.config.trials);
        let outcomes: Vec<TrialOutcome> = pool.install(|| {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(idx, seed)| {
                    let sink = TrialProgress {
                        trial: idx,
                        inner: progress,
                    };
                    let mut control = RunControl::new(&sink, None);
                    if let Some(token) = &token {
                        control = control.with_cancel(token);
                    }
                    self.run_trial(idx, seed, control)
                })
                .collect()
        });

        let result = reduce(outcomes)?;
        log::info!(
            "search: complete best={:.3} trial={} completed={} failed={} cancelled={} took={:.2}s",
            result.total_distance,
            result.trial,
            result.completed_trials,
            result.failed_trials,
            result.cancelled_trials,
            now.elapsed().as_secs_f32()
        );
        Ok(result)
    }

    fn run_trial(&self, idx: usize, seed: u64, control: RunControl<'_>) -> TrialOutcome {
        let instance = self.instance;
        let mut rng = StdRng::seed_from_u64(seed);

        let run = match &self.config.driver {
            Driver::Ils(ils) => {
                let initial = self.config.construction.build(instance, &mut rng);
                IlsRunner::run(instance, initial, ils, &mut rng, control)
            }
            Driver::Grasp(grasp) => GraspRunner::run(instance, grasp, &mut rng, control),
        };
        if run.cancelled {
            log::debug!("search.trial: cancelled idx={idx} iterations={}", run.iterations);
            return TrialOutcome::Cancelled;
        }

        match self.finish_trial(run.best) {
            Ok((tour, solution)) => {
                let distance = solution.total_distance();
                log::debug!(
                    "search.trial: done idx={idx} seed={seed} iterations={} routes={} \
                     distance={distance:.3}",
                    run.iterations,
                    solution.num_routes()
                );
                TrialOutcome::Done(TrialRun {
                    idx,
                    seed,
                    tour,
                    solution,
                    distance,
                })
            }
            Err(err) => {
                log::debug!("search.trial: failed idx={idx} seed={seed} err={err}");
                TrialOutcome::Failed(err)
            }
        }
    }

    fn finish_trial(&self, mut tour: Tour) -> Result<(Tour, Solution)> {
        tour.reorder_depot_first(self.instance.depot())?;
        let mut solution = decompose(&tour, self.instance)?;
        if self.config.refine_routes {
            refine_routes(&mut solution, self.instance)?;
        }
        Ok((tour, solution))
    }
}

/// Picks the shortest completed trial, lowest index first on ties.
fn reduce(outcomes: Vec<TrialOutcome>) -> Result<SearchResult> {
    let mut best: Option<TrialRun> = None;
    let mut first_error: Option<RoutingError> = None;
    let (mut completed, mut failed, mut cancelled) = (0, 0, 0);

    for outcome in outcomes {
        match outcome {
            TrialOutcome::Done(run) => {
                completed += 1;
                if best.as_ref().map_or(true, |b| run.distance < b.distance) {
                    best = Some(run);
                }
            }
            TrialOutcome::Failed(err) => {
                failed += 1;
                first_error.get_or_insert(err);
            }
            TrialOutcome::Cancelled => cancelled += 1,
        }
    }

    let Some(best) = best else {
        return Err(first_error.unwrap_or(RoutingError::Cancelled));
    };
    Ok(SearchResult {
        total_distance: best.distance,
        solution: best.solution,
        tour: best.tour,
        trial: best.idx,
        seed: best.seed,
        completed_trials: completed,
        failed_trials: failed,
        cancelled_trials: cancelled,
    })
}

fn generate_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::Construction;
    use crate::evaluation::SolutionEvaluator;
    use crate::metaheuristic::{GraspConfig, IlsConfig};
    use crate::models::{Demand, Point, Vehicle};
    use crate::perturbation::Perturbation;
    use std::sync::Mutex;

    fn clustered() -> Instance {
        let coords = [
            (0.0, 0.0),
            (5.0, 1.0),
            (6.0, 2.0),
            (5.5, -1.0),
            (-4.0, 4.0),
            (-5.0, 5.5),
            (-3.5, 6.0),
            (1.0, -6.0),
            (2.0, -7.5),
            (-0.5, -6.5),
        ];
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                if i == 0 {
                    Point::depot(i, x, y)
                } else {
                    Point::customer(i, x, y)
                }
            })
            .collect();
        let demands = (1..coords.len()).map(|i| Demand::new(i, i, 3)).collect();
        Instance::new(points, demands, Vehicle::new(9, 0)).expect("valid")
    }

    #[test]
    fn test_generate_seeds_deterministic() {
        assert_eq!(generate_seeds(5, 4), generate_seeds(5, 4));
        assert_ne!(generate_seeds(5, 4), generate_seeds(6, 4));
        assert_eq!(generate_seeds(5, 4)[..2], generate_seeds(5, 2)[..]);
    }

    #[test]
    fn test_solve_is_feasible() {
        let inst = clustered();
        let config = SearchConfig::default().with_trials(6).with_seed(3);
        let result = Solver::new(&inst, config).expect("valid").solve().expect("feasible");

        let eval = SolutionEvaluator::new(&inst).evaluate(&result.solution);
        assert!(eval.is_feasible(), "{:?}", eval.violations);
        assert!((eval.total_distance - result.total_distance).abs() < 1e-9);
        assert_eq!(result.completed_trials, 6);
        assert_eq!(result.tour.locations()[0], inst.depot());
        assert!(result.solution.num_routes() >= 3);
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let inst = clustered();
        let base = SearchConfig::default().with_trials(5).with_seed(11);
        let one = Solver::new(&inst, base.clone().with_threads(1))
            .expect("valid")
            .solve()
            .expect("feasible");
        let four = Solver::new(&inst, base.with_threads(4))
            .expect("valid")
            .solve()
            .expect("feasible");
        assert_eq!(one, four);
    }

    #[test]
    fn test_best_of_trials() {
        let inst = clustered();
        let many = Solver::new(&inst, SearchConfig::default().with_trials(8).with_seed(1))
            .expect("valid")
            .solve()
            .expect("feasible");
        let first = Solver::new(&inst, SearchConfig::default().with_trials(1).with_seed(1))
            .expect("valid")
            .solve()
            .expect("feasible");
        // the first seed is shared, so more trials can only help
        assert!(many.total_distance <= first.total_distance + 1e-9);
    }

    #[test]
    fn test_grasp_driver() {
        let inst = clustered();
        let config = SearchConfig::default()
            .with_trials(3)
            .with_driver(Driver::Grasp(GraspConfig::default().with_alpha(0.4)));
        let result = Solver::new(&inst, config).expect("valid").solve().expect("feasible");
        assert!(SolutionEvaluator::new(&inst).evaluate(&result.solution).is_feasible());
    }

    #[test]
    fn test_every_construction_and_perturbation() {
        let inst = clustered();
        for construction in [
            Construction::NearestNeighbor,
            Construction::Randomized,
            Construction::Grasp { alpha: 0.3 },
            Construction::Pilot,
        ] {
            for perturbation in [
                Perturbation::TripleShift,
                Perturbation::SegmentReorder,
                Perturbation::OscillatingSwap,
            ] {
                let ils = IlsConfig::default()
                    .with_max_iterations(30)
                    .with_perturbation(perturbation);
                let config = SearchConfig::default()
                    .with_trials(2)
                    .with_construction(construction)
                    .with_driver(Driver::Ils(ils));
                let result = Solver::new(&inst, config).expect("valid").solve().expect("feasible");
                let eval = SolutionEvaluator::new(&inst).evaluate(&result.solution);
                assert!(
                    eval.is_feasible(),
                    "{construction:?} {perturbation:?}: {:?}",
                    eval.violations
                );
            }
        }
    }

    #[test]
    fn test_progress_carries_trial_index() {
        let inst = clustered();
        let seen = Mutex::new(vec![0usize; 3]);
        let sink = |p: &Progress| {
            let trial = p.trial.expect("trial index");
            seen.lock().expect("lock")[trial] += 1;
        };
        let config = SearchConfig::default().with_trials(3);
        Solver::new(&inst, config)
            .expect("valid")
            .solve_with(&sink, None)
            .expect("feasible");
        assert!(seen.lock().expect("lock").iter().all(|&n| n > 0));
    }

    #[test]
    fn test_cancelled_before_start() {
        let inst = clustered();
        let token = CancelToken::new();
        token.cancel();
        let solver = Solver::new(&inst, SearchConfig::default().with_trials(3)).expect("valid");
        assert_eq!(
            solver.solve_with(&NoProgress, Some(&token)),
            Err(RoutingError::Cancelled)
        );
    }

    #[test]
    fn test_infeasible_instance() {
        let points = vec![
            Point::depot(0, 0.0, 0.0),
            Point::customer(1, 1.0, 0.0),
            Point::customer(2, 2.0, 0.0),
        ];
        let demands = vec![Demand::new(0, 1, 3), Demand::new(1, 2, 12)];
        let inst = Instance::new(points, demands, Vehicle::new(10, 0)).expect("valid");
        let solver = Solver::new(&inst, SearchConfig::default().with_trials(4)).expect("valid");
        assert_eq!(
            solver.solve(),
            Err(RoutingError::InfeasibleDemand {
                point_id: 2,
                quantity: Some(12),
                capacity: 10,
            })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = clustered();
        assert!(matches!(
            Solver::new(&inst, SearchConfig::default().with_trials(0)),
            Err(RoutingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reduce_tie_prefers_lower_index() {
        let run = |idx| {
            TrialOutcome::Done(TrialRun {
                idx,
                seed: idx as u64,
                tour: Tour::new(vec![0]),
                solution: Solution::new(),
                distance: 1.0,
            })
        };
        let result = reduce(vec![
            TrialOutcome::Cancelled,
            run(1),
            TrialOutcome::Failed(RoutingError::NoDepotFound),
            run(3),
        ])
        .expect("one completed");
        assert_eq!(result.trial, 1);
        assert_eq!(result.completed_trials, 2);
        assert_eq!(result.failed_trials, 1);
        assert_eq!(result.cancelled_trials, 1);
    }
}
