//! Progress reporting and cancellation shared by the drivers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One progress event, emitted after every driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Trial index when running under the orchestrator.
    pub trial: Option<usize>,
    /// Completed iterations (1-based).
    pub iteration: usize,
    /// Configured iteration bound.
    pub max_iterations: usize,
    /// `iteration / max_iterations` in percent.
    pub percent: f64,
    /// Best closed-tour length found so far.
    pub best_distance: f64,
}

impl Progress {
    pub(crate) fn new(iteration: usize, max_iterations: usize, best_distance: f64) -> Self {
        let percent = if max_iterations == 0 {
            100.0
        } else {
            iteration as f64 / max_iterations as f64 * 100.0
        };
        Self {
            trial: None,
            iteration,
            max_iterations,
            percent,
            best_distance,
        }
    }
}

/// Receiver of [`Progress`] events.
///
/// Sinks are shared across concurrently running trials, hence `Sync`. Any
/// `Fn(&Progress) + Sync` closure is a sink.
pub trait ProgressSink: Sync {
    /// Called once per driver iteration.
    fn on_progress(&self, progress: &Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(&Progress) + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: &Progress) {}
}

/// Forwards every event to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(&self, p: &Progress) {
        log::trace!(
            "progress: trial={:?} iteration={}/{} percent={:.2} best={:.3}",
            p.trial,
            p.iteration,
            p.max_iterations,
            p.percent,
            p.best_distance
        );
    }
}

/// Cooperative cancellation flag with an optional deadline.
///
/// Clones share the flag, so a token handed to a running search can be
/// cancelled from another thread.
///
/// # Examples
///
/// ```
/// use depot_routing::metaheuristic::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that is never cancelled until [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also cancels once `limit` has elapsed from now.
    ///
    /// An earlier deadline already set on the token is kept.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        let deadline = Instant::now() + limit;
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Observer and cancellation hooks passed to a driver run.
#[derive(Clone, Copy)]
pub struct RunControl<'a> {
    progress: &'a dyn ProgressSink,
    cancel: Option<&'a CancelToken>,
}

impl RunControl<'static> {
    /// No progress reporting and no cancellation.
    pub fn silent() -> Self {
        Self {
            progress: &NoProgress,
            cancel: None,
        }
    }
}

impl<'a> RunControl<'a> {
    /// Hooks with the given sink and optional token.
    pub fn new(progress: &'a dyn ProgressSink, cancel: Option<&'a CancelToken>) -> Self {
        Self { progress, cancel }
    }

    /// Replaces the progress sink.
    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn report(&self, progress: &Progress) {
        self.progress.on_progress(progress);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}

impl Default for RunControl<'static> {
    fn default() -> Self {
        Self::silent()
    }
}
