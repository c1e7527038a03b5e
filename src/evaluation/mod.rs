//! Solution feasibility checking and cost evaluation.

mod evaluator;

pub use evaluator::{Evaluation, SolutionEvaluator, Violation};
