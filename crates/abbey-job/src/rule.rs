//! Completion rules and the worker snapshot they are evaluated against.

use std::fmt;
use std::sync::Arc;

use abbey_agent::Needs;
use abbey_core::{AgentId, Point, Tick};

/// Read-only view of the brother working a job this tick.
#[derive(Copy, Clone, Debug)]
pub struct WorkerView {
    pub agent:    AgentId,
    pub position: Point,
    /// Work applied per `update` to effort-based jobs.
    pub effort:   f32,
    pub needs:    Needs,
}

/// Condition checked against the worker each tick.
pub type CompletionPredicate = Arc<dyn Fn(&WorkerView) -> bool + Send + Sync>;

/// When a job counts as done.
#[derive(Clone)]
pub enum CompletionRule {
    /// Work to do.  Each update subtracts the worker's effort from what is
    /// left; the job completes once nothing is left.
    EffortRemaining(f32),
    /// Completes on the first update strictly after this tick.
    Deadline(Tick),
    /// Completes on the first update for which the predicate holds.
    Predicate(CompletionPredicate),
}

impl CompletionRule {
    /// Wrap a closure as a [`CompletionRule::Predicate`].
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&WorkerView) -> bool + Send + Sync + 'static,
    {
        CompletionRule::Predicate(Arc::new(f))
    }
}

impl fmt::Debug for CompletionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionRule::EffortRemaining(w) => f.debug_tuple("EffortRemaining").field(w).finish(),
            CompletionRule::Deadline(t)        => f.debug_tuple("Deadline").field(t).finish(),
            CompletionRule::Predicate(_)       => f.write_str("Predicate(..)"),
        }
    }
}

/// Outcome of one [`Job::update`][crate::Job::update].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Progress {
    Working,
    Completed,
}
