//! The `Job` type and its lifecycle.
//!
//! ```text
//!   create ──► Pending ──first update──► InProgress ──rule met──► Completed
//!                 │                           │
//!                 └────────── cancel ─────────┴──────────────────► Cancelled
//! ```
//!
//! `instant` hooks fire inside [`Job::create`]; `start` on the first
//! `update`; `complete` and `cancel` on the matching transition.  Each hook
//! list is taken out of the job when it fires, so no hook can run twice.

use tracing::{debug, warn};

use abbey_agent::Need;
use abbey_core::{AgentId, JobId, Point, Tick};

use crate::{
    Action, CompletionRule, HookFailure, HookKind, HookRunner, IntoActions, JobError, JobHooks,
    JobResult, Progress, WorkerView,
};

// ── JobState ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum JobState {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl JobState {
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, JobState::Completed | JobState::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Pending    => "pending",
            JobState::InProgress => "in_progress",
            JobState::Completed  => "completed",
            JobState::Cancelled  => "cancelled",
        }
    }
}

// ── JobSpec / JobBuilder ──────────────────────────────────────────────────────

/// Everything needed to create a job, before it has an id.
///
/// Specs are what hooks carry when they enqueue follow-up work, and what
/// schedule factories and player commands produce.
#[derive(Clone, Debug)]
pub struct JobSpec {
    pub name:      String,
    pub locations: Vec<Point>,
    pub rule:      CompletionRule,
    pub hooks:     JobHooks,
    /// Need replenished each tick a brother spends working this job.
    pub restores:  Option<Need>,
}

impl JobSpec {
    /// Start a fluent builder.  The default rule is one unit of effort.
    pub fn builder(name: impl Into<String>) -> JobBuilder {
        JobBuilder {
            spec: JobSpec {
                name:      name.into(),
                locations: Vec::new(),
                rule:      CompletionRule::EffortRemaining(1.0),
                hooks:     JobHooks::default(),
                restores:  None,
            },
        }
    }
}

/// Fluent builder for [`JobSpec`].
///
/// ```rust
/// use abbey_core::Point;
/// use abbey_job::{Action, JobSpec};
///
/// let spec = JobSpec::builder("Build Wall")
///     .at(Point::new(5, 5))
///     .effort(1.0)
///     .on_complete(Action::BuildWall { at: Point::new(5, 5) })
///     .build();
/// assert_eq!(spec.locations.len(), 1);
/// ```
pub struct JobBuilder {
    spec: JobSpec,
}

impl JobBuilder {
    /// Add one candidate location.
    pub fn at(mut self, p: Point) -> Self {
        self.spec.locations.push(p);
        self
    }

    /// Add several candidate locations, keeping their order.
    pub fn locations(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.spec.locations.extend(points);
        self
    }

    pub fn effort(mut self, work: f32) -> Self {
        self.spec.rule = CompletionRule::EffortRemaining(work);
        self
    }

    pub fn deadline(mut self, tick: Tick) -> Self {
        self.spec.rule = CompletionRule::Deadline(tick);
        self
    }

    pub fn until<F>(mut self, done: F) -> Self
    where
        F: Fn(&WorkerView) -> bool + Send + Sync + 'static,
    {
        self.spec.rule = CompletionRule::predicate(done);
        self
    }

    pub fn rule(mut self, rule: CompletionRule) -> Self {
        self.spec.rule = rule;
        self
    }

    pub fn restores(mut self, need: Need) -> Self {
        self.spec.restores = Some(need);
        self
    }

    pub fn on_instant(mut self, actions: impl IntoActions) -> Self {
        self.spec.hooks.extend(HookKind::Instant, actions);
        self
    }

    pub fn on_start(mut self, actions: impl IntoActions) -> Self {
        self.spec.hooks.extend(HookKind::Start, actions);
        self
    }

    pub fn on_cancel(mut self, actions: impl IntoActions) -> Self {
        self.spec.hooks.extend(HookKind::Cancel, actions);
        self
    }

    pub fn on_complete(mut self, actions: impl IntoActions) -> Self {
        self.spec.hooks.extend(HookKind::Complete, actions);
        self
    }

    pub fn build(self) -> JobSpec {
        self.spec
    }
}

// ── JobIdGen ──────────────────────────────────────────────────────────────────

/// Hands out monotonically increasing [`JobId`]s.
#[derive(Debug, Default)]
pub struct JobIdGen {
    next: u64,
}

impl JobIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> JobId {
        let id = JobId(self.next);
        self.next += 1;
        id
    }
}

// ── Job ───────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Job {
    id:              JobId,
    name:            String,
    locations:       Vec<Point>,
    rule:            CompletionRule,
    /// Work left on an effort-based job.  `f64` holds differences of `f32`
    /// efforts exactly, so no tolerance is needed at zero.
    effort_left:     f64,
    hooks:           JobHooks,
    restores:        Option<Need>,
    state:           JobState,
    assigned_worker: Option<AgentId>,
    failures:        Vec<HookFailure>,
}

impl Job {
    /// Validate `spec`, build the job, and fire its `instant` hooks.
    ///
    /// Fails with [`JobError::InvalidJob`] if the spec has no locations; in
    /// that case no hook runs.
    pub fn create(id: JobId, spec: JobSpec, runner: &mut dyn HookRunner) -> JobResult<Job> {
        if spec.locations.is_empty() {
            return Err(JobError::InvalidJob { name: spec.name });
        }
        let effort_left = match spec.rule {
            CompletionRule::EffortRemaining(w) => f64::from(w),
            _ => 0.0,
        };
        let mut job = Job {
            id,
            name:            spec.name,
            locations:       spec.locations,
            rule:            spec.rule,
            effort_left,
            hooks:           spec.hooks,
            restores:        spec.restores,
            state:           JobState::Pending,
            assigned_worker: None,
            failures:        Vec::new(),
        };
        job.fire(HookKind::Instant, runner);
        Ok(job)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn state(&self) -> JobState {
        self.state
    }

    #[inline]
    pub fn locations(&self) -> &[Point] {
        &self.locations
    }

    /// The completion rule as declared; effort-based rules keep their
    /// original amount of work.
    #[inline]
    pub fn rule(&self) -> &CompletionRule {
        &self.rule
    }

    /// Work still to do on an effort-based job.
    pub fn effort_left(&self) -> Option<f64> {
        matches!(self.rule, CompletionRule::EffortRemaining(_)).then_some(self.effort_left)
    }

    #[inline]
    pub fn restores(&self) -> Option<Need> {
        self.restores
    }

    #[inline]
    pub fn assigned_worker(&self) -> Option<AgentId> {
        self.assigned_worker
    }

    /// Hook actions that failed so far, oldest first.
    pub fn hook_failures(&self) -> &[HookFailure] {
        &self.failures
    }

    /// Fraction of effort already spent, for effort-based jobs.
    pub fn progress(&self) -> Option<f32> {
        match self.rule {
            CompletionRule::EffortRemaining(work) if work > 0.0 => {
                Some((1.0 - self.effort_left / f64::from(work)).clamp(0.0, 1.0) as f32)
            }
            _ => None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Apply one tick of work by `worker`.
    ///
    /// The first call moves the job to `InProgress`, records the worker, and
    /// fires `start`.  When the completion rule is met the job completes
    /// (firing `complete`) and `Progress::Completed` is returned.
    pub fn update(
        &mut self,
        worker: &WorkerView,
        now:    Tick,
        runner: &mut dyn HookRunner,
    ) -> JobResult<Progress> {
        if self.state.is_finished() {
            return Err(JobError::Finished { id: self.id, state: self.state });
        }
        if self.state == JobState::Pending {
            self.state = JobState::InProgress;
            self.assigned_worker = Some(worker.agent);
            self.fire(HookKind::Start, runner);
        }

        let done = match &self.rule {
            CompletionRule::EffortRemaining(_) => {
                self.effort_left -= f64::from(worker.effort);
                self.effort_left <= 0.0
            }
            CompletionRule::Deadline(deadline) => now > *deadline,
            CompletionRule::Predicate(pred)    => (**pred)(worker),
        };

        if done {
            self.complete(runner)?;
            Ok(Progress::Completed)
        } else {
            Ok(Progress::Working)
        }
    }

    /// Mark the job completed and run every `complete` action in order.
    ///
    /// Failing actions are recorded on the job and logged; they do not stop
    /// later actions and do not undo the transition.
    pub fn complete(&mut self, runner: &mut dyn HookRunner) -> JobResult<()> {
        if self.state.is_finished() {
            return Err(JobError::Finished { id: self.id, state: self.state });
        }
        self.state = JobState::Completed;
        debug!(job = %self.id, name = %self.name, "job completed");
        self.fire(HookKind::Complete, runner);
        Ok(())
    }

    /// Mark the job cancelled and run its `cancel` actions.
    pub fn cancel(&mut self, runner: &mut dyn HookRunner) -> JobResult<()> {
        if self.state.is_finished() {
            return Err(JobError::Finished { id: self.id, state: self.state });
        }
        self.state = JobState::Cancelled;
        debug!(job = %self.id, name = %self.name, "job cancelled");
        self.fire(HookKind::Cancel, runner);
        Ok(())
    }

    /// Stable sort of the candidate locations by Chebyshev distance from
    /// `from`.  Equidistant locations keep their relative order.
    pub fn sort_locations_by_distance(&mut self, from: Point) {
        self.locations.sort_by_key(|p| p.chebyshev(from));
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn fire(&mut self, kind: HookKind, runner: &mut dyn HookRunner) {
        let actions: Vec<Action> = std::mem::take(self.hooks.get_mut(kind));
        for (index, action) in actions.into_iter().enumerate() {
            if let Err(error) = runner.perform(self.id, kind, action) {
                warn!(job = %self.id, name = %self.name, hook = %kind, index, %error, "hook action failed");
                self.failures.push(HookFailure { hook: kind, index, error });
            }
        }
    }
}
