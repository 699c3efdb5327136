//! Lifecycle hooks.
//!
//! A hook is an ordered list of [`Action`]s.  Jobs accept either a single
//! action or a list wherever hooks are set (see [`IntoActions`]) and always
//! store a list.  When a hook fires, every action in it is handed to the
//! [`HookRunner`] in insertion order; a failing action is recorded and the
//! remaining actions still run.

use std::fmt;

use abbey_core::{JobId, Point, PropKind};

use crate::{ActionError, JobSpec};

// ── Action ────────────────────────────────────────────────────────────────────

/// A world side effect requested by a job hook.
#[derive(Clone, Debug)]
pub enum Action {
    /// Place `prop` on the tile at `at`.
    SpawnProp { prop: PropKind, at: Point },
    /// Remove one `prop` from the tile at `at`.
    RemoveProp { prop: PropKind, at: Point },
    /// Erect a wall: spawns the prop and makes the tile unwalkable.
    BuildWall { at: Point },
    /// Lay a floor: spawns the prop and makes the tile walkable.
    BuildFloor { at: Point },
    /// Create a new job and push it onto the shared pool.
    EnqueueJob(Box<JobSpec>),
    /// Log a line on behalf of the job.
    Announce(String),
}

impl Action {
    pub fn spawn(prop: PropKind, at: Point) -> Self {
        Action::SpawnProp { prop, at }
    }

    pub fn remove(prop: PropKind, at: Point) -> Self {
        Action::RemoveProp { prop, at }
    }

    pub fn enqueue(spec: JobSpec) -> Self {
        Action::EnqueueJob(Box::new(spec))
    }

    pub fn announce(text: impl Into<String>) -> Self {
        Action::Announce(text.into())
    }
}

// ── Hook lists ────────────────────────────────────────────────────────────────

/// The four points in a job's life at which hooks fire.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HookKind {
    /// Once, synchronously, when the job is created.
    Instant,
    /// Once, on the first transition to in-progress.
    Start,
    /// Once, when the job is cancelled.
    Cancel,
    /// Once, when the job completes.
    Complete,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::Instant  => "instant",
            HookKind::Start    => "start",
            HookKind::Cancel   => "cancel",
            HookKind::Complete => "complete",
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct JobHooks {
    pub instant:  Vec<Action>,
    pub start:    Vec<Action>,
    pub cancel:   Vec<Action>,
    pub complete: Vec<Action>,
}

impl JobHooks {
    pub fn get(&self, kind: HookKind) -> &[Action] {
        match kind {
            HookKind::Instant  => &self.instant,
            HookKind::Start    => &self.start,
            HookKind::Cancel   => &self.cancel,
            HookKind::Complete => &self.complete,
        }
    }

    pub fn get_mut(&mut self, kind: HookKind) -> &mut Vec<Action> {
        match kind {
            HookKind::Instant  => &mut self.instant,
            HookKind::Start    => &mut self.start,
            HookKind::Cancel   => &mut self.cancel,
            HookKind::Complete => &mut self.complete,
        }
    }

    /// Append to the hook list for `kind`.
    pub fn extend(&mut self, kind: HookKind, actions: impl IntoActions) {
        self.get_mut(kind).extend(actions.into_actions());
    }
}

/// Single-or-many normalisation for hook arguments.
pub trait IntoActions {
    fn into_actions(self) -> Vec<Action>;
}

impl IntoActions for Action {
    fn into_actions(self) -> Vec<Action> {
        vec![self]
    }
}

impl IntoActions for Vec<Action> {
    fn into_actions(self) -> Vec<Action> {
        self
    }
}

impl<const N: usize> IntoActions for [Action; N] {
    fn into_actions(self) -> Vec<Action> {
        self.into()
    }
}

impl IntoActions for Option<Action> {
    fn into_actions(self) -> Vec<Action> {
        self.into_iter().collect()
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Executes hook actions against the world.
///
/// The simulation implements this over its map and pool; tests implement it
/// with a recorder.  `perform` is called once per action, in hook order.
pub trait HookRunner {
    fn perform(&mut self, job: JobId, hook: HookKind, action: Action) -> Result<(), ActionError>;
}

/// A hook action that failed.  Kept on the job that requested it.
#[derive(Debug)]
pub struct HookFailure {
    pub hook:  HookKind,
    /// Position of the action within its hook list.
    pub index: usize,
    pub error: ActionError,
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hook action #{}: {}", self.hook, self.index, self.error)
    }
}
