//! Per-brother decision state.

use std::fmt;

use abbey_core::{Point, Tick};
use abbey_job::Job;

/// Which of the two job slots is active.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Slot {
    Personal,
    Pool,
}

/// Coarse label of what a brother is doing, for display and output.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum DecisionPhase {
    #[default]
    Idle,
    /// Holds a personal obligation but made no progress this tick.
    HasPersonalJob,
    /// Holds a pool job but made no progress this tick.
    HasPoolJob,
    Travelling,
    Working,
}

impl DecisionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionPhase::Idle           => "idle",
            DecisionPhase::HasPersonalJob => "has_personal_job",
            DecisionPhase::HasPoolJob     => "has_pool_job",
            DecisionPhase::Travelling     => "travelling",
            DecisionPhase::Working        => "working",
        }
    }
}

impl fmt::Display for DecisionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job sitting in one of a brother's slots.
#[derive(Debug)]
pub struct HeldJob {
    pub job:      Job,
    /// Index into `job.locations()` currently being walked to.
    pub selected: usize,
    /// Consecutive path failures since the last successful plan.
    pub unreachable_streak: usize,
    /// Self-assigned idle filler rather than real work.
    pub busywork: bool,
}

impl HeldJob {
    /// Take up `job` standing at `from`; its locations are sorted nearest
    /// first, once, here.
    pub fn take_up(mut job: Job, from: Point) -> Self {
        job.sort_locations_by_distance(from);
        Self { job, selected: 0, unreachable_streak: 0, busywork: false }
    }

    pub fn target(&self) -> Point {
        self.job.locations()[self.selected]
    }

    /// Move on to the next candidate location, wrapping around.  Returns
    /// `true` once every candidate has failed since the last success.
    pub fn skip_unreachable(&mut self) -> bool {
        let n = self.job.locations().len();
        self.selected = (self.selected + 1) % n;
        self.unreachable_streak += 1;
        self.unreachable_streak % n == 0
    }
}

/// Everything a brother remembers between ticks.
///
/// `current` always names one of the two slots (never a third job) and is
/// `None` whenever the named slot is empty.
#[derive(Debug, Default)]
pub struct Mind {
    pub personal:   Option<HeldJob>,
    pub pool:       Option<HeldJob>,
    pub current:    Option<Slot>,
    /// Standing still until this tick.
    pub idle_until: Option<Tick>,
    pub phase:      DecisionPhase,
}

impl Mind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> Option<&HeldJob> {
        match slot {
            Slot::Personal => self.personal.as_ref(),
            Slot::Pool     => self.pool.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<HeldJob> {
        match slot {
            Slot::Personal => &mut self.personal,
            Slot::Pool     => &mut self.pool,
        }
    }

    /// The job being pursued right now.
    pub fn current_job(&self) -> Option<&Job> {
        self.current.and_then(|s| self.slot(s)).map(|h| &h.job)
    }

    pub fn is_idle(&self) -> bool {
        self.personal.is_none() && self.pool.is_none()
    }

    /// Empty both slots, returning their jobs (personal first).
    pub fn take_jobs(&mut self) -> Vec<Job> {
        self.current = None;
        self.personal
            .take()
            .into_iter()
            .chain(self.pool.take())
            .map(|h| h.job)
            .collect()
    }
}
