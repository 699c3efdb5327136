//! What a decision model may see and touch while deciding.

use abbey_agent::AgentStore;
use abbey_core::{SimClock, SimConfig, Tick};
use abbey_job::{HookRunner, Job, JobResult, JobSpec};
use abbey_world::{CostGrid, Pathfinder, RoomRegistry, TileMap};

/// The mutable side of the world a brother works on.
///
/// Implemented by the simulation.  Job hooks run through it synchronously,
/// so a wall completed by one brother is on the map before the next brother
/// decides.
pub trait Workplace: HookRunner {
    fn map(&self) -> &TileMap;

    fn rooms(&self) -> &RoomRegistry;

    /// Take the oldest job from the shared pool, if any.
    fn pull_job(&mut self) -> Option<Job>;

    /// Allocate an id and create a job from `spec`, firing its instant hooks.
    fn create_job(&mut self, spec: JobSpec) -> JobResult<Job>;

    /// This workplace as a plain hook runner, for `Job::update` and friends.
    fn runner(&mut self) -> &mut dyn HookRunner;
}

/// State passed to [`DecisionModel::decide`][crate::DecisionModel::decide].
///
/// Everything except the workplace is read-only; the cost grid was rebuilt
/// at the start of this tick and is not refreshed between brothers.
pub struct DecisionContext<'a> {
    pub clock:      &'a SimClock,
    pub config:     &'a SimConfig,
    pub agents:     &'a AgentStore,
    pub grid:       &'a CostGrid,
    pub pathfinder: &'a dyn Pathfinder,
    pub workplace:  &'a mut dyn Workplace,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }
}
