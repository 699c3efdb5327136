//! `WorldState` - the mutable world that job hooks act on.

use abbey_ai::Workplace;
use abbey_core::JobId;
use abbey_job::{Action, ActionError, HookKind, HookRunner, Job, JobIdGen, JobResult, JobSpec, SharedJobPool};
use abbey_world::{RoomRegistry, TileMap, WorldError};
use tracing::info;

/// Map, rooms, and the shared job pool, plus the id generator for every job
/// created during the run.
///
/// Every hook action performed successfully is kept in `performed` until the
/// simulation hands it to its observer at the end of the tick.
pub struct WorldState {
    pub map:   TileMap,
    pub rooms: RoomRegistry,
    pub pool:  SharedJobPool,
    ids:       JobIdGen,
    performed: Vec<(JobId, HookKind, Action)>,
}

impl WorldState {
    pub fn new(map: TileMap, rooms: RoomRegistry, pool: SharedJobPool) -> Self {
        Self {
            map,
            rooms,
            pool,
            ids:       JobIdGen::new(),
            performed: Vec::new(),
        }
    }

    /// Create a job from `spec` and append it to the pool.
    pub fn enqueue(&mut self, spec: JobSpec) -> JobResult<JobId> {
        let job = self.create_job(spec)?;
        let id = job.id();
        self.pool.push(job)?;
        Ok(id)
    }

    pub fn performed_len(&self) -> usize {
        self.performed.len()
    }

    /// Take every action performed since the last call.
    pub fn drain_performed(&mut self) -> Vec<(JobId, HookKind, Action)> {
        std::mem::take(&mut self.performed)
    }

    fn apply(&mut self, job: JobId, hook: HookKind, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::SpawnProp { prop, at }  => self.map.spawn_prop(*prop, *at).map_err(action_error),
            Action::RemoveProp { prop, at } => self.map.remove_prop(*prop, *at).map_err(action_error),
            Action::BuildWall { at }        => self.map.build_wall(*at).map_err(action_error),
            Action::BuildFloor { at }       => self.map.build_floor(*at).map_err(action_error),
            Action::EnqueueJob(spec) => {
                self.enqueue((**spec).clone())?;
                Ok(())
            }
            Action::Announce(text) => {
                info!(job = %job, hook = %hook, "{text}");
                Ok(())
            }
        }
    }
}

fn action_error(error: WorldError) -> ActionError {
    match error {
        WorldError::OutOfBounds(p)         => ActionError::OutOfBounds(p),
        WorldError::MissingProp { prop, at } => ActionError::MissingProp { prop, at },
        other                              => ActionError::Rejected(other.to_string()),
    }
}

impl HookRunner for WorldState {
    fn perform(&mut self, job: JobId, hook: HookKind, action: Action) -> Result<(), ActionError> {
        self.apply(job, hook, &action)?;
        self.performed.push((job, hook, action));
        Ok(())
    }
}

impl Workplace for WorldState {
    fn map(&self) -> &TileMap {
        &self.map
    }

    fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    fn pull_job(&mut self) -> Option<Job> {
        self.pool.try_pull()
    }

    fn create_job(&mut self, spec: JobSpec) -> JobResult<Job> {
        let id = self.ids.next_id();
        Job::create(id, spec, self)
    }

    fn runner(&mut self) -> &mut dyn HookRunner {
        self
    }
}
