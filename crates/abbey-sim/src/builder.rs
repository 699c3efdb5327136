//! Fluent builder for constructing a [`Sim`].

use abbey_agent::{AgentRngs, AgentStore};
use abbey_ai::{DecisionModel, Mind};
use abbey_core::{SimConfig, SimRng};
use abbey_job::{JobSpec, SharedJobPool};
use abbey_schedule::{AgentSchedule, ObligationQueue};
use abbey_world::{CostGrid, Pathfinder, RoomRegistry, TileMap, WorldError};
use tracing::info;

use crate::{Sim, SimError, SimResult, WorldCalendar, WorldState};

/// Offset mixed into the seed for the world calendar's RNG stream.
const CALENDAR_STREAM: u64 = 0xCA1E;

/// Fluent builder for [`Sim<M, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] - start time, total ticks, seed, tunables, …
/// - [`AgentStore`] + [`AgentRngs`] - from [`abbey_agent::AgentStoreBuilder`]
/// - [`TileMap`] + [`RoomRegistry`] - e.g. from [`abbey_world::parse_ascii_map`]
/// - `M: DecisionModel` - the behaviour implementation
/// - `P: Pathfinder` - the routing algorithm (e.g. [`abbey_world::DijkstraPathfinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                          |
/// |------------------|----------------------------------|
/// | `.schedules(v)`  | All-empty `AgentSchedule`s       |
/// | `.horarium()`    | (sets every schedule to the horarium) |
/// | `.pool(p)`       | A fresh `SharedJobPool`          |
/// | `.jobs(specs)`   | No starting jobs                 |
/// | `.calendar(c)`   | An empty `WorldCalendar`         |
pub struct SimBuilder<M: DecisionModel, P: Pathfinder> {
    config:     SimConfig,
    agents:     AgentStore,
    rngs:       AgentRngs,
    map:        TileMap,
    rooms:      RoomRegistry,
    schedules:  Option<Vec<AgentSchedule>>,
    pool:       Option<SharedJobPool>,
    jobs:       Vec<JobSpec>,
    calendar:   WorldCalendar,
    model:      M,
    pathfinder: P,
}

impl<M: DecisionModel, P: Pathfinder> SimBuilder<M, P> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        agents:     AgentStore,
        rngs:       AgentRngs,
        map:        TileMap,
        rooms:      RoomRegistry,
        model:      M,
        pathfinder: P,
    ) -> Self {
        Self {
            config,
            agents,
            rngs,
            map,
            rooms,
            schedules: None,
            pool:      None,
            jobs:      Vec::new(),
            calendar:  WorldCalendar::new(),
            model,
            pathfinder,
        }
    }

    /// Supply per-brother schedules (must be length `agent_count`).
    pub fn schedules(mut self, schedules: Vec<AgentSchedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    /// Give every brother the default monastic day.
    pub fn horarium(mut self) -> Self {
        self.schedules = Some(vec![AgentSchedule::horarium(); self.agents.count]);
        self
    }

    /// Use an existing pool handle, so producers holding a clone can feed
    /// the simulation.
    pub fn pool(mut self, pool: SharedJobPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Jobs to place in the pool before the first tick.
    pub fn jobs(mut self, specs: impl IntoIterator<Item = JobSpec>) -> Self {
        self.jobs.extend(specs);
        self
    }

    /// World events that add chores to the pool during the run.
    pub fn calendar(mut self, calendar: WorldCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Validate inputs, create the starting jobs, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<M, P>> {
        self.config.validate()?;
        let agent_count = self.agents.count;

        // ── Validate and resolve optional inputs ──────────────────────────
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent rngs",
            });
        }

        let schedules = match self.schedules {
            Some(s) => {
                if s.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      s.len(),
                        what:     "schedules",
                    });
                }
                s
            }
            None => vec![AgentSchedule::new(); agent_count],
        };

        if let Some(&p) = self.agents.position.iter().find(|&&p| !self.map.in_bounds(p)) {
            return Err(WorldError::OutOfBounds(p).into());
        }

        // ── World and starting jobs ───────────────────────────────────────
        let grid = CostGrid::build(&self.map, &self.agents.position);
        let mut world = WorldState::new(self.map, self.rooms, self.pool.unwrap_or_default());
        for spec in self.jobs {
            world.enqueue(spec)?;
        }
        info!(
            brothers = agent_count,
            pool = world.pool.len(),
            world_events = self.calendar.len(),
            "simulation built",
        );
        let rng = SimRng::new(self.config.seed).child(CALENDAR_STREAM);

        Ok(Sim {
            clock:       self.config.make_clock(),
            config:      self.config,
            agents:      self.agents,
            rngs:        self.rngs,
            schedules,
            obligations: (0..agent_count).map(|_| ObligationQueue::new()).collect(),
            minds:       (0..agent_count).map(|_| Mind::new()).collect(),
            world,
            grid,
            calendar:    self.calendar,
            rng,
            model:       self.model,
            pathfinder:  self.pathfinder,
        })
    }
}
