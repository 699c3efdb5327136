//! The `Sim` struct and its tick loop.

use abbey_agent::{AgentRngs, AgentStore};
use abbey_ai::{DecisionContext, DecisionModel, Intent, Mind, Workplace};
use abbey_core::{AgentId, JobId, SimClock, SimConfig, SimRng, Tick};
use abbey_job::{JobSpec, SharedJobPool};
use abbey_schedule::{AgentSchedule, ObligationContext, ObligationQueue};
use abbey_world::{CostGrid, Pathfinder};
use tracing::{debug, warn};

use crate::{SimObserver, SimResult, TickSummary, WorldCalendar, WorldEventContext, WorldState};

/// The main simulation runner.
///
/// `Sim<M, P>` holds all simulation state and drives the tick loop described
/// in the crate docs.  Per-brother state lives in parallel `Vec`s indexed by
/// `AgentId`: `schedules`, `obligations`, and `minds` alongside the SoA
/// `AgentStore`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: DecisionModel, P: Pathfinder> {
    /// Global configuration (start time, total ticks, seed, tunables, …).
    pub config: SimConfig,

    /// Simulation clock: one tick is one minute.
    pub clock: SimClock,

    /// Brother state (SoA arrays).
    pub agents: AgentStore,

    /// Per-brother deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Per-brother daily schedules.
    pub schedules: Vec<AgentSchedule>,

    /// Per-brother personal obligation queues.
    pub obligations: Vec<ObligationQueue>,

    /// Per-brother decision state.
    pub minds: Vec<Mind>,

    /// Map, rooms, and the shared pool.
    pub world: WorldState,

    /// Movement costs, rebuilt at the start of every tick.
    pub grid: CostGrid,

    /// Chores the abbey puts on the pool at set times of day.
    pub calendar: WorldCalendar,

    /// RNG for world events, separate from every brother's stream.
    pub rng: SimRng,

    /// The decision model.  Called once per brother per tick.
    pub model: M,

    pub pathfinder: P,
}

impl<M: DecisionModel, P: Pathfinder> Sim<M, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.now() < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.now());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Create a job from `spec` and append it to the shared pool.
    pub fn spawn_job(&mut self, spec: JobSpec) -> SimResult<JobId> {
        Ok(self.world.enqueue(spec)?)
    }

    /// A handle to the shared pool that other threads may push to.
    pub fn pool_handle(&self) -> SharedJobPool {
        self.world.pool.clone()
    }

    /// Cancel every job `agent` holds or has queued, firing their cancel
    /// hooks.  Returns how many jobs were cancelled.
    pub fn cancel_agent_jobs(&mut self, agent: AgentId) -> SimResult<usize> {
        self.agents.check(agent)?;
        let i = agent.index();

        let mut jobs = self.minds[i].take_jobs();
        jobs.extend(self.obligations[i].drain());

        let mut cancelled = 0;
        for mut job in jobs {
            if job.state().is_finished() {
                continue;
            }
            job.cancel(&mut self.world)?;
            cancelled += 1;
        }
        debug!(agent = %agent, cancelled, "agent jobs cancelled");
        Ok(cancelled)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();
        observer.on_tick_start(now);

        let summary = self.process_tick(now);
        for (job, hook, action) in self.world.drain_performed() {
            observer.on_action(now, job, hook, &action);
        }
        observer.on_tick_end(&summary);

        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents, &self.minds);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: needs decay ──────────────────────────────────────────
        self.agents.decay_needs(self.config.hunger_per_tick, self.config.fatigue_per_tick);

        // ── Phase 2: cost grid ────────────────────────────────────────────
        //
        // Built once; brothers moving later in this tick do not refresh it.
        self.grid.rebuild(&self.world.map, &self.agents.position);

        // ── Phase 3: schedules → obligation queues ────────────────────────
        summary.obligations_fired = self.fire_schedules();

        // ── Phase 3b: world calendar → pool ───────────────────────────────
        summary.world_jobs = self.fire_calendar();

        // ── Phase 4 + 5: decide and apply, ascending AgentId ──────────────
        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            let intent = self.decide(agent);
            self.apply_intent(agent, intent, &mut summary);
        }

        summary.idle = self.minds.iter().filter(|m| m.is_idle()).count();
        summary.actions = self.world.performed_len();
        summary.pool_len = self.world.pool.len();
        summary
    }

    fn fire_schedules(&mut self) -> usize {
        let window = self.config.schedule_window_minutes;
        let mut fired = 0;

        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            let due = {
                let mut ctx = ObligationContext {
                    agent,
                    clock: &self.clock,
                    rooms: &self.world.rooms,
                    map:   &self.world.map,
                    rng:   self.rngs.get_mut(agent),
                };
                self.schedules[i].update(&mut ctx, window)
            };

            // Failed events were already logged by the schedule.
            for obligation in due.into_iter().flatten() {
                let job = match self.world.create_job(obligation.spec) {
                    Ok(job) => job,
                    Err(error) => {
                        warn!(agent = %agent, event = %obligation.event, %error, "obligation rejected");
                        continue;
                    }
                };
                if let Some(mut stale) = self.obligations[i].push(job) {
                    debug!(agent = %agent, job = %stale.id(), event = %obligation.event, "queued obligation superseded");
                    if let Err(error) = stale.cancel(&mut self.world) {
                        warn!(agent = %agent, %error, "could not cancel superseded obligation");
                    }
                }
                fired += 1;
            }
        }
        fired
    }

    fn fire_calendar(&mut self) -> usize {
        let due = {
            let mut ctx = WorldEventContext {
                clock: &self.clock,
                map:   &self.world.map,
                rooms: &self.world.rooms,
                rng:   &mut self.rng,
            };
            self.calendar.update(&mut ctx, self.config.schedule_window_minutes)
        };

        let mut pushed = 0;
        for event in due {
            for spec in event.specs {
                match self.world.enqueue(spec) {
                    Ok(_) => pushed += 1,
                    Err(error) => warn!(event = %event.event, %error, "world event job rejected"),
                }
            }
        }
        pushed
    }

    fn decide(&mut self, agent: AgentId) -> Intent {
        let i = agent.index();
        // Explicit field borrows so the borrow checker sees disjoint access.
        let mut ctx = DecisionContext {
            clock:      &self.clock,
            config:     &self.config,
            agents:     &self.agents,
            grid:       &self.grid,
            pathfinder: &self.pathfinder,
            workplace:  &mut self.world,
        };
        self.model.decide(
            agent,
            &mut self.minds[i],
            &mut self.obligations[i],
            &mut ctx,
            self.rngs.get_mut(agent),
        )
    }

    /// Apply one brother's intent during the sequential write phase.
    fn apply_intent(&mut self, agent: AgentId, intent: Intent, summary: &mut TickSummary) {
        let i = agent.index();
        match intent {
            Intent::Stay => {}

            // ── Step: one tile, only onto enterable ground ─────────────────
            Intent::Step(to) => {
                let from = self.agents.position[i];
                if !from.is_adjacent(to) || !self.world.map.can_enter(to) {
                    warn!(agent = %agent, %from, %to, "movement rejected");
                    summary.rejected_moves += 1;
                    return;
                }
                self.agents.position[i] = to;
                summary.moved += 1;
            }

            // ── Work: replenish what the job restores ──────────────────────
            Intent::Work { restores } => {
                if let Some(need) = restores {
                    self.agents.needs[i].restore(need, self.config.restore_per_tick);
                }
                summary.working += 1;
            }
        }
    }
}
