//! Integration tests for abbey-sim.

use abbey_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use abbey_ai::{BrotherAi, DecisionModel, NoopAi};
use abbey_core::{JobId, Point, RoomKind, SimConfig, Tick, TimeOfDay};
use abbey_job::{Action, HookKind};
use abbey_world::{DijkstraPathfinder, RoomRegistry, TileMap};

use crate::{Sim, SimBuilder, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_time:            TimeOfDay::hm(9, 0),
        total_ticks,
        seed:                  42,
        idle_gather_chance:    0.0,
        output_interval_ticks: 1,
        ..SimConfig::default()
    }
}

fn brothers(at: &[Point]) -> (AgentStore, AgentRngs) {
    at.iter()
        .enumerate()
        .fold(AgentStoreBuilder::new(42), |b, (i, &p)| b.brother(format!("Brother {i}"), p))
        .build()
}

/// A 12×12 open cloister with a quire in the far corner.
fn cloister() -> (TileMap, RoomRegistry) {
    let mut rooms = RoomRegistry::new();
    rooms.add(RoomKind::Quire, Point::new(8, 8), Point::new(10, 10));
    (TileMap::new(12, 12), rooms)
}

fn sim_with<M: DecisionModel>(
    config: SimConfig,
    at:     &[Point],
    model:  M,
) -> SimBuilder<M, DijkstraPathfinder> {
    let (store, rngs) = brothers(at);
    let (map, rooms) = cloister();
    SimBuilder::new(config, store, rngs, map, rooms, model, DijkstraPathfinder)
}

fn sim(at: &[Point]) -> Sim<BrotherAi, DijkstraPathfinder> {
    sim_with(test_config(100), at, BrotherAi).build().unwrap()
}

/// Observer that keeps everything it is told.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    summaries: Vec<TickSummary>,
    actions:   Vec<(JobId, HookKind, Action)>,
    snapshots: usize,
    ended:     Option<Tick>,
}

impl Recorder {
    fn walls_built_at(&self, p: Point) -> usize {
        self.actions
            .iter()
            .filter(|(_, _, a)| matches!(a, Action::BuildWall { at } if *at == p))
            .count()
    }
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_action(&mut self, _tick: Tick, job: JobId, hook: HookKind, action: &Action) {
        self.actions.push((job, hook, action.clone()));
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }

    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _minds: &[abbey_ai::Mind]) {
        self.snapshots += 1;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use abbey_job::recipes;
    use abbey_schedule::AgentSchedule;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = sim(&[Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
        assert_eq!(sim.agents.count, 3);
        assert_eq!(sim.schedules.len(), 3);
        assert_eq!(sim.minds.len(), 3);
        assert_eq!(sim.obligations.len(), 3);
        assert!(sim.schedules.iter().all(AgentSchedule::is_empty));
        assert_eq!(sim.clock.time_of_day(), TimeOfDay::hm(9, 0));
    }

    #[test]
    fn schedule_count_mismatch_errors() {
        let result = sim_with(test_config(10), &[Point::new(0, 0), Point::new(1, 1)], BrotherAi)
            .schedules(vec![AgentSchedule::horarium()])
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { expected: 2, got: 1, .. })));
    }

    #[test]
    fn brother_off_the_map_errors() {
        let result = sim_with(test_config(10), &[Point::new(40, 0)], BrotherAi).build();
        assert!(matches!(result, Err(SimError::World(_))));
    }

    #[test]
    fn invalid_config_errors() {
        let config = SimConfig { idle_gather_chance: 2.0, ..test_config(10) };
        let result = sim_with(config, &[Point::new(0, 0)], BrotherAi).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn horarium_gives_everyone_the_day() {
        let sim = sim_with(test_config(10), &[Point::new(0, 0), Point::new(1, 1)], BrotherAi)
            .horarium()
            .build()
            .unwrap();
        assert!(sim.schedules.iter().all(|s| s.len() == 11));
    }

    #[test]
    fn starting_jobs_land_in_the_pool() {
        let sim = sim_with(test_config(10), &[Point::new(0, 0)], BrotherAi)
            .jobs(recipes::till_fields([Point::new(3, 3), Point::new(4, 3)]))
            .build()
            .unwrap();
        assert_eq!(sim.world.pool.len(), 2);
        assert!(sim.world.map.has_prop(abbey_core::PropKind::PendingJob, Point::new(3, 3)));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], BrotherAi).build().unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(sim.clock.now(), Tick(10));
        assert_eq!(obs.starts.len(), 10);
        assert_eq!(obs.snapshots, 10);
        assert_eq!(obs.ended, Some(Tick(10)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = sim(&[Point::new(0, 0)]);
        let mut obs = Recorder::default();
        sim.run_ticks(5, &mut obs).unwrap();
        assert_eq!(sim.clock.now(), Tick(5));
        sim.run_ticks(3, &mut obs).unwrap();
        assert_eq!(sim.clock.now(), Tick(8));
        assert_eq!(obs.ended, None, "run_ticks does not end the run");
    }

    #[test]
    fn idle_tick_moves_nobody() {
        let mut sim = sim(&[Point::new(4, 4)]);
        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();

        assert_eq!(sim.agents.position[0], Point::new(4, 4));
        assert!(sim.minds[0].current_job().is_none());
        let s = obs.summaries[0];
        assert_eq!((s.moved, s.working, s.idle), (0, 0, 1));
    }

    #[test]
    fn needs_decay_every_tick() {
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], NoopAi).build().unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(4, &mut obs).unwrap();

        let needs = sim.agents.needs[0];
        let expected = 4.0 * sim.config.hunger_per_tick;
        assert!((needs.hunger - expected).abs() < 1e-4);
        assert!(needs.energy < 100.0);
    }
}

// ── Jobs end to end ───────────────────────────────────────────────────────────

#[cfg(test)]
mod job_tests {
    use abbey_core::PropKind;
    use abbey_job::{JobSpec, recipes};

    use super::*;

    #[test]
    fn wall_on_the_spot_is_built_in_one_tick() {
        let p = Point::new(5, 5);
        let mut sim = sim(&[p]);
        sim.spawn_job(recipes::build_wall(p)).unwrap();
        let mut obs = Recorder::default();

        sim.run_ticks(1, &mut obs).unwrap();
        assert!(sim.world.map.has_prop(PropKind::Wall, p));
        assert!(!sim.world.map.is_walkable(p));
        assert!(sim.minds[0].is_idle());
        assert_eq!(obs.walls_built_at(p), 1);

        sim.run_ticks(5, &mut obs).unwrap();
        assert_eq!(obs.walls_built_at(p), 1, "complete fires at most once");
    }

    #[test]
    fn brother_walks_to_a_distant_job_then_works_it() {
        let mut sim = sim(&[Point::new(0, 0)]);
        sim.spawn_job(recipes::build_floor(Point::new(3, 0))).unwrap();
        let mut obs = Recorder::default();

        sim.run_ticks(3, &mut obs).unwrap();
        assert_eq!(sim.agents.position[0], Point::new(3, 0));
        assert!(obs.summaries.iter().all(|s| s.moved == 1));

        sim.run_ticks(1, &mut obs).unwrap();
        assert!(sim.world.map.has_prop(PropKind::Floor, Point::new(3, 0)));
    }

    #[test]
    fn obligation_is_chosen_over_pool_job() {
        let mut sim = sim(&[Point::new(0, 0)]);
        sim.spawn_job(recipes::build_wall(Point::new(1, 0))).unwrap();
        let vigil = JobSpec::builder("Vigil").at(Point::new(10, 10)).effort(5.0).build();
        let job = abbey_ai::Workplace::create_job(&mut sim.world, vigil).unwrap();
        sim.obligations[0].push(job);

        sim.run_ticks(1, &mut Recorder::default()).unwrap();
        assert_eq!(sim.minds[0].current_job().unwrap().name(), "Vigil");
        assert_eq!(sim.world.pool.len(), 1, "pool job left untouched");
        assert_eq!(sim.agents.position[0], Point::new(1, 1));
    }

    #[test]
    fn tilled_field_replaces_its_marker() {
        let p = Point::new(2, 2);
        let mut sim = sim(&[p]);
        sim.spawn_job(recipes::till_field(p)).unwrap();
        assert!(sim.world.map.has_prop(PropKind::PendingJob, p));

        sim.run_ticks(1, &mut Recorder::default()).unwrap();
        assert!(sim.world.map.has_prop(PropKind::Field, p));
        assert!(!sim.world.map.has_prop(PropKind::PendingJob, p));
    }

    #[test]
    fn completion_can_enqueue_follow_on_work() {
        let p = Point::new(1, 1);
        let mut sim = sim(&[p]);
        let spec = JobSpec::builder("Survey")
            .at(p)
            .on_complete(Action::enqueue(recipes::build_floor(Point::new(6, 6))))
            .build();
        sim.spawn_job(spec).unwrap();

        sim.run_ticks(1, &mut Recorder::default()).unwrap();
        let names: Vec<String> = sim.world.pool.with(|pool| pool.iter().map(|j| j.name().to_owned()).collect());
        assert_eq!(names, vec![recipes::BUILD_FLOOR.to_owned()]);
    }

    #[test]
    fn failing_hook_does_not_stop_the_rest() {
        let p = Point::new(1, 1);
        let mut sim = sim(&[p]);
        let spec = JobSpec::builder("Clear and wall")
            .at(p)
            .on_complete([Action::remove(PropKind::StonePillar, p), Action::BuildWall { at: p }])
            .build();
        sim.spawn_job(spec).unwrap();
        let mut obs = Recorder::default();

        sim.run_ticks(1, &mut obs).unwrap();
        assert!(sim.world.map.has_prop(PropKind::Wall, p));
        assert_eq!(obs.actions.len(), 1, "only the successful action is reported");
    }

    #[test]
    fn cancelling_an_agents_jobs_fires_cancel_hooks() {
        let mut sim = sim(&[Point::new(0, 0)]);
        let spec = JobSpec::builder("Fetch water")
            .at(Point::new(11, 11))
            .on_cancel(Action::announce("never mind"))
            .build();
        sim.spawn_job(spec).unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();
        assert!(!sim.minds[0].is_idle());

        assert_eq!(sim.cancel_agent_jobs(abbey_core::AgentId(0)).unwrap(), 1);
        assert!(sim.minds[0].is_idle());

        sim.run_ticks(1, &mut obs).unwrap();
        assert!(obs.actions.iter().any(|(_, hook, _)| *hook == HookKind::Cancel));
    }

    #[test]
    fn cancelling_unknown_agent_errors() {
        let mut sim = sim(&[Point::new(0, 0)]);
        assert!(sim.cancel_agent_jobs(abbey_core::AgentId(3)).is_err());
    }

    #[test]
    fn pool_handle_feeds_the_running_sim() {
        let mut sim = sim(&[Point::new(0, 0)]);
        let handle = sim.pool_handle();
        let job = abbey_ai::Workplace::create_job(&mut sim.world, recipes::build_wall(Point::new(0, 0))).unwrap();
        std::thread::spawn(move || handle.push(job).unwrap()).join().unwrap();

        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();
        assert_eq!(obs.walls_built_at(Point::new(0, 0)), 1);
    }
}

// ── Schedules ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule_tests {
    use std::sync::Arc;

    use abbey_schedule::{AgentSchedule, AttendService};

    use super::*;

    #[test]
    fn terce_fires_at_nine() {
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], BrotherAi)
            .horarium()
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();

        assert_eq!(obs.summaries[0].obligations_fired, 1);
        assert_eq!(sim.minds[0].current_job().unwrap().name(), "Terce");

        sim.run_ticks(5, &mut obs).unwrap();
        assert!(obs.summaries[1..].iter().all(|s| s.obligations_fired == 0));
    }

    #[test]
    fn missing_room_skips_the_obligation() {
        let (store, rngs) = brothers(&[Point::new(0, 0)]);
        let mut sim = SimBuilder::new(
            test_config(10),
            store,
            rngs,
            TileMap::new(5, 5),
            RoomRegistry::new(),
            BrotherAi,
            DijkstraPathfinder,
        )
        .horarium()
        .build()
        .unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(2, &mut obs).unwrap();

        assert_eq!(obs.summaries[0].obligations_fired, 0);
        assert!(sim.minds[0].is_idle());
        assert!(sim.obligations[0].is_empty());
    }

    #[test]
    fn queued_obligation_of_same_name_is_superseded() {
        let mut schedule = AgentSchedule::new();
        let service = Arc::new(AttendService::default());
        schedule.add_event("Terce", service.clone(), TimeOfDay::hm(9, 0));
        schedule.add_event("Terce", service, TimeOfDay::hm(9, 2));
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], NoopAi)
            .schedules(vec![schedule])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();

        assert_eq!(obs.summaries[0].obligations_fired, 2);
        assert_eq!(sim.obligations[0].len(), 1);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use abbey_ai::{DecisionContext, Intent, Mind};
    use abbey_core::{AgentId, AgentRng};
    use abbey_schedule::ObligationQueue;

    use super::*;

    /// Always tries to walk one tile east.
    struct WalkEast;

    impl DecisionModel for WalkEast {
        fn decide(
            &self,
            agent: AgentId,
            _mind: &mut Mind,
            _obligations: &mut ObligationQueue,
            ctx: &mut DecisionContext<'_>,
            _rng: &mut AgentRng,
        ) -> Intent {
            Intent::Step(ctx.agents.position_of(agent).offset(1, 0))
        }
    }

    #[test]
    fn steps_onto_open_ground() {
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], WalkEast).build().unwrap();
        sim.run_ticks(2, &mut Recorder::default()).unwrap();
        assert_eq!(sim.agents.position[0], Point::new(2, 0));
    }

    #[test]
    fn steps_into_walls_are_rejected() {
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], WalkEast).build().unwrap();
        sim.world.map.build_wall(Point::new(1, 0)).unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs).unwrap();

        assert_eq!(sim.agents.position[0], Point::new(0, 0));
        assert_eq!(obs.summaries[0].rejected_moves, 1);
        assert_eq!(obs.summaries[0].moved, 0);
    }

    #[test]
    fn steps_off_the_map_are_rejected() {
        let mut sim = sim_with(test_config(10), &[Point::new(11, 0)], WalkEast).build().unwrap();
        sim.run_ticks(1, &mut Recorder::default()).unwrap();
        assert_eq!(sim.agents.position[0], Point::new(11, 0));
    }
}

// ── World calendar ────────────────────────────────────────────────────────────

#[cfg(test)]
mod calendar_tests {
    use std::sync::Arc;

    use crate::{CHORE_JOB, FixedChores, ScatteredChores, WorldCalendar};

    use super::*;

    fn pool_spots<M: DecisionModel>(sim: &Sim<M, DijkstraPathfinder>) -> Vec<(String, Point)> {
        sim.world
            .pool
            .with(|p| p.iter().map(|j| (j.name().to_owned(), j.locations()[0])).collect())
    }

    #[test]
    fn chores_land_in_the_pool_once_per_day() {
        let mut calendar = WorldCalendar::new();
        let spots = vec![Point::new(1, 1), Point::new(2, 2)];
        calendar.add_event("Terce chores", Arc::new(FixedChores { spots }), TimeOfDay::hm(9, 0));

        let mut sim = sim_with(test_config(2 * 1440), &[Point::new(0, 0)], NoopAi)
            .calendar(calendar)
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();

        let fired: Vec<Tick> = obs.summaries.iter().filter(|s| s.world_jobs > 0).map(|s| s.tick).collect();
        // Day 0 at 09:00 exactly; day 1 on the window's first minute.
        assert_eq!(fired, vec![Tick(0), Tick(1435)]);
        assert!(obs.summaries.iter().all(|s| s.world_jobs == 0 || s.world_jobs == 2));

        let pool = pool_spots(&sim);
        assert_eq!(pool.len(), 4);
        assert!(pool.iter().all(|(name, _)| name == CHORE_JOB));
        assert_eq!(pool[0].1, Point::new(1, 1));
        assert_eq!(pool[1].1, Point::new(2, 2));
    }

    #[test]
    fn scattered_chores_only_on_open_ground() {
        let mut map = TileMap::new(4, 4);
        for y in 0..4 {
            for x in 0..2 {
                map.set_walkable(Point::new(x, y), false).unwrap();
            }
        }
        let mut calendar = WorldCalendar::new();
        calendar.add_event("Tidy", Arc::new(ScatteredChores { count: 3 }), TimeOfDay::hm(9, 0));

        let (store, rngs) = brothers(&[Point::new(3, 3)]);
        let mut sim = SimBuilder::new(
            test_config(5),
            store,
            rngs,
            map,
            RoomRegistry::new(),
            NoopAi,
            DijkstraPathfinder,
        )
        .calendar(calendar)
        .build()
        .unwrap();
        sim.run_ticks(1, &mut Recorder::default()).unwrap();

        let pool = pool_spots(&sim);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|(_, p)| p.x >= 2), "chore on a blocked tile: {pool:?}");
    }

    #[test]
    fn daily_office_pairs_each_service_with_a_tidy_up() {
        let calendar = WorldCalendar::daily_office(vec![Point::new(9, 9)], 2);
        assert_eq!(calendar.len(), 18);

        let terce = &calendar.events()[8];
        let tidy = &calendar.events()[9];
        assert_eq!(terce.name, "Terce chores");
        assert_eq!(terce.trigger.time, TimeOfDay::hm(9, 0));
        assert_eq!(tidy.name, "Terce tidy-up");
        assert_eq!(tidy.trigger.time, TimeOfDay::hm(9, 30));
    }

    #[test]
    fn brother_takes_up_a_calendar_chore() {
        let calendar = WorldCalendar::daily_office(vec![Point::new(0, 2)], 0);
        let mut sim = sim_with(test_config(10), &[Point::new(0, 0)], BrotherAi)
            .calendar(calendar)
            .build()
            .unwrap();
        sim.run_ticks(1, &mut Recorder::default()).unwrap();

        assert_eq!(sim.minds[0].current_job().unwrap().name(), CHORE_JOB);
        assert_eq!(sim.agents.position[0].chebyshev(Point::new(0, 2)), 1);
    }
}
