//! The abbey's own calendar: chores put on the shared pool at set times of
//! day, independent of any brother's schedule.
//!
//! The daily office pairs every service with two events:
//!
//! ```text
//! <Service> chores   at the service hour      one chore at each fixed spot
//! <Service> tidy-up  30 minutes afterwards    chores at random open tiles
//! ```

use std::fmt;
use std::sync::Arc;

use abbey_core::{Point, SimClock, SimRng, TimeOfDay};
use abbey_job::JobSpec;
use abbey_schedule::{DailyTrigger, SERVICES};
use abbey_world::{RoomRegistry, TileMap};
use tracing::debug;

/// Name of every job the calendar creates.
pub const CHORE_JOB: &str = "Chore";

/// Minutes after a service at which its scattered chores appear.
pub const TIDY_UP_DELAY_MINUTES: u64 = 30;

/// Draws at a random open tile before a scattered chore is dropped.
const SCATTER_TRIES: usize = 32;

// ── Context and trait ─────────────────────────────────────────────────────────

/// Read-only world plus the calendar's RNG, handed to a firing event.
pub struct WorldEventContext<'a> {
    pub clock: &'a SimClock,
    pub map:   &'a TileMap,
    pub rooms: &'a RoomRegistry,
    pub rng:   &'a mut SimRng,
}

/// Builds the pool jobs for one firing of a world event.
pub trait WorldEventFactory: Send + Sync {
    fn make(&self, event: &str, ctx: &mut WorldEventContext<'_>) -> Vec<JobSpec>;

    /// Short label for logs and debug output.
    fn describe(&self) -> String;
}

// ── Built-ins ─────────────────────────────────────────────────────────────────

/// One single-effort chore at each listed tile, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedChores {
    pub spots: Vec<Point>,
}

impl WorldEventFactory for FixedChores {
    fn make(&self, _event: &str, _ctx: &mut WorldEventContext<'_>) -> Vec<JobSpec> {
        self.spots.iter().map(|&at| chore(at)).collect()
    }

    fn describe(&self) -> String {
        format!("chores({} spots)", self.spots.len())
    }
}

/// `count` single-effort chores at random enterable tiles of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScatteredChores {
    pub count: usize,
}

impl WorldEventFactory for ScatteredChores {
    fn make(&self, event: &str, ctx: &mut WorldEventContext<'_>) -> Vec<JobSpec> {
        let mut specs = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            match random_open_tile(ctx.map, ctx.rng) {
                Some(at) => specs.push(chore(at)),
                None => debug!(event, "no open tile for a scattered chore"),
            }
        }
        specs
    }

    fn describe(&self) -> String {
        format!("scattered({})", self.count)
    }
}

fn chore(at: Point) -> JobSpec {
    JobSpec::builder(CHORE_JOB).at(at).effort(1.0).build()
}

fn random_open_tile(map: &TileMap, rng: &mut SimRng) -> Option<Point> {
    let (w, h) = (map.width() as i32, map.height() as i32);
    if w == 0 || h == 0 {
        return None;
    }
    for _ in 0..SCATTER_TRIES {
        let p = Point::new(rng.gen_range(0..w), rng.gen_range(0..h));
        if map.can_enter(p) {
            return Some(p);
        }
    }
    None
}

// ── WorldEvent ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct WorldEvent {
    pub name:    String,
    pub factory: Arc<dyn WorldEventFactory>,
    pub trigger: DailyTrigger,
}

impl fmt::Debug for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldEvent")
            .field("name", &self.name)
            .field("time", &self.trigger.time)
            .field("factory", &self.factory.describe())
            .field("last_fired", &self.trigger.last_fired())
            .finish()
    }
}

/// A world event that came due this tick, with the jobs it produced.
#[derive(Debug)]
pub struct DueWorldEvent {
    pub event: String,
    pub cycle: i64,
    pub specs: Vec<JobSpec>,
}

// ── WorldCalendar ─────────────────────────────────────────────────────────────

/// Ordered list of world events.  Each fires at most once per day.
#[derive(Clone, Debug, Default)]
pub struct WorldCalendar {
    events: Vec<WorldEvent>,
}

impl WorldCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chores for every service of the day: one at each of `spots` when the
    /// service starts, then `scattered` more at random open tiles half an
    /// hour later.
    pub fn daily_office(spots: Vec<Point>, scattered: usize) -> Self {
        let fixed: Arc<dyn WorldEventFactory> = Arc::new(FixedChores { spots });
        let tidy: Arc<dyn WorldEventFactory> = Arc::new(ScatteredChores { count: scattered });
        let mut c = Self::new();
        for &(name, time) in &SERVICES {
            let later = TimeOfDay::from_minutes(time.minutes() as u64 + TIDY_UP_DELAY_MINUTES);
            c.add_event(format!("{name} chores"), fixed.clone(), time);
            c.add_event(format!("{name} tidy-up"), tidy.clone(), later);
        }
        c
    }

    pub fn add_event(
        &mut self,
        name:    impl Into<String>,
        factory: Arc<dyn WorldEventFactory>,
        time:    TimeOfDay,
    ) {
        self.events.push(WorldEvent { name: name.into(), factory, trigger: DailyTrigger::new(time) });
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fire every event whose window contains the current time and that has
    /// not fired this cycle, in insertion order.
    pub fn update(
        &mut self,
        ctx:            &mut WorldEventContext<'_>,
        window_minutes: u32,
    ) -> Vec<DueWorldEvent> {
        let run_minute = ctx.clock.run_minute();
        let mut due = Vec::new();
        for event in &mut self.events {
            let Some(cycle) = event.trigger.try_fire(run_minute, window_minutes) else {
                continue;
            };
            let specs = event.factory.make(&event.name, ctx);
            debug!(event = %event.name, cycle, jobs = specs.len(), "world event due");
            due.push(DueWorldEvent { event: event.name.clone(), cycle, specs });
        }
        due
    }
}
