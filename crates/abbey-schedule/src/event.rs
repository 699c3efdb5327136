//! One entry of a daily schedule, and the once-a-day trigger behind it.

use std::fmt;
use std::sync::Arc;

use abbey_core::{MINUTES_PER_DAY, TimeOfDay};

use crate::ObligationFactory;

// ── DailyTrigger ──────────────────────────────────────────────────────────────

/// Fires at most once per day cycle, on the first minute within the window
/// around `time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyTrigger {
    pub time:   TimeOfDay,
    /// Day cycle this trigger last fired in.
    last_fired: Option<i64>,
}

impl DailyTrigger {
    pub fn new(time: TimeOfDay) -> Self {
        Self { time, last_fired: None }
    }

    /// The day cycle whose occurrence of `time` is nearest to `run_minute`,
    /// and the signed distance to that occurrence in minutes.
    pub fn nearest_occurrence(&self, run_minute: u64) -> (i64, i64) {
        let day = MINUTES_PER_DAY as i64;
        let m = run_minute as i64;
        let t = self.time.minutes() as i64;
        let cycle = (m - t + day / 2).div_euclid(day);
        (cycle, m - (cycle * day + t))
    }

    /// If due at `run_minute` and not yet fired this cycle, mark it fired and
    /// return the cycle.
    pub fn try_fire(&mut self, run_minute: u64, window_minutes: u32) -> Option<i64> {
        let (cycle, offset) = self.nearest_occurrence(run_minute);
        if offset.unsigned_abs() > window_minutes as u64 || self.last_fired == Some(cycle) {
            return None;
        }
        self.last_fired = Some(cycle);
        Some(cycle)
    }

    pub fn last_fired(&self) -> Option<i64> {
        self.last_fired
    }
}

// ── ScheduleEvent ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ScheduleEvent {
    pub name:    String,
    pub factory: Arc<dyn ObligationFactory>,
    pub trigger: DailyTrigger,
}

impl ScheduleEvent {
    pub fn new(name: impl Into<String>, time: TimeOfDay, factory: Arc<dyn ObligationFactory>) -> Self {
        Self { name: name.into(), factory, trigger: DailyTrigger::new(time) }
    }

    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.trigger.time
    }

    pub fn nearest_occurrence(&self, run_minute: u64) -> (i64, i64) {
        self.trigger.nearest_occurrence(run_minute)
    }

    pub fn try_fire(&mut self, run_minute: u64, window_minutes: u32) -> Option<i64> {
        self.trigger.try_fire(run_minute, window_minutes)
    }

    pub fn last_fired(&self) -> Option<i64> {
        self.trigger.last_fired()
    }
}

impl fmt::Debug for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleEvent")
            .field("name", &self.name)
            .field("time", &self.trigger.time)
            .field("factory", &self.factory.describe())
            .field("last_fired", &self.trigger.last_fired)
            .finish()
    }
}
