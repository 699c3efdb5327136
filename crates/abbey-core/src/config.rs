//! Top-level simulation configuration.

use crate::{AbbeyError, AbbeyResult, MINUTES_PER_DAY, RoomKind, SimClock, Tick, TimeOfDay};

/// Run-wide tunables.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the simulation builder.  Every field has a
/// sensible default; see [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Time of day at tick 0.  Default 01:00.
    pub start_time: TimeOfDay,

    /// Total ticks (minutes) to simulate.  Default: one day.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Half-width of a schedule event's firing window, in minutes.
    pub schedule_window_minutes: u32,

    /// Probability that an idle brother walks to the gathering room instead
    /// of standing still.  `0.0` disables idle wandering entirely.
    pub idle_gather_chance: f64,

    /// Ticks an idle brother stands still before reconsidering.
    pub idle_wait_ticks: u64,

    /// Room idle brothers gather in.
    pub idle_room: RoomKind,

    /// Work applied per tick by a brother with no effort override.
    pub default_effort: f32,

    /// Hunger gained per tick, on a 0–100 scale.
    pub hunger_per_tick: f32,

    /// Energy lost per tick, on a 0–100 scale.
    pub fatigue_per_tick: f32,

    /// Need restored per tick while working a meal or sleep job.
    pub restore_per_tick: f32,

    /// Emit an output snapshot every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time:              TimeOfDay::hm(1, 0),
            total_ticks:             MINUTES_PER_DAY as u64,
            seed:                    0,
            schedule_window_minutes: 5,
            idle_gather_chance:      0.25,
            idle_wait_ticks:         10,
            idle_room:               RoomKind::ChapterHouse,
            default_effort:          1.0,
            hunger_per_tick:         0.05,
            fatigue_per_tick:        0.04,
            restore_per_tick:        2.0,
            output_interval_ticks:   60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_time)
    }

    /// Reject values that would make the run meaningless.
    pub fn validate(&self) -> AbbeyResult<()> {
        if !(0.0..=1.0).contains(&self.idle_gather_chance) {
            return Err(AbbeyError::Config(format!(
                "idle_gather_chance must be in [0, 1], got {}",
                self.idle_gather_chance
            )));
        }
        if !(self.default_effort > 0.0) {
            return Err(AbbeyError::Config(format!(
                "default_effort must be positive, got {}",
                self.default_effort
            )));
        }
        if self.schedule_window_minutes >= MINUTES_PER_DAY / 2 {
            return Err(AbbeyError::Config(format!(
                "schedule_window_minutes {} covers the whole day",
                self.schedule_window_minutes
            )));
        }
        Ok(())
    }
}
