//! Simulation time model.
//!
//! # Design
//!
//! One `Tick` is one simulated minute.  `SimClock` remembers the time of day
//! at tick 0, so the absolute minute of the run is:
//!
//!   run_minute = start_time.minutes() + tick
//!
//! from which the day index and time of day follow by integer division.
//! Integer minutes keep schedule-window arithmetic exact.

use std::fmt;

use crate::{AbbeyError, AbbeyResult};

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (minutes since the run started).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// Minutes since midnight, always in `0..MINUTES_PER_DAY`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from hours and minutes, wrapping past midnight.
    #[inline]
    pub const fn hm(hour: u32, minute: u32) -> Self {
        TimeOfDay((hour * 60 + minute) % MINUTES_PER_DAY)
    }

    /// Strict constructor for user input: rejects `hour >= 24` or `minute >= 60`.
    pub fn try_hm(hour: u32, minute: u32) -> AbbeyResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(AbbeyError::Parse(format!(
                "invalid time of day {hour:02}:{minute:02}"
            )));
        }
        Ok(Self::hm(hour, minute))
    }

    /// Wrap an arbitrary minute count onto the 24-hour dial.
    #[inline]
    pub const fn from_minutes(minutes: u64) -> Self {
        TimeOfDay((minutes % MINUTES_PER_DAY as u64) as u32)
    }

    #[inline]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        self.0 % 60
    }
}

/// Checked conversion from minutes since midnight.
impl TryFrom<u32> for TimeOfDay {
    type Error = AbbeyError;

    fn try_from(minutes: u32) -> AbbeyResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(AbbeyError::Parse(format!(
                "time of day {minutes} is not below {MINUTES_PER_DAY} minutes"
            )));
        }
        Ok(TimeOfDay(minutes))
    }
}

impl From<TimeOfDay> for u32 {
    fn from(t: TimeOfDay) -> u32 {
        t.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps it to day / time of day.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Time of day at tick 0.
    pub start_time:   TimeOfDay,
    /// The current tick - advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_time: TimeOfDay) -> Self {
        Self { start_time, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one simulated minute.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current_tick
    }

    /// Minutes since midnight of day 0 for an arbitrary tick.
    #[inline]
    pub fn run_minute_at(&self, tick: Tick) -> u64 {
        self.start_time.minutes() as u64 + tick.0
    }

    /// Minutes since midnight of day 0 for the current tick.
    #[inline]
    pub fn run_minute(&self) -> u64 {
        self.run_minute_at(self.current_tick)
    }

    /// Zero-based day index.
    #[inline]
    pub fn day(&self) -> u64 {
        self.run_minute() / MINUTES_PER_DAY as u64
    }

    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_minutes(self.run_minute())
    }

    /// The tick `minutes` from now.
    #[inline]
    pub fn after(&self, minutes: u64) -> Tick {
        self.current_tick.offset(minutes)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(TimeOfDay::MIDNIGHT)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day {} {})", self.current_tick, self.day(), self.time_of_day())
    }
}
