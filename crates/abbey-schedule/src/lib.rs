//! `abbey-schedule` - the daily round and the obligations it produces.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`event`]       | `ScheduleEvent`, `DailyTrigger` and the firing window       |
//! | [`schedule`]    | `AgentSchedule`, `AgentSchedule::horarium`, `SERVICES`      |
//! | [`obligation`]  | `ObligationFactory` trait, `AttendService`, `TakeMeal`, `GoToBed` |
//! | [`queue`]       | `ObligationQueue` - one brother's FIFO of personal jobs     |
//! | [`loader`]      | `load_schedule_csv`, `load_schedule_reader`                 |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                        |
//!
//! # Firing model (summary)
//!
//! An event at time of day `T` with window `W` fires once per day, on the
//! first tick whose run minute `m` satisfies
//!
//! ```text
//! cycle      = floor((m - T + 720) / 1440)      // nearest day's occurrence
//! occurrence = cycle * 1440 + T
//! |m - occurrence| <= W   and   cycle not fired yet
//! ```
//!
//! Keying on the cycle makes windows that straddle midnight behave like any
//! other and lets every event recur daily.

pub mod error;
pub mod event;
pub mod loader;
pub mod obligation;
pub mod queue;
pub mod schedule;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{DailyTrigger, ScheduleEvent};
pub use loader::{load_schedule_csv, load_schedule_reader};
pub use obligation::{AttendService, GoToBed, ObligationContext, ObligationFactory, TakeMeal};
pub use queue::ObligationQueue;
pub use schedule::{AgentSchedule, DueObligation, SERVICES, SERVICE_MINUTES};
