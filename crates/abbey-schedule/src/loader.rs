//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per event, in the order they should be checked.
//!
//! ```csv
//! name,hour,minute,obligation,duration_minutes
//! Lauds,5,0,service,30
//! Lunch,13,0,meal,
//! Bedtime,20,0,sleep,
//! ```
//!
//! **`obligation`** field:
//!
//! | Value     | Factory                                               |
//! |-----------|-------------------------------------------------------|
//! | `service` | [`AttendService`] for `duration_minutes` (default 30) |
//! | `meal`    | [`TakeMeal`]                                          |
//! | `sleep`   | [`GoToBed`]                                           |

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use abbey_core::TimeOfDay;

use crate::schedule::SERVICE_MINUTES;
use crate::{AgentSchedule, AttendService, GoToBed, ObligationFactory, ScheduleError, TakeMeal};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    name:             String,
    hour:             u32,
    minute:           u32,
    obligation:       String,
    duration_minutes: Option<u64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a schedule from a CSV file.
pub fn load_schedule_csv(path: &Path) -> Result<AgentSchedule, ScheduleError> {
    let file = std::fs::File::open(path)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
pub fn load_schedule_reader<R: Read>(reader: R) -> Result<AgentSchedule, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut schedule = AgentSchedule::new();

    for result in csv_reader.deserialize::<EventRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let time = TimeOfDay::try_hm(row.hour, row.minute)?;
        let factory = parse_obligation(&row.obligation, row.duration_minutes)?;
        schedule.add_event(row.name, factory, time);
    }

    Ok(schedule)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_obligation(
    s:        &str,
    duration: Option<u64>,
) -> Result<Arc<dyn ObligationFactory>, ScheduleError> {
    match s {
        "service" => Ok(Arc::new(AttendService {
            duration_minutes: duration.unwrap_or(SERVICE_MINUTES),
        })),
        "meal" => Ok(Arc::new(TakeMeal)),
        "sleep" => Ok(Arc::new(GoToBed)),
        other => Err(ScheduleError::Parse(format!(
            "invalid obligation {other:?}: expected \"service\", \"meal\", or \"sleep\""
        ))),
    }
}
