//! `ObligationFactory` - turns a due schedule event into a job.
//!
//! Factories run at firing time, so they see the world as it is then: the
//! room a service is sung in is looked up live, and each brother gets his
//! own random point in it.

use abbey_agent::Need;
use abbey_core::{AgentId, AgentRng, RoomKind, SimClock};
use abbey_job::JobSpec;
use abbey_world::{Room, RoomRegistry, TileMap};

use crate::{ScheduleError, ScheduleResult};

/// Everything a factory may consult when building an obligation.
pub struct ObligationContext<'a> {
    pub agent: AgentId,
    pub clock: &'a SimClock,
    pub rooms: &'a RoomRegistry,
    pub map:   &'a TileMap,
    pub rng:   &'a mut AgentRng,
}

impl<'a> ObligationContext<'a> {
    /// The first room of `kind`, or a `MissingRoom` error naming `event`.
    pub fn require_room(&self, event: &str, kind: RoomKind) -> ScheduleResult<&'a Room> {
        self.rooms.room_of_kind(kind).ok_or_else(|| ScheduleError::MissingRoom {
            event: event.to_owned(),
            room:  kind,
        })
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Builds the job for one firing of a schedule event.
///
/// # Contract
///
/// - Must not block or perform I/O.
/// - Randomness comes only from `ctx.rng`, so runs stay reproducible.
pub trait ObligationFactory: Send + Sync {
    /// Build the job for event `event`.
    fn make(&self, event: &str, ctx: &mut ObligationContext<'_>) -> ScheduleResult<JobSpec>;

    /// Short label for logs and debug output.
    fn describe(&self) -> String;
}

// ── Built-ins ─────────────────────────────────────────────────────────────────

/// Stand at a random place in the quire until `duration_minutes` after the
/// event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttendService {
    pub duration_minutes: u64,
}

impl Default for AttendService {
    fn default() -> Self {
        Self { duration_minutes: 30 }
    }
}

impl ObligationFactory for AttendService {
    fn make(&self, event: &str, ctx: &mut ObligationContext<'_>) -> ScheduleResult<JobSpec> {
        let at = {
            let room = ctx.require_room(event, RoomKind::Quire)?;
            room.random_walkable_point(ctx.rng, ctx.map)
        };
        Ok(JobSpec::builder(event)
            .at(at)
            .deadline(ctx.clock.after(self.duration_minutes))
            .build())
    }

    fn describe(&self) -> String {
        format!("service({} min)", self.duration_minutes)
    }
}

/// Eat in the refectory until no longer hungry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TakeMeal;

impl ObligationFactory for TakeMeal {
    fn make(&self, event: &str, ctx: &mut ObligationContext<'_>) -> ScheduleResult<JobSpec> {
        need_job(event, ctx, RoomKind::Refectory, Need::Hunger)
    }

    fn describe(&self) -> String {
        "meal".into()
    }
}

/// Sleep in the dormitory until rested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GoToBed;

impl ObligationFactory for GoToBed {
    fn make(&self, event: &str, ctx: &mut ObligationContext<'_>) -> ScheduleResult<JobSpec> {
        need_job(event, ctx, RoomKind::Dormitory, Need::Energy)
    }

    fn describe(&self) -> String {
        "sleep".into()
    }
}

fn need_job(
    event: &str,
    ctx:   &mut ObligationContext<'_>,
    room:  RoomKind,
    need:  Need,
) -> ScheduleResult<JobSpec> {
    let at = {
        let room = ctx.require_room(event, room)?;
        room.random_walkable_point(ctx.rng, ctx.map)
    };
    Ok(JobSpec::builder(event)
        .at(at)
        .until(move |w| w.needs.is_satisfied(need))
        .restores(need)
        .build())
}
