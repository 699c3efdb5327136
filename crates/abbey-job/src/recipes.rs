//! Ready-made job specs for construction and farming.
//!
//! These are the jobs a player command or world setup queues on the shared
//! pool.  All of them take one unit of effort.

use abbey_core::{Point, PropKind};

use crate::{Action, JobSpec};

pub const BUILD_WALL:  &str = "Build Wall";
pub const BUILD_FLOOR: &str = "Build Floor";
pub const PLACE_PROP:  &str = "Create Prop";
pub const TILL_FIELD:  &str = "Create Field";

/// Raise a wall at `at`; the tile becomes unwalkable on completion.
pub fn build_wall(at: Point) -> JobSpec {
    JobSpec::builder(BUILD_WALL)
        .at(at)
        .effort(1.0)
        .on_complete(Action::BuildWall { at })
        .build()
}

/// Lay a floor at `at`; the tile becomes walkable on completion.
pub fn build_floor(at: Point) -> JobSpec {
    JobSpec::builder(BUILD_FLOOR)
        .at(at)
        .effort(1.0)
        .on_complete(Action::BuildFloor { at })
        .build()
}

/// Place an arbitrary prop at `at`.
pub fn place_prop(prop: PropKind, at: Point) -> JobSpec {
    JobSpec::builder(PLACE_PROP)
        .at(at)
        .effort(1.0)
        .on_complete(Action::spawn(prop, at))
        .build()
}

/// Till a farm tile.
///
/// A pending-job marker appears as soon as the job is created and is swapped
/// for the field when the work is done.  Cancelling removes the marker.
pub fn till_field(at: Point) -> JobSpec {
    JobSpec::builder(TILL_FIELD)
        .at(at)
        .effort(1.0)
        .on_instant(Action::spawn(PropKind::PendingJob, at))
        .on_complete([
            Action::spawn(PropKind::Field, at),
            Action::remove(PropKind::PendingJob, at),
        ])
        .on_cancel(Action::remove(PropKind::PendingJob, at))
        .build()
}

/// One field job per tile of a farm.
pub fn till_fields(tiles: impl IntoIterator<Item = Point>) -> Vec<JobSpec> {
    tiles.into_iter().map(till_field).collect()
}
