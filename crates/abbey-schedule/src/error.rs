use thiserror::Error;

use abbey_core::{AbbeyError, RoomKind};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("event {event:?} needs a {room} but the monastery has none")]
    MissingRoom { event: String, room: RoomKind },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] AbbeyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
