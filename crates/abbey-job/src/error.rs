//! Job-subsystem error types.

use thiserror::Error;

use abbey_core::{JobId, Point, PropKind};

use crate::JobState;

/// Errors produced by job construction and lifecycle calls.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("job {name:?} has no candidate locations")]
    InvalidJob { name: String },

    #[error("{id} is {state:?}; only pending jobs may enter the pool")]
    NotPending { id: JobId, state: JobState },

    #[error("{id} already finished ({state:?})")]
    Finished { id: JobId, state: JobState },
}

/// Why a single hook action could not be carried out.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0} is outside the map")]
    OutOfBounds(Point),

    #[error("no {prop} at {at}")]
    MissingProp { prop: PropKind, at: Point },

    #[error("could not enqueue follow-up job: {0}")]
    Enqueue(#[from] JobError),

    #[error("{0}")]
    Rejected(String),
}

pub type JobResult<T> = Result<T, JobError>;
