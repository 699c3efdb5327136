//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `AbbeyError` as one
//! variant via `#[from]` where they need to surface core failures.

use thiserror::Error;

use crate::{AgentId, Point};

/// The top-level error type for `abbey-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AbbeyError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("point {0} is outside the map")]
    OutOfBounds(Point),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `abbey-*` crates.
pub type AbbeyResult<T> = Result<T, AbbeyError>;
