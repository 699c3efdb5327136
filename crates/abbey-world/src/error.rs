//! World-subsystem error type.

use thiserror::Error;

use abbey_core::{Point, PropKind, RoomKind};

/// Errors produced by `abbey-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("{0} is outside the map")]
    OutOfBounds(Point),

    #[error("no path from {from} to {to}")]
    NoPath { from: Point, to: Point },

    #[error("no {prop} at {at}")]
    MissingProp { prop: PropKind, at: Point },

    #[error("no {0} room in the registry")]
    MissingRoom(RoomKind),

    #[error("map row {row} has width {got}, expected {expected}")]
    RaggedMap { row: usize, expected: usize, got: usize },

    #[error("unknown map glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Point },

    #[error("map is empty")]
    EmptyMap,
}

pub type WorldResult<T> = Result<T, WorldError>;
