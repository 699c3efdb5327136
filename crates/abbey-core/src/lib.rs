//! `abbey-core` - foundational types for the abbey monastery simulation.
//!
//! This crate is a dependency of every other `abbey-*` crate.  It has no
//! `abbey-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `JobId`, `RoomId`                          |
//! | [`grid`]        | `Point`, Chebyshev distance, 8-neighbourhood          |
//! | [`time`]        | `Tick`, `TimeOfDay`, `SimClock`                       |
//! | [`config`]      | `SimConfig`                                           |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`prop`]        | `PropKind`, `RoomKind`                                |
//! | [`error`]       | `AbbeyError`, `AbbeyResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod prop;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{AbbeyError, AbbeyResult};
pub use grid::Point;
pub use ids::{AgentId, JobId, RoomId};
pub use prop::{PropKind, RoomKind};
pub use rng::{AgentRng, SimRng};
pub use time::{MINUTES_PER_DAY, SimClock, Tick, TimeOfDay};
