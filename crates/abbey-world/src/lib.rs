//! `abbey-world` - the monastery grounds and how to cross them.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`map`]     | `TileMap` (walkability, base cost, props)                  |
//! | [`ascii`]   | `parse_ascii_map` - text layout to map + rooms             |
//! | [`room`]    | `Room`, `RoomRegistry`                                      |
//! | [`cost`]    | `CostGrid` - per-tick movement costs                        |
//! | [`path`]    | `Pathfinder` trait, `Path`, `DijkstraPathfinder`           |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Rebuilds the cost grid row-parallel on Rayon.               |
//! | `fx-hash`  | FxHash for the per-tile prop index.                         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Room`.                |

pub mod ascii;
pub mod cost;
pub mod error;
pub mod map;
pub mod path;
pub mod room;

#[cfg(test)]
mod tests;

pub use ascii::parse_ascii_map;
pub use cost::{AGENT_PENALTY, CostGrid, PROP_PENALTY};
pub use error::{WorldError, WorldResult};
pub use map::TileMap;
pub use path::{DijkstraPathfinder, Path, Pathfinder};
pub use room::{Room, RoomRegistry};
