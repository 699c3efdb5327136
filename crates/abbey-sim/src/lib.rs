//! `abbey-sim` - tick loop orchestrator for the abbey simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Needs      - every brother gets hungrier and more tired.
//!   ② Cost grid  - rebuilt from the map and brother positions.
//!   ③ Schedules  - due events become jobs on each brother's obligation
//!                  queue (a queued job of the same name is cancelled).
//!      Calendar   - world events put chores on the shared pool.
//!   ④ Decisions  - DecisionModel::decide for each brother in ascending
//!                  AgentId order; job hooks mutate the world immediately.
//!   ⑤ Apply      - Step(p) → move if the tile can be entered
//!                  Work{..}  → restore the need the job replenishes
//!   ⑥ Clock      - advance one minute.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Rebuilds the cost grid row-parallel on Rayon.          |
//! | `fx-hash`  | FxHash for the map's prop index.                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abbey_agent::AgentStoreBuilder;
//! use abbey_ai::BrotherAi;
//! use abbey_core::SimConfig;
//! use abbey_sim::{NoopObserver, SimBuilder};
//! use abbey_world::{DijkstraPathfinder, parse_ascii_map};
//!
//! let (map, rooms) = parse_ascii_map(MAP)?;
//! let (store, rngs) = AgentStoreBuilder::new(config.seed).random_brothers(5, &mut rng).build();
//! let mut sim = SimBuilder::new(config, store, rngs, map, rooms, BrotherAi, DijkstraPathfinder)
//!     .horarium()
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod calendar;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use calendar::{
    CHORE_JOB, DueWorldEvent, FixedChores, ScatteredChores, WorldCalendar, WorldEvent,
    WorldEventContext, WorldEventFactory,
};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
pub use world::WorldState;
