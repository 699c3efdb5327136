//! `abbey-agent` - Structure-of-Arrays storage for the brothers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`needs`]       | `Needs`, `Need` - hunger and energy bookkeeping            |
//! | [`names`]       | Brother name table and random name picker                 |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Needs` and `Need`.   |

pub mod builder;
pub mod names;
pub mod needs;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use names::{BROTHER_NAMES, brother_name};
pub use needs::{Need, Needs};
pub use store::{AgentRngs, AgentStore};
