//! `abbey-ai` - how a brother decides what to do each tick.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` (`Stay`, `Step`, `Work`)                               |
//! | [`mind`]    | `Mind` (two job slots), `HeldJob`, `Slot`, `DecisionPhase`      |
//! | [`context`] | `DecisionContext<'a>`, `Workplace` trait                        |
//! | [`model`]   | `DecisionModel` trait                                           |
//! | [`brother`] | `BrotherAi` - the default obligation-first decision loop        |
//! | [`noop`]    | `NoopAi` - stands still forever                                 |
//!
//! # Design notes
//!
//! Each brother's tick has two halves:
//!
//! 1. **Decide**: the model reads the world through `DecisionContext`, moves
//!    jobs between the brother's obligation queue, his `Mind`, and the pool,
//!    and works the current job.  Job hooks run synchronously through the
//!    `Workplace`, so a completed job's effects are visible to the next
//!    brother in the same tick.
//! 2. **Apply**: the simulation applies the returned [`Intent`] (one step of
//!    movement, or the need restoration of the work just done).

pub mod brother;
pub mod context;
pub mod intent;
pub mod mind;
pub mod model;
pub mod noop;


pub use brother::{BrotherAi, GATHER_JOB};
pub use context::{DecisionContext, Workplace};
pub use intent::Intent;
pub use mind::{DecisionPhase, HeldJob, Mind, Slot};
pub use model::DecisionModel;
pub use noop::NoopAi;
