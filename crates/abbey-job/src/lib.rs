//! `abbey-job` - units of work and the pool they wait in.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`rule`]    | `CompletionRule`, `WorkerView`, `Progress`                       |
//! | [`action`]  | `Action`, `HookKind`, `JobHooks`, `IntoActions`, `HookRunner`    |
//! | [`job`]     | `Job`, `JobState`, `JobSpec`, `JobBuilder`, `JobIdGen`           |
//! | [`recipes`] | Ready-made construction and farming job specs                   |
//! | [`pool`]    | `JobPool` (FIFO), `SharedJobPool` (mutex-guarded handle)        |
//! | [`error`]   | `JobError`, `ActionError`, `JobResult<T>`                       |
//!
//! # Ownership
//!
//! A `Job` is a plain value.  It lives in exactly one place at a time (the
//! pool, a brother's obligation queue, or a brother's job slot) and moves
//! between them by value.  State transitions therefore never race.
//!
//! Jobs never touch the world directly.  Hooks are lists of [`Action`]s that
//! the job hands, in order, to a caller-supplied [`HookRunner`].

pub mod action;
pub mod error;
pub mod job;
pub mod pool;
pub mod recipes;
pub mod rule;


pub use action::{Action, HookFailure, HookKind, HookRunner, IntoActions, JobHooks};
pub use error::{ActionError, JobError, JobResult};
pub use job::{Job, JobBuilder, JobIdGen, JobSpec, JobState};
pub use pool::{JobPool, SharedJobPool};
pub use rule::{CompletionRule, Progress, WorkerView};
