//! Simulation observer trait for progress reporting and data collection.

use abbey_agent::AgentStore;
use abbey_ai::Mind;
use abbey_core::{JobId, Tick};
use abbey_job::{Action, HookKind};

/// What happened during one tick, handed to
/// [`SimObserver::on_tick_end`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:              Tick,
    /// Brothers that stepped onto a new tile.
    pub moved:             usize,
    /// Steps refused because the tile could not be entered.
    pub rejected_moves:    usize,
    /// Brothers that worked a job in place.
    pub working:           usize,
    /// Brothers holding no job at the end of the tick.
    pub idle:              usize,
    /// Schedule events that produced an obligation.
    pub obligations_fired: usize,
    /// Jobs the world calendar added to the pool.
    pub world_jobs:        usize,
    /// Hook actions performed successfully.
    pub actions:           usize,
    /// Jobs left in the shared pool.
    pub pool_len:          usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example - progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} working, {} idle", summary.tick, summary.working, summary.idle);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per hook action performed during the tick, in the order
    /// the actions ran.
    fn on_action(&mut self, _tick: Tick, _job: JobId, _hook: HookKind, _action: &Action) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to every brother's state and decision state
    /// so output writers can record a snapshot without the sim knowing about
    /// any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _minds: &[Mind]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
