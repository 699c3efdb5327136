//! `SimOutputObserver<W>` - bridges `SimObserver` to an `OutputWriter`.

use abbey_agent::AgentStore;
use abbey_ai::Mind;
use abbey_core::{SimClock, SimConfig, Tick, TimeOfDay};
use abbey_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes brother snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    start_time: TimeOfDay,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_time: config.start_time,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn clock_at(&self, tick: Tick) -> SimClock {
        SimClock { start_time: self.start_time, current_tick: tick }
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let clock = self.clock_at(summary.tick);
        let row = TickSummaryRow {
            tick:              summary.tick.0,
            day:               clock.day(),
            time_of_day:       clock.time_of_day().to_string(),
            moved:             summary.moved as u64,
            rejected_moves:    summary.rejected_moves as u64,
            working:           summary.working as u64,
            idle:              summary.idle as u64,
            obligations_fired: summary.obligations_fired as u64,
            actions:           summary.actions as u64,
            pool_len:          summary.pool_len as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, minds: &[Mind]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .zip(minds)
            .map(|(agent, mind)| {
                let i = agent.index();
                let job = mind.current_job();
                AgentSnapshotRow {
                    agent_id: agent.0,
                    tick:     tick.0,
                    x:        agents.position[i].x,
                    y:        agents.position[i].y,
                    job:      job.map(|j| j.name().to_owned()).unwrap_or_default(),
                    progress: job.and_then(|j| j.progress()),
                    phase:    mind.phase.as_str(),
                    hunger:   agents.needs[i].hunger,
                    energy:   agents.needs[i].energy,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
