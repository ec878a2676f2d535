//! `TraceObserver<W>` — bridges `SimObserver` to a `TraceWriter`.

use cafe_agent::AgentSnapshot;
use cafe_core::{SimConfig, Tick};
use cafe_sim::SimObserver;

use crate::row::{RobotSnapshotRow, TickSummaryRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes robot snapshots and tick summaries to any
/// [`TraceWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    tick_ms:    u32,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Create an observer backed by `writer`, using `config` for elapsed-time
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, tick_ms: config.tick_ms, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, delivered: usize) {
        let row = TickSummaryRow {
            tick:               tick.0,
            elapsed_ms:         tick.0 * u64::from(self.tick_ms),
            messages_delivered: delivered as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[AgentSnapshot]) {
        if robots.is_empty() {
            return;
        }
        let rows: Vec<RobotSnapshotRow> = robots.iter().map(|s| RobotSnapshotRow::from_snapshot(tick, s)).collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
