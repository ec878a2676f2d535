//! The `TraceWriter` trait implemented by trace backends.

use crate::{OutputResult, RobotSnapshotRow, TickSummaryRow};

/// Sink for a run trace.
///
/// Errors are stored by the observer and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write a batch of robot snapshots.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
