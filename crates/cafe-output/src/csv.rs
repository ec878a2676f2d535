//! CSV trace backend.
//!
//! Creates two files in the output directory:
//! - `robot_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use ::csv::Writer;
use tracing::debug;

use crate::writer::TraceWriter;
use crate::{OutputResult, RobotSnapshotRow, TickSummaryRow};

pub const SNAPSHOT_FILE: &str = "robot_snapshots.csv";
pub const SUMMARY_FILE:  &str = "tick_summaries.csv";

/// Writes a run trace to two CSV files.
pub struct CsvTraceWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["tick", "agent_id", "role", "mode", "phase", "x", "z", "heading_deg", "balance"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "elapsed_ms", "messages_delivered"])?;

        debug!(dir = %dir.display(), "trace files opened");
        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.role.to_owned(),
                row.mode.to_owned(),
                row.phase.to_owned(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.z),
                format!("{:.2}", row.heading_deg),
                row.balance.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.messages_delivered.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
