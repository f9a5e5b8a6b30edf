//! The `HistoryWriter` trait implemented by all backend writers.

use traffic_sim::{GroupReport, Simulation};

use crate::OutputResult;

/// Trait implemented by the JSON-lines and CSV writers.
pub trait HistoryWriter {
    /// Write one group's agent histories and aggregates.
    fn write_report(&mut self, report: &GroupReport) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every report in order.
    fn write_reports(&mut self, reports: &[GroupReport]) -> OutputResult<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }
}

/// Write the report of every group in `sim` and finish the writer.
pub fn write_simulation<W: HistoryWriter>(sim: &Simulation, writer: &mut W) -> OutputResult<()> {
    writer.write_reports(&sim.reports())?;
    writer.finish()
}
