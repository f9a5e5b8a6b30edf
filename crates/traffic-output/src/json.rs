//! JSON-lines output backend.
//!
//! Each [`GroupReport`] becomes one `agent` line per agent, one `edge_kind`
//! line per edge kind, and a closing `overall` line.  See [`Record`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use traffic_sim::GroupReport;

use crate::row::Record;
use crate::writer::HistoryWriter;
use crate::OutputResult;

/// Streams history records as newline-delimited JSON.
pub struct JsonLinesWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, record: &Record<'_>) -> OutputResult<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> HistoryWriter for JsonLinesWriter<W> {
    fn write_report(&mut self, report: &GroupReport) -> OutputResult<()> {
        for agent in &report.agents {
            self.line(&Record::Agent(agent))?;
        }
        for (edge_kind, data) in &report.by_edge_kind {
            self.line(&Record::EdgeKind { group: &report.group, edge_kind, data })?;
        }
        self.line(&Record::Overall { group: &report.group, data: &report.overall })
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
