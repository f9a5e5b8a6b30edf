//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `choices.csv`: one row per edge traversal
//! - `averages.csv`: one row per (group, edge kind) plus one overall row per group

use std::fs::File;
use std::path::Path;

use csv::Writer;

use traffic_sim::{AverageData, GroupReport};

use crate::row::{AVERAGE_HEADERS, CHOICE_HEADERS};
use crate::writer::HistoryWriter;
use crate::OutputResult;

/// Writes simulation history to two CSV files.
pub struct CsvWriter {
    choices:  Writer<File>,
    averages: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut choices = Writer::from_path(dir.join("choices.csv"))?;
        choices.write_record(CHOICE_HEADERS)?;

        let mut averages = Writer::from_path(dir.join("averages.csv"))?;
        averages.write_record(AVERAGE_HEADERS)?;

        Ok(Self { choices, averages, finished: false })
    }

    fn average_row(&mut self, group: &str, scope: &str, edge_kind: &str, data: &AverageData) -> OutputResult<()> {
        self.averages.write_record(&[
            group.to_owned(),
            scope.to_owned(),
            edge_kind.to_owned(),
            data.agent_count.to_string(),
            data.traversal_count.to_string(),
            data.minutes_traveled.to_string(),
            data.average_delta_travel_time.to_string(),
        ])?;
        Ok(())
    }
}

impl HistoryWriter for CsvWriter {
    fn write_report(&mut self, report: &GroupReport) -> OutputResult<()> {
        for agent in &report.agents {
            for choice in &agent.history {
                self.choices.write_record(&[
                    report.group.clone(),
                    agent.agent.clone(),
                    choice.to.clone(),
                    choice.edge_kind.clone(),
                    choice.timestamp.0.to_string(),
                    choice.travel_time.to_string(),
                ])?;
            }
        }
        for (edge_kind, data) in &report.by_edge_kind {
            self.average_row(&report.group, "edge_kind", edge_kind, data)?;
        }
        self.average_row(&report.group, "overall", "", &report.overall)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.choices.flush()?;
        self.averages.flush()?;
        Ok(())
    }
}
