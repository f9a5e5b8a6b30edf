//! `traffic-output`: history writers for the traffic simulation.
//!
//! | Writer             | Files created                    |
//! |--------------------|----------------------------------|
//! | [`JsonLinesWriter`] | any `Write` sink, one record per line |
//! | [`CsvWriter`]       | `choices.csv`, `averages.csv`    |
//!
//! Both implement [`HistoryWriter`] and consume the
//! [`GroupReport`](traffic_sim::GroupReport)s produced after a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use traffic_output::{write_simulation, CsvWriter};
//!
//! sim.simulate()?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! write_simulation(&sim, &mut writer)?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonLinesWriter;
pub use row::Record;
pub use writer::{write_simulation, HistoryWriter};
