//! Record shapes written by output backends.

use serde::Serialize;

use traffic_sim::{AgentRecord, AverageData};

/// One line of the JSON-lines stream.
///
/// The `record` field names the variant so a reader can dispatch on it:
///
/// ```text
/// {"record":"agent","agent":"car-0","group":"car","history":[...],...}
/// {"record":"edge_kind","group":"car","edge_kind":"Road","agent_count":3,...}
/// {"record":"overall","group":"car","agent_count":3,...}
/// ```
#[derive(Debug, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record<'a> {
    Agent(&'a AgentRecord),
    EdgeKind {
        group:     &'a str,
        edge_kind: &'a str,
        #[serde(flatten)]
        data:      &'a AverageData,
    },
    Overall {
        group: &'a str,
        #[serde(flatten)]
        data:  &'a AverageData,
    },
}

/// Column headers of `choices.csv`.
pub const CHOICE_HEADERS: [&str; 6] = ["group", "agent", "to", "edge_kind", "timestamp", "travel_time"];

/// Column headers of `averages.csv`.  `edge_kind` is empty on overall rows.
pub const AVERAGE_HEADERS: [&str; 7] = [
    "group",
    "scope",
    "edge_kind",
    "agent_count",
    "traversal_count",
    "minutes_traveled",
    "average_delta_travel_time",
];
