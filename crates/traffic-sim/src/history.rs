//! Travel-history reductions.
//!
//! Everything here is computed from the `Choice` histories kept on each
//! [`MetaAgent`]; nothing is accumulated while the simulation runs.

use std::collections::{BTreeMap, BTreeSet};

use traffic_core::{Choice, Tick};

use crate::MetaAgent;

// ── AgentRecord ───────────────────────────────────────────────────────────────

/// One agent's full route history with its departure and arrival ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub agent:      String,
    pub group:      String,
    pub history:    Vec<Choice>,
    /// Tick of the first traversal.
    pub start_time: Tick,
    /// Tick at which the last traversal completes.
    pub end_time:   Tick,
    pub delta_time: u64,
}

impl AgentRecord {
    /// Snapshot `meta`'s history.
    ///
    /// An agent that never moved (start equals destination) has all three
    /// times at zero.
    pub fn from_meta(meta: &MetaAgent) -> Self {
        let agent = meta.agent();
        let history = meta.history().to_vec();
        let (start_time, end_time) = match (history.first(), history.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.end()),
            _                         => (Tick::ZERO, Tick::ZERO),
        };
        Self {
            agent: agent.id().to_owned(),
            group: agent.group().to_owned(),
            history,
            start_time,
            end_time,
            delta_time: end_time.since(start_time),
        }
    }
}

// ── AverageData ───────────────────────────────────────────────────────────────

/// Aggregate travel counters and their average.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AverageData {
    /// Agents contributing to this aggregate.
    pub agent_count:               u64,
    /// Edge traversals contributing to this aggregate.
    pub traversal_count:           u64,
    pub minutes_traveled:          u64,
    /// `minutes_traveled / agent_count`; `0.0` when there are no agents.
    pub average_delta_travel_time: f64,
}

impl AverageData {
    /// Recompute [`average_delta_travel_time`](Self::average_delta_travel_time)
    /// from the counters.
    pub fn update_average(&mut self) {
        self.average_delta_travel_time = if self.agent_count == 0 {
            0.0
        } else {
            self.minutes_traveled as f64 / self.agent_count as f64
        };
    }
}

// ── GroupReport ───────────────────────────────────────────────────────────────

/// Histories and aggregates for every agent sharing a group tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupReport {
    pub group:        String,
    pub agents:       Vec<AgentRecord>,
    /// Per edge kind: agents that used the kind at least once, traversals of
    /// that kind, and the travel time spent on it.
    pub by_edge_kind: BTreeMap<String, AverageData>,
    /// Across all kinds: every agent, every traversal, and the sum of each
    /// agent's end-to-end travel time.
    pub overall:      AverageData,
}

impl GroupReport {
    pub fn from_records(group: &str, agents: Vec<AgentRecord>) -> Self {
        let mut by_edge_kind: BTreeMap<String, AverageData> = BTreeMap::new();
        let mut overall = AverageData {
            agent_count: agents.len() as u64,
            ..AverageData::default()
        };

        for record in &agents {
            overall.minutes_traveled += record.delta_time;
            overall.traversal_count  += record.history.len() as u64;

            let mut kinds_seen: BTreeSet<&str> = BTreeSet::new();
            for choice in &record.history {
                let data = by_edge_kind.entry(choice.edge_kind.clone()).or_default();
                if kinds_seen.insert(&choice.edge_kind) {
                    data.agent_count += 1;
                }
                data.traversal_count  += 1;
                data.minutes_traveled += choice.travel_time as u64;
            }
        }

        overall.update_average();
        for data in by_edge_kind.values_mut() {
            data.update_average();
        }

        Self { group: group.to_owned(), agents, by_edge_kind, overall }
    }
}
