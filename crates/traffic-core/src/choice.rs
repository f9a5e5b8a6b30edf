//! Recorded traversal decisions.

use crate::Tick;

/// One traversal decision made by an agent: at `timestamp` it entered an
/// edge of kind `edge_kind` leading to node `to`, which took `travel_time`
/// ticks.
///
/// A `Vec<Choice>` is an agent's full route history and is what the output
/// writers serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub to:          String,
    pub edge_kind:   String,
    pub timestamp:   Tick,
    pub travel_time: u32,
}

impl Choice {
    /// Tick at which the traversal completes.
    #[inline]
    pub fn end(&self) -> Tick {
        self.timestamp.offset(self.travel_time as u64)
    }
}
