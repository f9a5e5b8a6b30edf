//! Simulation configuration.

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and passed to `Simulation::new`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Ticks a computed path stays valid.  Once an agent's path is this old
    /// it is recomputed against the current congestion.  `0` recomputes every
    /// tick.  Default: 15.
    pub path_timeout_ticks: u64,

    /// Worker thread count for the path-refresh pool.  `None` uses all
    /// logical cores.
    pub num_threads: Option<usize>,

    /// Upper bound on the number of ticks `simulate` may run.  `None` runs
    /// until every agent has arrived.
    pub max_ticks: Option<u64>,
}

impl SimConfig {
    pub const DEFAULT_PATH_TIMEOUT_TICKS: u64 = 15;

    /// Builder-style override of [`path_timeout_ticks`](Self::path_timeout_ticks).
    pub fn with_path_timeout(mut self, ticks: u64) -> Self {
        self.path_timeout_ticks = ticks;
        self
    }

    /// Builder-style override of [`num_threads`](Self::num_threads).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder-style override of [`max_ticks`](Self::max_ticks).
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            path_timeout_ticks: Self::DEFAULT_PATH_TIMEOUT_TICKS,
            num_threads:        None,
            max_ticks:          None,
        }
    }
}
