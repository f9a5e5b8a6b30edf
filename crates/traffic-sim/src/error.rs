use thiserror::Error;
use traffic_graph::GraphError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("agent {0:?} has no path yet; refresh paths before moving agents")]
    MissingSearch(String),

    #[error("agent {0:?} is already registered")]
    DuplicateAgent(String),

    #[error("simulation did not finish within {0} ticks")]
    TickLimit(u64),

    #[error("could not build the path-refresh pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
