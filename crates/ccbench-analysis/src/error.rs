use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input")]
    Read(#[from] io::Error),

    /// A CDF needs at least two samples to assign rank fractions.
    #[error("series of {len} samples is too short for a CDF (need at least 2)")]
    DegenerateSeries { len: usize },

    #[error("no trace lines matched event `{marker}` with packet type `{protocol}`")]
    EmptyTrace {
        marker: &'static str,
        protocol: String,
    },

    #[error("trace references node {node}, but the node table only holds {nodes} nodes")]
    UnknownNode { node: u32, nodes: u32 },

    #[error(
        "node table of {clients} clients, {leafs} leafs and {spines} spines is too large"
    )]
    NodeTableTooLarge { clients: u32, leafs: u32, spines: u32 },

    #[error("window granularity must be positive and finite, got {0}")]
    InvalidGranularity(f64),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
