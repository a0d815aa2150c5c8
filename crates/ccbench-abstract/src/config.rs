use crate::record::TraceEvent;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of the windowed throughput aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThroughputConfig {
    /// Window width in seconds.
    pub granularity: f64,
    pub num_clients: u32,
    pub num_leafs: u32,
    pub num_spines: u32,
    /// Trace event that counts as "on the wire" for throughput purposes.
    pub event: TraceEvent,
    /// Packet type tag (field 4 of a trace line) to keep.
    pub protocol: String,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            granularity: 0.001,
            num_clients: 1,
            num_leafs: 0,
            num_spines: 1,
            event: TraceEvent::Dequeue,
            protocol: "tcp".to_string(),
        }
    }
}

impl ThroughputConfig {
    pub fn with_clients(num_clients: u32) -> Self {
        Self {
            num_clients,
            ..Default::default()
        }
    }

    /// Clients, leafs, spines and the sink; `None` if the count overflows.
    pub fn num_nodes(&self) -> Option<u32> {
        self.num_clients
            .checked_add(self.num_leafs)?
            .checked_add(self.num_spines)?
            .checked_add(1)
    }
}

/// Legend labels of the benchmarked algorithms, in plotting order.
pub const BENCHMARK_LABELS: [&str; 3] = ["Timely", "Hope-Max", "Hope-Sum"];

/// File stems of the three benchmarked runs inside the output directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlgorithmSet {
    pub timely: String,
    pub hope_max: String,
    pub hope_sum: String,
}

impl Default for AlgorithmSet {
    fn default() -> Self {
        Self {
            timely: "timely".to_string(),
            hope_max: "hope_max".to_string(),
            hope_sum: "hope_sum".to_string(),
        }
    }
}

impl AlgorithmSet {
    /// `(legend label, file stem)` in benchmark order.
    pub fn labelled(&self) -> [(&'static str, &str); 3] {
        let [timely, hope_max, hope_sum] = BENCHMARK_LABELS;
        [
            (timely, self.timely.as_str()),
            (hope_max, self.hope_max.as_str()),
            (hope_sum, self.hope_sum.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    pub out_dir: PathBuf,
    pub throughput: ThroughputConfig,
    pub algorithms: AlgorithmSet,
    pub plot_queue: bool,
}

impl BenchConfig {
    pub fn new(out_dir: impl Into<PathBuf>, throughput: ThroughputConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            throughput,
            algorithms: AlgorithmSet::default(),
            plot_queue: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_table_counts_sink() {
        let config = ThroughputConfig {
            num_clients: 4,
            num_leafs: 2,
            num_spines: 1,
            ..Default::default()
        };
        assert_eq!(config.num_nodes(), Some(8));
    }

    #[test]
    fn oversized_node_table_does_not_wrap() {
        let config = ThroughputConfig {
            num_clients: u32::MAX,
            num_spines: 0,
            ..Default::default()
        };
        assert_eq!(config.num_nodes(), None);
    }

    #[test]
    fn labels_follow_benchmark_order() {
        let set = AlgorithmSet::default();
        let labels: Vec<&str> = set.labelled().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Timely", "Hope-Max", "Hope-Sum"]);
    }
}
