use crate::stats::SeriesSummary;
use ccbench_abstract::BenchConfig;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmReport {
    /// Legend label, e.g. `Hope-Max`.
    pub label: String,
    /// File stem of the run inside the output directory.
    pub name: String,
    pub rtt: SeriesSummary,
    pub total_throughput: Option<SeriesSummary>,
    pub windows: usize,
    pub queue_packets: Option<SeriesSummary>,
    pub charts: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub config: BenchConfig,
    pub algorithms: Vec<AlgorithmReport>,
    /// Cross-algorithm overlay charts.
    pub charts: Vec<PathBuf>,
}

impl BenchmarkReport {
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            algorithms: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Every chart written during the run, per-algorithm ones first.
    pub fn all_charts(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        self.algorithms
            .iter()
            .flat_map(|a| a.charts.iter())
            .chain(self.charts.iter())
    }
}
