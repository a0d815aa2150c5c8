use crate::config::{AlgorithmSet, BenchConfig, ThroughputConfig};
use crate::record::TraceEvent;
use serde::Deserialize;
use std::path::PathBuf;

/// Partial benchmark description loaded from a TOML file. Every field is
/// optional and only the present ones replace the base configuration.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BenchOverride {
    pub out_dir: Option<PathBuf>,
    pub plot_queue: Option<bool>,
    #[serde(default)]
    pub throughput: ThroughputOverride,
    #[serde(default)]
    pub algorithms: AlgorithmOverride,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ThroughputOverride {
    pub granularity: Option<f64>,
    pub num_clients: Option<u32>,
    pub num_leafs: Option<u32>,
    pub num_spines: Option<u32>,
    pub event: Option<TraceEvent>,
    pub protocol: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AlgorithmOverride {
    pub timely: Option<String>,
    pub hope_max: Option<String>,
    pub hope_sum: Option<String>,
}

impl BenchOverride {
    pub fn apply_to(&self, config: &mut BenchConfig) {
        if let Some(v) = &self.out_dir {
            config.out_dir = v.clone();
        }
        if let Some(v) = self.plot_queue {
            config.plot_queue = v;
        }
        self.throughput.apply_to(&mut config.throughput);
        self.algorithms.apply_to(&mut config.algorithms);
    }
}

impl ThroughputOverride {
    pub fn apply_to(&self, config: &mut ThroughputConfig) {
        if let Some(v) = self.granularity {
            config.granularity = v;
        }
        if let Some(v) = self.num_clients {
            config.num_clients = v;
        }
        if let Some(v) = self.num_leafs {
            config.num_leafs = v;
        }
        if let Some(v) = self.num_spines {
            config.num_spines = v;
        }
        if let Some(v) = self.event {
            config.event = v;
        }
        if let Some(v) = &self.protocol {
            config.protocol = v.clone();
        }
    }
}

impl AlgorithmOverride {
    pub fn apply_to(&self, set: &mut AlgorithmSet) {
        if let Some(v) = &self.timely {
            set.timely = v.clone();
        }
        if let Some(v) = &self.hope_max {
            set.hope_max = v.clone();
        }
        if let Some(v) = &self.hope_sum {
            set.hope_sum = v.clone();
        }
    }
}
