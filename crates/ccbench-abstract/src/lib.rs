pub mod config;
pub mod record;
pub mod scenario;
pub mod series;

pub use record::{NodeId, QueueSample, TraceEvent, TraceRecord};
pub use series::{CdfSeries, SampleSeries, ThroughputSeries};

pub use config::{AlgorithmSet, BENCHMARK_LABELS, BenchConfig, ThroughputConfig};
pub use scenario::{AlgorithmOverride, BenchOverride, ThroughputOverride};
