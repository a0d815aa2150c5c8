pub mod cdf;
pub mod error;
pub mod parse;
pub mod report;
pub mod stats;
pub mod throughput;

pub use error::{AnalysisError, Result};
pub use report::{AlgorithmReport, BenchmarkReport};
pub use stats::SeriesSummary;
pub use throughput::ThroughputAggregator;
