pub mod benchmark;
pub mod chart;
pub mod experiment;
pub mod files;

pub use benchmark::{overlay_cdfs, overlay_throughputs, plot_all_rtt_cdf, plot_all_total_thp};
pub use experiment::{Plotted, plot_queue, plot_rtt, plot_throughput};
