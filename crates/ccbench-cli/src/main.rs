mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ccbench_abstract::{AlgorithmSet, BenchConfig, BenchOverride, ThroughputConfig};
use ccbench_analysis::BenchmarkReport;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plot RTT, throughput and queue charts for the Timely / Hope benchmark"
)]
struct Args {
    /// Directory holding the simulator logs. Charts are written next to them.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of client (sender) nodes in the topology.
    #[arg(long)]
    clients: u32,

    #[arg(long, default_value_t = 0)]
    leafs: u32,
    #[arg(long, default_value_t = 1)]
    spines: u32,

    /// Throughput window width in seconds.
    #[arg(long, default_value_t = 0.001)]
    granularity: f64,

    /// File stem of the Timely run.
    #[arg(long, default_value = "timely")]
    timely: String,
    #[arg(long, default_value = "hope_max")]
    hope_max: String,
    #[arg(long, default_value = "hope_sum")]
    hope_sum: String,

    /// TOML file whose fields override the command line.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not read or plot `<algo>.queue.out`.
    #[arg(long, default_value_t = false)]
    skip_queue: bool,

    /// Write a JSON summary of the run.
    #[arg(long)]
    report_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    info!("ccbench starting…");

    let mut config = args.bench_config();
    if let Some(path) = &args.config {
        load_override(path)?.apply_to(&mut config);
    }

    let report = runner::run_benchmark(&config)?;
    log_summary(&report);

    if let Some(path) = &args.report_out {
        write_report(path, &report)?;
    }
    Ok(())
}

impl Args {
    fn bench_config(&self) -> BenchConfig {
        let throughput = ThroughputConfig {
            granularity: self.granularity,
            num_clients: self.clients,
            num_leafs: self.leafs,
            num_spines: self.spines,
            ..Default::default()
        };
        BenchConfig {
            out_dir: self.out_dir.clone(),
            throughput,
            algorithms: AlgorithmSet {
                timely: self.timely.clone(),
                hope_max: self.hope_max.clone(),
                hope_sum: self.hope_sum.clone(),
            },
            plot_queue: !self.skip_queue,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_override(path: &Path) -> Result<BenchOverride> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let over: BenchOverride = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(over)
}

fn log_summary(report: &BenchmarkReport) {
    for algo in &report.algorithms {
        let thp = algo
            .total_throughput
            .map(|s| format!("{:.2}", s.mean))
            .unwrap_or_else(|| "-".to_string());
        info!(
            "{} ({}): {} RTT samples, median RTT {:.1} us, p99 {:.1} us | {} windows, mean total {} Mbps",
            algo.label, algo.name, algo.rtt.count, algo.rtt.p50, algo.rtt.p99, algo.windows, thp
        );
    }
    info!("Wrote {} charts", report.all_charts().count());
}

fn write_report(path: &Path, report: &BenchmarkReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize benchmark report")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_maps_onto_config() {
        let args = Args::try_parse_from([
            "ccbench",
            "--out-dir",
            "/tmp/run",
            "--clients",
            "4",
            "--leafs",
            "2",
            "--hope-sum",
            "hope_sum_v2",
            "--skip-queue",
        ])
        .unwrap();
        let config = args.bench_config();
        assert_eq!(config.out_dir, PathBuf::from("/tmp/run"));
        assert_eq!(config.throughput.num_clients, 4);
        assert_eq!(config.throughput.num_leafs, 2);
        assert_eq!(config.throughput.num_spines, 1);
        assert_eq!(config.throughput.granularity, 0.001);
        assert_eq!(config.algorithms.timely, "timely");
        assert_eq!(config.algorithms.hope_sum, "hope_sum_v2");
        assert!(!config.plot_queue);
    }

    #[test]
    fn clients_are_required() {
        assert!(Args::try_parse_from(["ccbench", "--out-dir", "/tmp/run"]).is_err());
    }

    #[test]
    fn config_file_overrides_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        fs::write(&path, "[throughput]\ngranularity = 0.01\n").unwrap();

        let args =
            Args::try_parse_from(["ccbench", "--out-dir", "/tmp/run", "--clients", "2"]).unwrap();
        let mut config = args.bench_config();
        load_override(&path).unwrap().apply_to(&mut config);
        assert_eq!(config.throughput.granularity, 0.01);
        assert_eq!(config.throughput.num_clients, 2);
    }

    #[test]
    fn malformed_config_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "throughput = 3\n").unwrap();
        let err = load_override(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
