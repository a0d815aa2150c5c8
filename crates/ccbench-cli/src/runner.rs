use anyhow::{Result, ensure};
use ccbench_abstract::{BenchConfig, CdfSeries, ThroughputSeries};
use ccbench_analysis::{AlgorithmReport, BenchmarkReport, SeriesSummary};
use ccbench_plot::{plot_all_rtt_cdf, plot_all_total_thp, plot_queue, plot_rtt, plot_throughput};
use tracing::info;

struct AlgorithmRun {
    report: AlgorithmReport,
    cdf: CdfSeries,
    throughput: ThroughputSeries,
}

fn run_algorithm(config: &BenchConfig, label: &str, name: &str) -> Result<AlgorithmRun> {
    let out_dir = config.out_dir.as_path();
    info!("Processing {label} run '{name}'");

    let rtt = plot_rtt(name, out_dir)?;
    let thp = plot_throughput(name, out_dir, &config.throughput)?;
    let (cdf, throughput) = (rtt.series, thp.series);
    let mut charts = rtt.charts;
    charts.extend(thp.charts);

    let queue_packets = if config.plot_queue {
        let queue = plot_queue(name, out_dir)?;
        charts.extend(queue.charts);
        SeriesSummary::from_values(&queue.series.values())
    } else {
        None
    };

    let report = AlgorithmReport {
        label: label.to_string(),
        name: name.to_string(),
        rtt: SeriesSummary::from_sorted(&cdf.values),
        total_throughput: SeriesSummary::from_values(&throughput.total),
        windows: throughput.len(),
        queue_packets,
        charts,
    };
    Ok(AlgorithmRun {
        report,
        cdf,
        throughput,
    })
}

/// Plot every run of the benchmark, then overlay the three algorithms.
pub fn run_benchmark(config: &BenchConfig) -> Result<BenchmarkReport> {
    ensure!(
        config.out_dir.is_dir(),
        "Output directory {} does not exist",
        config.out_dir.display()
    );

    let mut report = BenchmarkReport::new(config.clone());
    let mut runs = Vec::with_capacity(3);
    for (label, name) in config.algorithms.labelled() {
        runs.push(run_algorithm(config, label, name)?);
    }

    let out_dir = config.out_dir.as_path();
    let [timely, hope_max, hope_sum] = [&runs[0], &runs[1], &runs[2]];
    report.charts.push(plot_all_rtt_cdf(
        out_dir,
        &timely.cdf,
        &hope_max.cdf,
        &hope_sum.cdf,
    )?);
    report.charts.push(plot_all_total_thp(
        out_dir,
        &timely.throughput,
        &hope_max.throughput,
        &hope_sum.throughput,
    )?);

    report.algorithms = runs.into_iter().map(|run| run.report).collect();
    Ok(report)
}
