//! Charts of a single experiment run.

use crate::chart::{self, ChartSpec, Series};
use crate::files;
use anyhow::{Context, Result};
use ccbench_abstract::{CdfSeries, SampleSeries, ThroughputConfig, ThroughputSeries};
use ccbench_analysis::{cdf, parse, throughput};
use plotters::prelude::SeriesLabelPosition;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A derived series and the charts that were written from it.
#[derive(Debug, Clone)]
pub struct Plotted<T> {
    pub series: T,
    pub charts: Vec<PathBuf>,
}

fn save(path: PathBuf, spec: &ChartSpec, series: &[Series]) -> Result<PathBuf> {
    chart::render(&path, spec, series)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    info!("Saved plot: {}", path.display());
    Ok(path)
}

/// Scatter of RTT over time plus the empirical CDF of RTT.
///
/// Reads `<algo>.rtt.out`, writes `<algo>.rtt.png` and `<algo>.rttCDF.png`,
/// and returns the CDF for the cross-algorithm overlay.
pub fn plot_rtt(algo: &str, out_dir: &Path) -> Result<Plotted<CdfSeries>> {
    let input = files::rtt_input(out_dir, algo);
    let samples = parse::load_rtt_samples(&input)?;

    let spec = ChartSpec::new(
        format!("RTT for {algo} experiment"),
        "Time (sec)",
        "RTT (usec)",
    );
    let scatter = save(
        files::rtt_chart(out_dir, algo),
        &spec,
        &[Series::dots(algo, samples.samples.iter().copied())],
    )?;

    let cdf = cdf::build(&samples.values())
        .with_context(|| format!("Cannot build the RTT CDF of {}", input.display()))?;
    let spec = ChartSpec::new(
        format!("CDF of RTT for {algo} experiment"),
        "RTT (usec)",
        "CDF",
    );
    let cdf_chart = save(
        files::rtt_cdf_chart(out_dir, algo),
        &spec,
        &[Series::dots(algo, cdf.points())],
    )?;

    Ok(Plotted {
        series: cdf,
        charts: vec![scatter, cdf_chart],
    })
}

/// Per-client and total throughput over time.
///
/// Reads `<algo>.tr`, writes `<algo>.thp.png` with a log-scaled y axis, and
/// returns the series so the totals can be overlaid across algorithms.
pub fn plot_throughput(
    algo: &str,
    out_dir: &Path,
    config: &ThroughputConfig,
) -> Result<Plotted<ThroughputSeries>> {
    let input = files::trace_input(out_dir, algo);
    let series = throughput::load_throughput(&input, config)
        .with_context(|| format!("Cannot compute throughput from {}", input.display()))?;

    let mut lines: Vec<Series> = series
        .clients()
        .map(|(id, mbps)| {
            Series::line(
                format!("Client_{id}"),
                series.time.iter().copied().zip(mbps.iter().copied()),
            )
        })
        .collect();
    lines.push(Series::line("Total", series.total_points()));

    let spec = ChartSpec::new(
        format!("Throughput for {algo} experiment"),
        "Time (sec)",
        "Throughput (Mbps)",
    )
    .log_y()
    .legend(SeriesLabelPosition::UpperRight);
    let chart = save(files::throughput_chart(out_dir, algo), &spec, &lines)?;

    Ok(Plotted {
        series,
        charts: vec![chart],
    })
}

/// Queue occupancy in packets over time.
///
/// Reads `<algo>.queue.out` and writes `<algo>.queue.png` with a log-scaled
/// y axis.
pub fn plot_queue(algo: &str, out_dir: &Path) -> Result<Plotted<SampleSeries>> {
    let input = files::queue_input(out_dir, algo);
    let samples = parse::load_queue_samples(&input)?;
    if samples.is_empty() {
        warn!("No queue samples in {}", input.display());
    }
    let occupancy = parse::queue_occupancy(&samples);

    let spec = ChartSpec::new(
        format!("Queue size for {algo} experiment"),
        "Time (sec)",
        "Queue (packets)",
    )
    .log_y();
    let chart = save(
        files::queue_chart(out_dir, algo),
        &spec,
        &[Series::line(
            "Queue in packets",
            occupancy.samples.iter().copied(),
        )],
    )?;

    Ok(Plotted {
        series: occupancy,
        charts: vec![chart],
    })
}
