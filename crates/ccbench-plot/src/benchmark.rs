//! Overlays of the three benchmarked algorithms on a single chart.

use crate::chart::{self, ChartSpec, Series};
use crate::files;
use anyhow::{Context, Result};
use ccbench_abstract::{BENCHMARK_LABELS, CdfSeries, ThroughputSeries};
use plotters::prelude::SeriesLabelPosition;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn overlay_cdfs(path: &Path, title: &str, cdfs: &[(&str, &CdfSeries)]) -> Result<()> {
    let series: Vec<Series> = cdfs
        .iter()
        .map(|(label, cdf)| Series::line(*label, cdf.points()))
        .collect();
    let spec = ChartSpec::new(title, "RTT (usec)", "CDF").legend(SeriesLabelPosition::LowerRight);
    chart::render(path, &spec, &series)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    info!("Saved plot: {}", path.display());
    Ok(())
}

pub fn overlay_throughputs(
    path: &Path,
    title: &str,
    runs: &[(&str, &ThroughputSeries)],
) -> Result<()> {
    let series: Vec<Series> = runs
        .iter()
        .map(|(label, thp)| Series::line(*label, thp.total_points()))
        .collect();
    let spec = ChartSpec::new(title, "Time (sec)", "Throughput (Mbps)")
        .legend(SeriesLabelPosition::LowerRight);
    chart::render(path, &spec, &series)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    info!("Saved plot: {}", path.display());
    Ok(())
}

/// RTT CDFs of Timely, Hope-Max and Hope-Sum on one chart.
pub fn plot_all_rtt_cdf(
    out_dir: &Path,
    timely: &CdfSeries,
    hope_max: &CdfSeries,
    hope_sum: &CdfSeries,
) -> Result<PathBuf> {
    let path = out_dir.join(files::RTT_CDF_BENCHMARK);
    let [l0, l1, l2] = BENCHMARK_LABELS;
    overlay_cdfs(
        &path,
        "CDF of RTT for benchmarked congestion control algorithms",
        &[(l0, timely), (l1, hope_max), (l2, hope_sum)],
    )?;
    Ok(path)
}

/// Total throughput of Timely, Hope-Max and Hope-Sum on one chart.
pub fn plot_all_total_thp(
    out_dir: &Path,
    timely: &ThroughputSeries,
    hope_max: &ThroughputSeries,
    hope_sum: &ThroughputSeries,
) -> Result<PathBuf> {
    let path = out_dir.join(files::THP_BENCHMARK);
    let [l0, l1, l2] = BENCHMARK_LABELS;
    overlay_throughputs(
        &path,
        "Total throughputs for benchmarked congestion control algorithms",
        &[(l0, timely), (l1, hope_max), (l2, hope_sum)],
    )?;
    Ok(path)
}
