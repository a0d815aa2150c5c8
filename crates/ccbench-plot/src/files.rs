//! Names of the files read and written inside an experiment's output directory.

use std::path::{Path, PathBuf};

pub const RTT_CDF_BENCHMARK: &str = "Timely-Hope.rttCDF_benchmark.png";
pub const THP_BENCHMARK: &str = "Timely-Hope.thp_benchmark.png";

fn named(out_dir: &Path, algo: &str, suffix: &str) -> PathBuf {
    out_dir.join(format!("{algo}.{suffix}"))
}

pub fn rtt_input(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "rtt.out")
}

pub fn trace_input(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "tr")
}

pub fn queue_input(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "queue.out")
}

pub fn rtt_chart(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "rtt.png")
}

pub fn rtt_cdf_chart(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "rttCDF.png")
}

pub fn throughput_chart(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "thp.png")
}

pub fn queue_chart(out_dir: &Path, algo: &str) -> PathBuf {
    named(out_dir, algo, "queue.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_algorithm_names() {
        let dir = Path::new("/data/run1");
        assert_eq!(rtt_input(dir, "timely"), dir.join("timely.rtt.out"));
        assert_eq!(trace_input(dir, "timely"), dir.join("timely.tr"));
        assert_eq!(queue_input(dir, "hope_sum"), dir.join("hope_sum.queue.out"));
        assert_eq!(rtt_chart(dir, "timely"), dir.join("timely.rtt.png"));
        assert_eq!(rtt_cdf_chart(dir, "timely"), dir.join("timely.rttCDF.png"));
        assert_eq!(throughput_chart(dir, "hope_max"), dir.join("hope_max.thp.png"));
        assert_eq!(queue_chart(dir, "hope_max"), dir.join("hope_max.queue.png"));
    }
}
