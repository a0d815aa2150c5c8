use serde::Serialize;

/// Summary of a value series; percentiles use the nearest-rank method.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p99: f64,
}

impl SeriesSummary {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self::from_sorted(&sorted))
    }

    /// Same as [`SeriesSummary::from_values`] for data already in ascending
    /// order, such as CDF values. `sorted` must not be empty.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let count = sorted.len();
        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<f64>() / count as f64,
            p50: nearest_rank(sorted, 50.0),
            p99: nearest_rank(sorted, 99.0),
        }
    }
}

fn nearest_rank(sorted: &[f64], pct: f64) -> f64 {
    let rank = (pct * sorted.len() as f64 / 100.0).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
