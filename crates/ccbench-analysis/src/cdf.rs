use crate::error::{AnalysisError, Result};
use ccbench_abstract::CdfSeries;

/// Empirical CDF of `data`.
///
/// The i-th smallest of N values gets rank fraction `i / (N - 1)`, so the
/// minimum maps to 0.0 and the maximum to 1.0. Fewer than two values is an
/// error.
pub fn build(data: &[f64]) -> Result<CdfSeries> {
    if data.len() < 2 {
        return Err(AnalysisError::DegenerateSeries { len: data.len() });
    }

    let mut values = data.to_vec();
    values.sort_by(f64::total_cmp);

    let last = (values.len() - 1) as f64;
    let fractions = (0..values.len()).map(|i| i as f64 / last).collect();
    Ok(CdfSeries { values, fractions })
}
