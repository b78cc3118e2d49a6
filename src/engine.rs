//! Statistics engine: descriptive statistics plus Shapiro-Wilk.
//!
//! # Examples
//!
//! ```
//! use u_normality::engine::compute;
//! use u_normality::sample::validate;
//!
//! let sample = validate(vec![
//!     15.2, 16.1, 14.8, 17.3, 16.5, 15.9, 18.2, 16.8, 15.5, 17.0,
//! ]).unwrap();
//! let stats = compute(&sample).unwrap();
//! assert_eq!(stats.count, 10);
//! assert!(stats.p_value > 0.05);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::AnalysisError;
use crate::sample::Sample;
use u_numflow::stats;
use crate::testing::shapiro_wilk_test;

/// Numbers computed from one sample, before the decision rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (divisor n − 1).
    pub std_dev: f64,
    /// Number of observations.
    pub count: usize,
    /// Shapiro-Wilk W.
    pub w: f64,
    /// Shapiro-Wilk p-value.
    pub p_value: f64,
}

/// Computes mean, standard deviation and the Shapiro-Wilk test.
///
/// The sample size contract is the validator's job and is not checked
/// again here.
///
/// # Errors
///
/// [`AnalysisError::Computation`] when a statistic is undefined, e.g. all
/// values are identical (W has a zero denominator) or a value overflows.
pub fn compute(sample: &Sample) -> Result<Statistics, AnalysisError> {
    let data = sample.values();

    let mean = stats::mean(data)
        .ok_or_else(|| AnalysisError::Computation("mean is undefined".into()))?;
    let std_dev = stats::std_dev(data)
        .ok_or_else(|| AnalysisError::Computation("standard deviation is undefined".into()))?;
    let sw = shapiro_wilk_test(data).ok_or_else(|| {
        AnalysisError::Computation(
            "Shapiro-Wilk test is undefined for this sample (are all values identical?)".into(),
        )
    })?;

    let out = Statistics {
        mean,
        std_dev,
        count: data.len(),
        w: sw.w,
        p_value: sw.p_value,
    };
    if [out.mean, out.std_dev, out.w, out.p_value]
        .iter()
        .any(|v| !v.is_finite())
    {
        return Err(AnalysisError::Computation(format!(
            "non-finite result: mean={}, std_dev={}, W={}, p={}",
            out.mean, out.std_dev, out.w, out.p_value
        )));
    }

    debug!(
        mean = out.mean,
        std_dev = out.std_dev,
        w = out.w,
        p_value = out.p_value,
        "statistics computed"
    );
    Ok(out)
}
