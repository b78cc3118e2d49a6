//! Chart data for the diagnostic plots.
//!
//! Histogram binning, Gaussian kernel density (the curve drawn over the
//! histogram) and normal Q-Q points. These are what a plotting front end
//! needs to draw the two charts of a report; nothing here renders pixels.
//!
//! # Examples
//!
//! ```
//! use u_normality::distribution::{histogram_bins, qq_plot_normal, BinMethod};
//!
//! let data = [14.2, 15.1, 15.8, 16.0, 16.3, 16.4, 16.9, 17.2, 17.8, 18.5];
//! let bins = histogram_bins(&data, BinMethod::Auto).unwrap();
//! assert_eq!(bins.counts.iter().sum::<usize>(), data.len());
//!
//! let qq = qq_plot_normal(&data).unwrap();
//! assert!(qq.r > 0.95);
//! ```

use serde::Serialize;

use u_numflow::special;
use u_numflow::stats;

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Rule for choosing the number of histogram bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinMethod {
    /// Sturges' rule: k = ⌈log₂ n⌉ + 1. Suited to near-normal data.
    Sturges,
    /// Freedman-Diaconis: h = 2·IQR·n^(-1/3). Robust to outliers.
    FreedmanDiaconis,
    /// The finer of Sturges and Freedman-Diaconis (NumPy's `"auto"`).
    /// Falls back to Sturges when Freedman-Diaconis is unusable (see
    /// [`histogram_bins`]).
    #[default]
    Auto,
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBins {
    /// Number of bins.
    pub n_bins: usize,
    /// Bin width.
    pub bin_width: f64,
    /// Bin edges (length = n_bins + 1).
    pub edges: Vec<f64>,
    /// Observations per bin. The last bin is closed on the right.
    pub counts: Vec<usize>,
}

/// Computes equal-width histogram bins over the data range.
///
/// The Freedman-Diaconis count is only trusted while it stays at or below
/// the number of values. A near-zero IQR next to a distant outlier would
/// otherwise ask for millions of empty bins; those cases use Sturges.
///
/// # Returns
///
/// `None` if fewer than 2 values, any value is non-finite, or all values
/// are equal.
pub fn histogram_bins(data: &[f64], method: BinMethod) -> Option<HistogramBins> {
    let n = data.len();
    if n < 2 || data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let min_val = data.iter().cloned().reduce(f64::min)?;
    let max_val = data.iter().cloned().reduce(f64::max)?;
    let range = max_val - min_val;
    if range < 1e-300 {
        return None;
    }

    let sturges = sturges_bins(n);
    let n_bins = match method {
        BinMethod::Sturges => sturges,
        BinMethod::FreedmanDiaconis => fd_bins(data, range).unwrap_or(sturges),
        BinMethod::Auto => fd_bins(data, range).map_or(sturges, |fd| fd.max(sturges)),
    }
    .max(1);

    let bin_width = range / n_bins as f64;
    let edges: Vec<f64> = (0..=n_bins)
        .map(|i| min_val + i as f64 * bin_width)
        .collect();

    let mut counts = vec![0_usize; n_bins];
    for &x in data {
        let bin = (((x - min_val) / bin_width).floor() as usize).min(n_bins - 1);
        counts[bin] += 1;
    }

    Some(HistogramBins {
        n_bins,
        bin_width,
        edges,
        counts,
    })
}

fn sturges_bins(n: usize) -> usize {
    ((n as f64).log2().ceil() as usize + 1).max(2)
}

// None when the IQR is zero or the count would exceed n
fn fd_bins(data: &[f64], range: f64) -> Option<usize> {
    let n = data.len();
    let iqr = stats::quantile(data, 0.75)? - stats::quantile(data, 0.25)?;
    if iqr < 1e-300 {
        return None;
    }
    let h = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
    let bins = (range / h).ceil();
    if !bins.is_finite() || bins > n as f64 {
        return None;
    }
    Some(bins as usize)
}

// ---------------------------------------------------------------------------
// Q-Q plot
// ---------------------------------------------------------------------------

/// Normal probability plot data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QqPlot {
    /// Theoretical standard-normal quantiles (x-axis), ascending.
    pub theoretical: Vec<f64>,
    /// Sorted sample values (y-axis).
    pub sample: Vec<f64>,
    /// Slope of the least-squares reference line.
    pub slope: f64,
    /// Intercept of the least-squares reference line.
    pub intercept: f64,
    /// Correlation between theoretical and sample quantiles.
    pub r: f64,
}

/// Builds Q-Q plot data against the standard normal distribution.
///
/// Theoretical quantiles are Φ⁻¹ of Filliben's order-statistic medians:
/// 1 − 0.5^(1/n) for the first point, 0.5^(1/n) for the last, and
/// (i − 0.3175)/(n + 0.365) in between. The reference line is the
/// least-squares fit of sample on theoretical quantiles; for normal data
/// its slope approximates σ and its intercept μ.
///
/// # Returns
///
/// `None` if fewer than 3 values, any value is non-finite, or all values
/// are equal.
///
/// # References
///
/// Filliben (1975). "The Probability Plot Correlation Coefficient Test for
/// Normality". Technometrics, 17(1), 111–117.
pub fn qq_plot_normal(data: &[f64]) -> Option<QqPlot> {
    let n = data.len();
    if n < 3 || data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut sample = data.to_vec();
    sample.sort_by(f64::total_cmp);

    let nf = n as f64;
    let last = 0.5_f64.powf(1.0 / nf);
    let theoretical: Vec<f64> = (1..=n)
        .map(|i| {
            let p = if i == 1 {
                1.0 - last
            } else if i == n {
                last
            } else {
                (i as f64 - 0.3175) / (nf + 0.365)
            };
            special::inverse_normal_cdf(p)
        })
        .collect();

    let mx = stats::mean(&theoretical)?;
    let my = stats::mean(&sample)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&tx, &sy) in theoretical.iter().zip(&sample) {
        sxy += (tx - mx) * (sy - my);
        sxx += (tx - mx) * (tx - mx);
        syy += (sy - my) * (sy - my);
    }
    if sxx < 1e-300 || syy < 1e-300 {
        return None;
    }
    let slope = sxy / sxx;

    Some(QqPlot {
        intercept: my - slope * mx,
        slope,
        r: sxy / (sxx * syy).sqrt(),
        theoretical,
        sample,
    })
}

// ---------------------------------------------------------------------------
// Kernel density estimation
// ---------------------------------------------------------------------------

/// Density curve sampled on an even grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KdeResult {
    /// Evaluation points.
    pub x: Vec<f64>,
    /// Density at each point.
    pub density: Vec<f64>,
    /// Bandwidth used.
    pub bandwidth: f64,
}

/// Gaussian kernel density estimate.
///
/// f̂(x) = (1/nh) Σ φ((x − xᵢ)/h), with h from [`kde_bandwidth`]. The grid
/// spans the data range extended by 3h on both sides so the tails of the
/// outer kernels are drawn.
///
/// # Returns
///
/// `None` if fewer than 2 values or grid points, any value is non-finite,
/// or the sample has zero spread.
pub fn kde(data: &[f64], n_points: usize) -> Option<KdeResult> {
    let n = data.len();
    if n < 2 || n_points < 2 || data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let bandwidth = kde_bandwidth(data)?;
    let min_val = data.iter().cloned().reduce(f64::min)?;
    let max_val = data.iter().cloned().reduce(f64::max)?;
    let x_min = min_val - 3.0 * bandwidth;
    let step = (max_val - min_val + 6.0 * bandwidth) / (n_points - 1) as f64;

    let inv_h = 1.0 / bandwidth;
    let norm = inv_h / (n as f64 * (2.0 * std::f64::consts::PI).sqrt());

    let x: Vec<f64> = (0..n_points).map(|i| x_min + i as f64 * step).collect();
    let density = x
        .iter()
        .map(|&xi| {
            let sum: f64 = data
                .iter()
                .map(|&xj| {
                    let u = (xi - xj) * inv_h;
                    (-0.5 * u * u).exp()
                })
                .sum();
            sum * norm
        })
        .collect();

    Some(KdeResult {
        x,
        density,
        bandwidth,
    })
}

/// Scott's rule of thumb, h = σ·n^(-1/5), the factor SciPy's
/// `gaussian_kde` uses by default.
///
/// # Returns
///
/// `None` if fewer than 2 values, any value is non-finite, or σ is zero.
pub fn kde_bandwidth(data: &[f64]) -> Option<f64> {
    let sd = stats::std_dev(data)?;
    if sd < 1e-300 {
        return None;
    }
    Some(sd * (data.len() as f64).powf(-0.2))
}
