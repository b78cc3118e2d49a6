//! Report model and the `analyze` entry point.
//!
//! A [`Report`] bundles the numeric result with two chart descriptions.
//! Building it performs no statistics; chart data (bins, density curve,
//! Q-Q points) is only computed when a plotting collaborator asks the
//! [`ChartSpec`] for it.
//!
//! # Examples
//!
//! ```
//! use u_normality::report::{analyze, ChartKind};
//! use u_normality::verdict::Verdict;
//!
//! let report = analyze("15,2\n16,1\n14,8\n17,3\n16,5\n15,9\n18,2\n16,8\n15,5\n17,0").unwrap();
//! assert_eq!(report.result.count, 10);
//! assert_eq!(report.result.verdict, Verdict::Normal);
//! assert_eq!(report.histogram.kind, ChartKind::Histogram);
//! assert_eq!(report.qq_plot.kind, ChartKind::QqPlot);
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::distribution::{
    histogram_bins, kde, qq_plot_normal, BinMethod, HistogramBins, KdeResult, QqPlot,
};
use crate::engine::{self, Statistics};
use crate::error::AnalysisError;
use crate::parse::parse;
use crate::sample::{validate, Sample};
use crate::verdict::{classify, Verdict, ALPHA};

/// Grid resolution of the density overlay.
pub const DENSITY_POINTS: usize = 200;

/// Final, immutable outcome of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (divisor n − 1).
    pub std_dev: f64,
    /// Number of observations.
    pub count: usize,
    /// Shapiro-Wilk W, in (0, 1].
    pub w: f64,
    /// Shapiro-Wilk p-value, in [0, 1].
    pub p_value: f64,
    /// Significance level the verdict was taken at.
    pub alpha: f64,
    /// Normality verdict.
    pub verdict: Verdict,
}

impl AnalysisResult {
    /// Applies the decision rule at `alpha` to computed statistics.
    pub fn from_statistics(stats: Statistics, alpha: f64) -> Self {
        Self {
            mean: stats.mean,
            std_dev: stats.std_dev,
            count: stats.count,
            w: stats.w,
            p_value: stats.p_value,
            alpha,
            verdict: classify(stats.p_value, alpha),
        }
    }

    /// Human-readable reason for the verdict.
    pub fn justification(&self) -> String {
        self.verdict.justification(self.alpha)
    }
}

/// Which diagnostic chart a [`ChartSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Histogram of the sample.
    Histogram,
    /// Normal quantile-quantile plot.
    QqPlot,
}

/// Drawing options attached to a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    /// Binning rule (histogram only).
    pub bins: BinMethod,
    /// Whether a density curve is drawn over the bars.
    pub overlay_density: bool,
}

/// Abstract description of one chart. Rendering is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart type.
    pub kind: ChartKind,
    /// The sample values, in input order.
    pub data: Vec<f64>,
    /// Drawing options.
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Histogram with automatic bins and a density overlay.
    pub fn histogram(sample: &Sample) -> Self {
        Self {
            kind: ChartKind::Histogram,
            data: sample.values().to_vec(),
            options: ChartOptions {
                bins: BinMethod::Auto,
                overlay_density: true,
            },
        }
    }

    /// Normal Q-Q plot.
    pub fn qq_plot(sample: &Sample) -> Self {
        Self {
            kind: ChartKind::QqPlot,
            data: sample.values().to_vec(),
            options: ChartOptions {
                bins: BinMethod::Auto,
                overlay_density: false,
            },
        }
    }

    /// Histogram bars, using this chart's binning rule.
    ///
    /// `None` for a Q-Q spec or when the data has zero range.
    pub fn histogram_bins(&self) -> Option<HistogramBins> {
        match self.kind {
            ChartKind::Histogram => histogram_bins(&self.data, self.options.bins),
            ChartKind::QqPlot => None,
        }
    }

    /// Density curve to draw over the bars, if the spec asks for one.
    pub fn density(&self) -> Option<KdeResult> {
        if !self.options.overlay_density {
            return None;
        }
        kde(&self.data, DENSITY_POINTS)
    }

    /// Q-Q points and reference line. `None` for a histogram spec.
    pub fn qq_points(&self) -> Option<QqPlot> {
        match self.kind {
            ChartKind::QqPlot => qq_plot_normal(&self.data),
            ChartKind::Histogram => None,
        }
    }
}

/// Everything a presentation layer needs for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Numeric outcome and verdict.
    pub result: AnalysisResult,
    /// Histogram with density overlay.
    pub histogram: ChartSpec,
    /// Normal Q-Q plot.
    pub qq_plot: ChartSpec,
}

impl Report {
    /// Aggregates a validated sample and its statistics.
    pub fn new(sample: &Sample, stats: Statistics) -> Self {
        Self {
            result: AnalysisResult::from_statistics(stats, ALPHA),
            histogram: ChartSpec::histogram(sample),
            qq_plot: ChartSpec::qq_plot(sample),
        }
    }
}

/// Runs the whole pipeline on a block of user text.
///
/// parse → validate → compute → classify → report. Stops at the first
/// failure; never returns a partial report.
///
/// # Errors
///
/// - [`AnalysisError::Validation`] for a bad token, no numbers, or a
///   count outside 10..=30;
/// - [`AnalysisError::Computation`] when a statistic is undefined.
pub fn analyze(raw_text: &str) -> Result<Report, AnalysisError> {
    let values = parse(raw_text)?;
    let sample = validate(values)?;
    let stats = engine::compute(&sample)?;
    let report = Report::new(&sample, stats);

    info!(
        count = report.result.count,
        p_value = report.result.p_value,
        verdict = ?report.result.verdict,
        "analysis complete"
    );
    debug!(justification = %report.result.justification());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ValidationError;

    const FIFTEEN: &str = "15.2, 16.1, 14.8, 17.3, 16.5, 15.9, 18.2, 16.8, 15.5, 17.0, \
                           16.2, 14.9, 17.8, 16.4, 15.7";

    fn stats_with_p(p_value: f64) -> Statistics {
        Statistics {
            mean: 0.0,
            std_dev: 1.0,
            count: 20,
            w: 0.95,
            p_value,
        }
    }

    // -----------------------------------------------------------------------
    // End to end
    // -----------------------------------------------------------------------

    #[test]
    fn fifteen_values_end_to_end() {
        let report = analyze(FIFTEEN).expect("analysis");
        let r = report.result;
        assert_eq!(r.count, 15);
        assert_eq!(r.alpha, ALPHA);
        assert_eq!(r.verdict, classify(r.p_value, ALPHA));
        assert_eq!(r.verdict, Verdict::Normal);

        assert_eq!(report.histogram.kind, ChartKind::Histogram);
        assert_eq!(report.qq_plot.kind, ChartKind::QqPlot);
        assert_eq!(report.histogram.data.len(), 15);
        assert_eq!(report.histogram.data, report.qq_plot.data);
        assert_eq!(report.histogram.data[0], 15.2);
    }

    #[test]
    fn skewed_sample_rejected() {
        let raw = "0.1\n0.2\n0.3\n0.4\n0.5\n0.6\n0.8\n1.0\n1.2\n1.5\n\
                   1.8\n2.2\n2.7\n3.3\n4.1\n5.2\n6.8\n9.0\n12.5\n18.0";
        let r = analyze(raw).expect("analysis").result;
        assert_eq!(r.count, 20);
        assert!(r.p_value <= ALPHA, "p = {}", r.p_value);
        assert_eq!(r.verdict, Verdict::NotNormal);
    }

    #[test]
    fn parse_failure_stops_pipeline() {
        let raw = "1.2, abc, 3.4, 4.5, 5.6, 6.7, 7.8, 8.9, 9.0, 10.1, 11.2";
        match analyze(raw) {
            Err(AnalysisError::Validation(ValidationError::Parse(f))) => {
                assert_eq!(f.token, "abc")
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_out_of_range() {
        assert_eq!(
            analyze(" \n ").expect_err("empty").validation(),
            Some(&ValidationError::Empty)
        );
        assert_eq!(
            analyze("1.0, 2.0, 3.0").expect_err("too few").validation(),
            Some(&ValidationError::OutOfRange { count: 3, min: 10, max: 30 })
        );
    }

    // -----------------------------------------------------------------------
    // Result assembly
    // -----------------------------------------------------------------------

    #[test]
    fn p_equal_to_alpha_is_not_normal() {
        let r = AnalysisResult::from_statistics(stats_with_p(0.05), ALPHA);
        assert_eq!(r.verdict, Verdict::NotNormal);
        assert!(r.justification().contains("rejected"));
    }

    #[test]
    fn p_above_alpha_is_normal() {
        let r = AnalysisResult::from_statistics(stats_with_p(0.3), ALPHA);
        assert_eq!(r.verdict, Verdict::Normal);
        assert!(r.justification().contains("accepted"));
    }

    // -----------------------------------------------------------------------
    // Chart specs
    // -----------------------------------------------------------------------

    #[test]
    fn chart_options() {
        let report = analyze(FIFTEEN).expect("analysis");
        assert!(report.histogram.options.overlay_density);
        assert_eq!(report.histogram.options.bins, BinMethod::Auto);
        assert!(!report.qq_plot.options.overlay_density);
    }

    #[test]
    fn chart_data_on_demand() {
        let report = analyze(FIFTEEN).expect("analysis");

        let bins = report.histogram.histogram_bins().expect("bins");
        assert_eq!(bins.counts.iter().sum::<usize>(), 15);
        let density = report.histogram.density().expect("density");
        assert_eq!(density.x.len(), DENSITY_POINTS);
        assert!(report.histogram.qq_points().is_none());

        let qq = report.qq_plot.qq_points().expect("qq");
        assert_eq!(qq.sample.len(), 15);
        assert!(report.qq_plot.histogram_bins().is_none());
        assert!(report.qq_plot.density().is_none());
    }

    #[test]
    fn outlier_with_tiny_iqr_keeps_bins_small() {
        let raw = "0\n1\n1\n1\n1\n1\n1\n1\n1,000001\n1,000001\n1,000001\n1000";
        let report = analyze(raw).expect("analysis");
        let bins = report.histogram.histogram_bins().expect("bins");
        assert!(bins.n_bins <= 12, "n_bins = {}", bins.n_bins);
        assert_eq!(bins.counts.iter().sum::<usize>(), 12);
    }

    #[test]
    fn report_serializes() {
        let report = analyze(FIFTEEN).expect("analysis");
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["result"]["count"], 15);
        assert_eq!(json["result"]["verdict"], "NORMAL");
        assert_eq!(json["histogram"]["kind"], "histogram");
        assert_eq!(json["qq_plot"]["kind"], "qq_plot");
        assert_eq!(json["histogram"]["options"]["bins"], "auto");
    }
}
