//! # u-normality
//!
//! Shapiro-Wilk normality check for small samples (10 to 30 values).
//!
//! Free-form text goes in; a report with the mean, the sample standard
//! deviation, the W statistic, its p-value, a verdict at α = 0.05 and the
//! descriptions of two diagnostic charts comes out.
//!
//! ```
//! use u_normality::{analyze, Verdict};
//!
//! let report = analyze("15.2, 16.1, 14.8, 17.3, 16.5, 15.9, 18.2, 16.8, 15.5, 17.0").unwrap();
//! assert_eq!(report.result.count, 10);
//! assert_eq!(report.result.verdict, Verdict::Normal);
//! ```
//!
//! ## Modules
//!
//! - [`parse`] — text → numbers, with decimal comma or point
//! - [`sample`] — the 10–30 sample-size contract
//! - [`engine`] — mean, standard deviation, Shapiro-Wilk
//! - [`testing`] — the Shapiro-Wilk test itself (Royston AS R94)
//! - [`verdict`] — p-value vs α decision rule
//! - [`report`] — result model, chart specs and [`analyze`]
//! - [`distribution`] — histogram bins, density curve, Q-Q points
//! - [`render`] — text, HTML and JSON adapters
//! - [`config`] — presentation settings
//! - [`cli`] — arguments of the `u-normality` binary
//!
//! Descriptive statistics and the normal CDF/quantile come from
//! `u_numflow::{stats, special}`.
//!
//! ## Design
//!
//! - **Pure**: one call, one immutable result; no global state.
//! - **Errors are values**: bad input comes back as [`AnalysisError`],
//!   never as a panic.
//! - **Presentation apart**: the core exposes full-precision `f64`s;
//!   rounding and locale belong to [`render`].

pub mod cli;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod parse;
pub mod render;
pub mod report;
pub mod sample;
pub mod testing;
pub mod verdict;

pub use error::AnalysisError;
pub use parse::ParseFailure;
pub use report::{analyze, AnalysisResult, ChartKind, ChartSpec, Report};
pub use sample::{Sample, ValidationError};
pub use verdict::{Verdict, ALPHA};
