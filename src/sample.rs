//! Sample validation.
//!
//! A [`Sample`] is the only input the statistics engine accepts. It can
//! only be built through [`validate`], which enforces the 10–30 element
//! contract, so every `Sample` in the program is known to be in range and
//! made of finite values.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::parse::ParseFailure;

/// Smallest accepted sample size (inclusive).
pub const MIN_SAMPLE_SIZE: usize = 10;
/// Largest accepted sample size (inclusive).
pub const MAX_SAMPLE_SIZE: usize = 30;

/// Why raw input could not become a [`Sample`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No number could be extracted at all.
    #[error("no valid data was entered")]
    Empty,
    /// The number of values lies outside the permitted range.
    #[error("the number of values ({count}) is outside the permitted range ({min} to {max})")]
    OutOfRange {
        /// Observed count.
        count: usize,
        /// Lower bound (inclusive).
        min: usize,
        /// Upper bound (inclusive).
        max: usize,
    },
    /// A token was not a number.
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

/// A validated sample: 10 to 30 finite values in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// The values, in the order they were entered.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a validated sample; present for API symmetry
    /// with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the sample, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Checks a parsed sequence against the sample-size contract.
///
/// Rules, in order:
/// 1. zero values → [`ValidationError::Empty`];
/// 2. fewer than 10 or more than 30 → [`ValidationError::OutOfRange`];
/// 3. otherwise the values are wrapped unchanged.
///
/// Non-finite values are also rejected (as a parse failure naming the
/// value), so a `Sample` never holds NaN or infinity even when callers
/// bypass [`crate::parse::parse`].
///
/// # Examples
///
/// ```
/// use u_normality::sample::{validate, ValidationError};
///
/// let ok = validate((1..=10).map(f64::from).collect()).unwrap();
/// assert_eq!(ok.len(), 10);
///
/// let err = validate(vec![1.0; 9]).unwrap_err();
/// assert_eq!(err, ValidationError::OutOfRange { count: 9, min: 10, max: 30 });
/// ```
pub fn validate(values: Vec<f64>) -> Result<Sample, ValidationError> {
    let count = values.len();
    if count == 0 {
        warn!("no values to validate");
        return Err(ValidationError::Empty);
    }
    if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&count) {
        warn!(count, "sample size out of range");
        return Err(ValidationError::OutOfRange {
            count,
            min: MIN_SAMPLE_SIZE,
            max: MAX_SAMPLE_SIZE,
        });
    }
    if let Some((index, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::Parse(ParseFailure {
            token: v.to_string(),
            position: index + 1,
        }));
    }

    debug!(count, "sample validated");
    Ok(Sample(values))
}
