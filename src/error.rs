//! Error types of the analysis pipeline.

use thiserror::Error;

use crate::parse::ParseFailure;
use crate::sample::ValidationError;

/// Anything that stops an analysis from producing a report.
///
/// Every variant is terminal for the current invocation; no partial
/// report is produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The input text did not yield a valid sample.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A statistic came out undefined or non-finite.
    #[error("computation failed: {0}")]
    Computation(String),
}

impl From<ParseFailure> for AnalysisError {
    fn from(failure: ParseFailure) -> Self {
        AnalysisError::Validation(ValidationError::Parse(failure))
    }
}

impl AnalysisError {
    /// The validation error, if that is what stopped the analysis.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            AnalysisError::Validation(e) => Some(e),
            AnalysisError::Computation(_) => None,
        }
    }
}
