//! Normality decision rule.
//!
//! The Shapiro-Wilk p-value is compared with a fixed significance level:
//! `p > α` fails to reject normality, `p ≤ α` rejects it. The boundary
//! `p == α` therefore rejects.
//!
//! # Examples
//!
//! ```
//! use u_normality::verdict::{classify, Verdict, ALPHA};
//!
//! assert_eq!(classify(0.20, ALPHA), Verdict::Normal);
//! assert_eq!(classify(0.05, ALPHA), Verdict::NotNormal);
//! ```

use serde::Serialize;

/// Significance level used by every analysis.
pub const ALPHA: f64 = 0.05;

/// Outcome of the normality decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// H₀ not rejected: the data is compatible with a normal population.
    Normal,
    /// H₀ rejected at the given significance level.
    NotNormal,
}

impl Verdict {
    /// Whether normality was accepted.
    pub fn is_normal(self) -> bool {
        matches!(self, Verdict::Normal)
    }

    /// One-sentence justification, e.g.
    /// "normality is accepted at an alpha risk of 5%".
    pub fn justification(self, alpha: f64) -> String {
        let action = match self {
            Verdict::Normal => "accepted",
            Verdict::NotNormal => "rejected",
        };
        format!("normality is {action} at an alpha risk of {}%", percent(alpha))
    }
}

/// Classifies a p-value against `alpha`.
pub fn classify(p_value: f64, alpha: f64) -> Verdict {
    if p_value > alpha {
        Verdict::Normal
    } else {
        Verdict::NotNormal
    }
}

/// `alpha` as a whole percentage (0.05 → 5).
pub fn percent(alpha: f64) -> u32 {
    (alpha * 100.0).round() as u32
}
