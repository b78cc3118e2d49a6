//! Shapiro-Wilk normality test.
//!
//! H₀: the sample was drawn from a normal population. Small W (and small
//! p-value) is evidence against H₀.
//!
//! # Examples
//!
//! ```
//! use u_normality::testing::shapiro_wilk_test;
//!
//! // Shapiro & Wilk (1965), weights of 11 men in pounds
//! let data = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
//! let r = shapiro_wilk_test(&data).unwrap();
//! assert!((r.w - 0.78881).abs() < 1e-4);
//! assert!((r.p_value - 0.006704).abs() < 1e-4);
//! ```

use serde::Serialize;

use u_numflow::special;

use crate::sample::{MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};

/// Result of the Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapiroWilkResult {
    /// The W statistic (0 < W ≤ 1). Values close to 1 suggest normality.
    pub w: f64,
    /// The p-value. Small values reject normality.
    pub p_value: f64,
}

/// Shapiro-Wilk test on `data` (any order).
///
/// # Algorithm
///
/// Royston (1992, 1995), Algorithm AS R94:
/// 1. Expected normal order statistics mᵢ from Blom scores
///    Φ⁻¹((i − 3/8) / (n + 1/4)).
/// 2. Coefficients aᵢ = mᵢ/‖m‖, with the outermost two replaced by
///    polynomial corrections in 1/√n and the rest rescaled so that
///    Σaᵢ² = 1.
/// 3. W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ − x₍ᵢ₎))² / Σ (xᵢ − x̄)².
/// 4. ln(1 − W) is normalized (with an extra −ln(γ − ·) step for
///    n ≤ 11) and the upper normal tail gives the p-value.
///
/// # Returns
///
/// `None` if n is outside the accepted sample range (10..=30), any value
/// is non-finite, or all values are identical (W undefined).
///
/// # References
///
/// - Shapiro & Wilk (1965). "An analysis of variance test for normality".
///   Biometrika, 52(3–4), 591–611.
/// - Royston (1992). "Approximating the Shapiro-Wilk W-test for
///   non-normality". Statistics and Computing, 2, 117–119.
/// - Royston (1995). "Remark AS R94: A remark on Algorithm AS 181".
///   Applied Statistics, 44(4), 547–551.
pub fn shapiro_wilk_test(data: &[f64]) -> Option<ShapiroWilkResult> {
    let n = data.len();
    if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&n) || data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut x = data.to_vec();
    x.sort_by(f64::total_cmp);

    let ss = sum_of_squares(&x);
    if x[n - 1] - x[0] < 1e-300 || ss < 1e-300 {
        return None;
    }

    let a = coefficients(n)?;
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let w = numerator * numerator / ss;
    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return None;
    }
    let w = w.min(1.0);

    Some(ShapiroWilkResult {
        w,
        p_value: p_value(w, n).clamp(0.0, 1.0),
    })
}

// Royston polynomial coefficients (AS R94)
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const GAMMA: [f64; 2] = [-2.273, 0.459];

/// c[0] + c[1]·x + c[2]·x² + … by Horner's rule.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

fn sum_of_squares(x: &[f64]) -> f64 {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    x.iter().map(|&v| (v - mean) * (v - mean)).sum()
}

/// Antisymmetric weights a₁..a₍ₙ/₂₎ for the upper half of the order
/// statistics (the lower half is their negation).
fn coefficients(n: usize) -> Option<Vec<f64>> {
    let half = n / 2;
    let nf = n as f64;

    let m: Vec<f64> = (1..=half)
        .map(|i| special::inverse_normal_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    // m is negative in the lower half, so -m/‖m‖ is the positive weight
    let corrected = [
        poly(&C1, rsn) - m[0] / ssumm2,
        poly(&C2, rsn) - m[1] / ssumm2,
    ];

    let k = corrected.len();
    let fac_sq = summ2 - 2.0 * m[..k].iter().map(|v| v * v).sum::<f64>();
    let rest = 1.0 - 2.0 * corrected.iter().map(|v| v * v).sum::<f64>();
    if fac_sq <= 0.0 || rest <= 0.0 {
        return None;
    }
    let fac = (fac_sq / rest).sqrt();

    let mut a = corrected.to_vec();
    a.extend(m[k..].iter().map(|mi| -mi / fac));
    Some(a)
}

/// Royston's normalizing transformation of W to an upper-tail p-value.
fn p_value(w: f64, n: usize) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;

    let (y, mu, sigma) = if n <= 11 {
        let gamma = poly(&GAMMA, nf);
        if y >= gamma {
            return 0.0;
        }
        (-(gamma - y).ln(), poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (y, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    special::standard_normal_sf((y - mu) / sigma)
}
