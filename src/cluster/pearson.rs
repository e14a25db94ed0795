//! Pearson correlation distance.
//!
//! ```text
//! d(a, b) = 1 - r(a, b)
//!
//!              Σ aᵢbᵢ - (Σ aᵢ)(Σ bᵢ)/W
//! r = ─────────────────────────────────────────────
//!     √((Σ aᵢ² - (Σ aᵢ)²/W) · (Σ bᵢ² - (Σ bᵢ)²/W))
//! ```
//!
//! `W` is the vocabulary size. `0` means the two count vectors have the same shape,
//! `2` means they are perfectly anti-correlated.
//!
//! A vector with zero variance (every count equal) makes the denominator vanish and
//! `r` undefined. [`try_distance`] reports that case as `None`; [`distance`] maps it to
//! [`MAX_DISTANCE`] so callers never compare against NaN.

use super::traits::WordVector;

/// Distance reported for degenerate (zero-variance) comparisons.
pub const MAX_DISTANCE: f64 = 2.0;

// A centered sum of squares at or below `sum_sq * VARIANCE_EPSILON` is rounding noise
// from averaging equal counts, not spread.
const VARIANCE_EPSILON: f64 = 1e-24;

/// Pearson distance, or `None` when it is undefined.
///
/// Both inputs must be aligned with the same vocabulary. This is not checked here
/// (beyond a debug assertion); the clusterers validate their input up front.
///
/// Sums are taken over deviations from the mean, which is algebraically the formula
/// above but does not cancel away the variance of large counts.
pub fn try_distance<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: WordVector + ?Sized,
    B: WordVector + ?Sized,
{
    let xs = a.counts();
    let ys = b.counts();
    debug_assert_eq!(xs.len(), ys.len());

    let n = xs.len();
    if n == 0 {
        return None;
    }

    let w = n as f64;
    let mean_a = xs.iter().sum::<f64>() / w;
    let mean_b = ys.iter().sum::<f64>() / w;

    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    let mut sum_a_sq = 0.0f64;
    let mut sum_b_sq = 0.0f64;
    let mut cov = 0.0f64;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        var_a += dx * dx;
        var_b += dy * dy;
        sum_a_sq += x * x;
        sum_b_sq += y * y;
        cov += dx * dy;
    }

    if var_a <= sum_a_sq * VARIANCE_EPSILON || var_b <= sum_b_sq * VARIANCE_EPSILON {
        return None;
    }

    let d = 1.0 - cov / (var_a * var_b).sqrt();
    d.is_finite().then_some(d)
}

/// Pearson distance, with [`MAX_DISTANCE`] for degenerate inputs.
#[inline]
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: WordVector + ?Sized,
    B: WordVector + ?Sized,
{
    try_distance(a, b).unwrap_or(MAX_DISTANCE)
}
