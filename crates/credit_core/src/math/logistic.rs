//! Logistic transform used to map a linear credit score to a probability.
//!
//! All functions use generic type parameter `T: num_traits::Float` for f32/f64 support.

use num_traits::Float;

/// Largest absolute linear predictor fed into [`logistic`].
///
/// `logistic(30.0)` is `1 - 9.4e-14` in f64, so clamping the predictor here keeps
/// every probability strictly inside the open unit interval.
pub const MAX_LOGIT: f64 = 30.0;

/// Logistic (sigmoid) transform with a clamped linear predictor.
///
/// # Mathematical Definition
/// ```text
/// logistic(x) = 1 / (1 + exp(-clamp(x, -MAX_LOGIT, MAX_LOGIT)))
/// ```
///
/// The result lies in the open interval (0, 1) for every finite input and is
/// non-decreasing in `x`. NaN propagates.
///
/// # Examples
/// ```
/// use credit_core::math::logistic::logistic;
///
/// assert!((logistic(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!(logistic(1_000.0_f64) < 1.0);
/// assert!(logistic(-1_000.0_f64) > 0.0);
/// ```
#[inline]
pub fn logistic<T: Float>(x: T) -> T {
    if x.is_nan() {
        return x;
    }
    let bound = T::from(MAX_LOGIT).unwrap_or_else(T::max_value);
    let x = x.max(-bound).min(bound);
    let one = T::one();

    // Evaluate on the side where exp() cannot overflow.
    if x >= T::zero() {
        one / (one + (-x).exp())
    } else {
        let e = x.exp();
        e / (one + e)
    }
}

/// Inverse of the logistic transform.
///
/// Returns `ln(p / (1 - p))`. Infinite at `p = 0` and `p = 1`, NaN outside [0, 1].
///
/// # Examples
/// ```
/// use credit_core::math::logistic::{logistic, logit};
///
/// let x = 1.25_f64;
/// assert!((logit(logistic(x)) - x).abs() < 1e-12);
/// ```
#[inline]
pub fn logit<T: Float>(p: T) -> T {
    (p / (T::one() - p)).ln()
}

/// Maps a non-negative quantity onto [0, 1] against a reference maximum.
///
/// ```text
/// normalise_unit(x, reference) = min(x / reference, 1)
/// ```
///
/// Callers guarantee `x >= 0` and `reference > 0`.
#[inline]
pub fn normalise_unit<T: Float>(x: T, reference: T) -> T {
    (x / reference).min(T::one())
}
