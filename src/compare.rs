//! Approximate floating-point equality.
//!
//! Values reaching the reverse cache along different computation paths can differ in
//! their low-order bits, so reverse lookups match on a combined absolute/ULP test
//! instead of exact bit equality.
//!
//! # Algorithm
//! ```text
//! 1. if a or b is NaN            -> false
//! 2. if |a - b| <= ABS_TOLERANCE -> true   (near zero ULP distance is meaningless)
//! 3. if sign(a) != sign(b)       -> false
//! 4. reinterpret bits as signed integers ia, ib
//!    return |ia - ib| <= max_ulps
//! ```

use crate::Real;

/// ULP bound used by [`almost_eq`] and by [`CacheConfig`](crate::CacheConfig) by default.
pub const DEFAULT_MAX_ULPS: u32 = 4;

/// Returns `true` if `a` and `b` should be treated as the same cache key.
///
/// See the [module documentation](self) for the exact steps. The predicate is symmetric,
/// never true for NaN, and never true across signs once `|a - b|` exceeds
/// [`Real::ABS_TOLERANCE`].
///
/// ```rust
/// use lexical_cache::compare::almost_equal;
///
/// let sum = 0.1f64 + 0.2;
/// assert!(sum != 0.3);
/// assert!(almost_equal(sum, 0.3, 4));
/// assert!(!almost_equal(f64::NAN, f64::NAN, 4));
/// ```
#[inline]
pub fn almost_equal<F: Real>(a: F, b: F, max_ulps: u32) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }

    if a.abs_diff(b) <= F::ABS_TOLERANCE {
        return true;
    }

    if a.is_sign_negative() != b.is_sign_negative() {
        return false;
    }

    a.ulp_distance(b) <= u64::from(max_ulps)
}

/// [`almost_equal`] with [`DEFAULT_MAX_ULPS`].
#[inline]
pub fn almost_eq<F: Real>(a: F, b: F) -> bool {
    almost_equal(a, b, DEFAULT_MAX_ULPS)
}
