//! Floating-point types the cache can hold.

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::num::ParseFloatError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A sealed trait for the **floating-point value types** stored in a [`LexicalCache`].
///
/// Bundles what the cache needs from `f32` / `f64`: raw bit access for keying and
/// ULP distance, the absolute tolerance used near zero, and the parse primitive.
///
/// [`LexicalCache`]: crate::LexicalCache
pub trait Real: sealed::Sealed + Copy + PartialOrd + Default + Debug + Display + 'static {
    /// Unsigned bit pattern of the same width. Used as the exact key of the reverse index.
    type Bits: Copy + Eq + Hash + Debug;

    /// Absolute difference under which two values are always considered equal.
    ///
    /// This is single-precision epsilon (`1.1920929e-7`) for both widths.
    const ABS_TOLERANCE: Self;

    /// Returns the raw bit pattern.
    fn to_raw_bits(self) -> Self::Bits;

    /// Rebuilds a value from its raw bit pattern.
    fn from_raw_bits(bits: Self::Bits) -> Self;

    /// Distance in ULPs between the bit patterns reinterpreted as signed integers.
    ///
    /// Only meaningful for operands of the same sign.
    fn ulp_distance(self, other: Self) -> u64;

    /// `|self - other|`.
    fn abs_diff(self, other: Self) -> Self;

    /// Returns `true` if this value is NaN.
    fn is_nan(self) -> bool;

    /// Returns `true` if the sign bit is set (includes `-0.0` and negative NaN).
    fn is_sign_negative(self) -> bool;

    /// Parses a decimal literal.
    fn parse_text(text: &str) -> Result<Self, ParseFloatError>;
}

impl Real for f32 {
    type Bits = u32;
    const ABS_TOLERANCE: Self = f32::EPSILON;

    #[inline(always)]
    fn to_raw_bits(self) -> u32 {
        self.to_bits()
    }
    #[inline(always)]
    fn from_raw_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
    #[inline(always)]
    fn ulp_distance(self, other: Self) -> u64 {
        let a = self.to_bits() as i32;
        let b = other.to_bits() as i32;
        a.wrapping_sub(b).unsigned_abs() as u64
    }
    #[inline(always)]
    fn abs_diff(self, other: Self) -> Self {
        (self - other).abs()
    }
    #[inline(always)]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    #[inline(always)]
    fn is_sign_negative(self) -> bool {
        f32::is_sign_negative(self)
    }
    #[inline]
    fn parse_text(text: &str) -> Result<Self, ParseFloatError> {
        text.parse()
    }
}

impl Real for f64 {
    type Bits = u64;
    const ABS_TOLERANCE: Self = f32::EPSILON as f64;

    #[inline(always)]
    fn to_raw_bits(self) -> u64 {
        self.to_bits()
    }
    #[inline(always)]
    fn from_raw_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
    #[inline(always)]
    fn ulp_distance(self, other: Self) -> u64 {
        let a = self.to_bits() as i64;
        let b = other.to_bits() as i64;
        a.wrapping_sub(b).unsigned_abs()
    }
    #[inline(always)]
    fn abs_diff(self, other: Self) -> Self {
        (self - other).abs()
    }
    #[inline(always)]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    #[inline(always)]
    fn is_sign_negative(self) -> bool {
        f64::is_sign_negative(self)
    }
    #[inline]
    fn parse_text(text: &str) -> Result<Self, ParseFloatError> {
        text.parse()
    }
}
