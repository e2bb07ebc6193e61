//! Number-to-text formatting used on reverse-cache misses.

use core::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Real;

/// How a value is rendered into decimal text on a reverse-cache miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextFormat {
    /// Fixed notation with exactly this many fractional digits (`1.5` -> `"1.500000"` for 6).
    Fixed(usize),
    /// Shortest text that parses back to the same value (`Display`).
    Shortest,
    /// Fixed notation with up to this many fractional digits, trailing zeros trimmed but
    /// one fractional digit always kept (`2.0` -> `"2.0"`, `0.25` -> `"0.25"`).
    ///
    /// Never produces scientific notation.
    Plain(usize),
}

impl Default for TextFormat {
    fn default() -> Self {
        TextFormat::Fixed(6)
    }
}

impl TextFormat {
    /// Renders `value` into `out`, replacing its previous contents.
    ///
    /// Reusing `out` lets an overwritten slot keep its text allocation.
    pub fn write_into<F: Real>(self, value: F, out: &mut String) {
        out.clear();
        let res = match self {
            TextFormat::Fixed(precision) => write!(out, "{value:.precision$}"),
            TextFormat::Shortest => write!(out, "{value}"),
            TextFormat::Plain(precision) => {
                write!(out, "{value:.precision$}").map(|()| trim_fraction(out))
            }
        };
        // `String`'s `fmt::Write` impl never fails.
        debug_assert!(res.is_ok(), "formatting into a String failed");
    }

    /// Renders `value` into a fresh `String`.
    pub fn format<F: Real>(self, value: F) -> String {
        let mut out = String::new();
        self.write_into(value, &mut out);
        out
    }
}

/// Drops trailing zeros after the decimal point, keeping the first fractional digit.
fn trim_fraction(text: &mut String) {
    let Some(dot) = text.find('.') else {
        return;
    };
    let keep_at_least = dot + 2;
    let trimmed = text.trim_end_matches('0').len().max(keep_at_least);
    text.truncate(trimmed.min(text.len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_matches_six_digit_default() {
        assert_eq!(TextFormat::default().format(1.5f64), "1.500000");
        assert_eq!(TextFormat::default().format(-0.1f32), "-0.100000");
        assert_eq!(TextFormat::Fixed(2).format(3.14159f64), "3.14");
        assert_eq!(TextFormat::Fixed(0).format(2.0f64), "2");
    }

    #[test]
    fn test_shortest() {
        assert_eq!(TextFormat::Shortest.format(0.1f64), "0.1");
        assert_eq!(TextFormat::Shortest.format(1e21f64), "1000000000000000000000");
        assert_eq!(TextFormat::Shortest.format(2.0f64), "2");
    }

    #[test]
    fn test_plain_trims_zeros() {
        let plain = TextFormat::Plain(15);
        assert_eq!(plain.format(1.5f64), "1.5");
        assert_eq!(plain.format(2.0f64), "2.0");
        assert_eq!(plain.format(0.0f64), "0.0");
        assert_eq!(plain.format(0.25f64), "0.25");
        assert_eq!(plain.format(-10.0f64), "-10.0");
        assert_eq!(TextFormat::Plain(0).format(7.0f64), "7");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(TextFormat::default().format(f64::NAN), "NaN");
        assert_eq!(TextFormat::Plain(15).format(f64::INFINITY), "inf");
        assert_eq!(TextFormat::Shortest.format(f32::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_write_into_reuses_buffer() {
        let mut buf = String::with_capacity(64);
        buf.push_str("stale contents");
        TextFormat::Fixed(1).write_into(4.3f64, &mut buf);
        assert_eq!(buf, "4.3");
        assert!(buf.capacity() >= 64);
    }
}
