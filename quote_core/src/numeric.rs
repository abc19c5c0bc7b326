//! # Numeric Input Handling
//!
//! Every value a user types into a row passes through here. Invalid entries
//! never become errors: anything that does not parse to a finite number is
//! treated as zero.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::numeric::{coerce_input, round_half_up};
//!
//! assert_eq!(coerce_input("12.5"), 12.5);
//! assert_eq!(coerce_input("abc"), 0.0);
//! assert_eq!(coerce_input(""), 0.0);
//! assert_eq!(round_half_up(2.5), 3.0);
//! assert_eq!(round_half_up(-2.5), -2.0);
//! ```

/// Parse a raw text entry into a number, falling back to `0.0`.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text and
/// non-finite values (`inf`, `NaN`) all coerce to zero.
pub fn coerce_input(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
}

/// Replace a non-finite value with `0.0`.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp to `>= 0`, after sanitizing.
pub fn non_negative(value: f64) -> f64 {
    sanitize(value).max(0.0)
}

/// Round to the nearest integer, with halves going towards positive infinity.
///
/// `f64::round` rounds halves away from zero, which differs for negative
/// halves (`-2.5` becomes `-3`). Quoted areas and totals use half-up.
/// Values just below a half round down, and integers beyond `2^52` are
/// returned unchanged.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_valid_numbers() {
        assert_eq!(coerce_input("3"), 3.0);
        assert_eq!(coerce_input("  4.25 "), 4.25);
        assert_eq!(coerce_input("-7"), -7.0);
    }

    #[test]
    fn test_coerce_invalid_to_zero() {
        assert_eq!(coerce_input(""), 0.0);
        assert_eq!(coerce_input("12ft"), 0.0);
        assert_eq!(coerce_input("NaN"), 0.0);
        assert_eq!(coerce_input("inf"), 0.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(2.0), 2.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(11.5), 12.0);
        assert_eq!(round_half_up(11.49), 11.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.6), -2.0);
    }

    #[test]
    fn test_round_half_up_edges() {
        // largest double below 0.5
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(-0.49999999999999994), 0.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        let big = 4_503_599_627_370_497.0; // 2^52 + 1
        assert_eq!(round_half_up(big), big);
        assert_eq!(round_half_up(-big), -big);
    }
}
