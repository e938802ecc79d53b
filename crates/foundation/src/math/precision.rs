//! Precision policies.
//!
//! Screen-space output (SVG path data, legend labels) is emitted with a fixed
//! number of fractional digits so identical inputs always serialize to
//! identical text.

/// Fractional digits kept for screen coordinates.
pub const SCREEN_DIGITS: u32 = 3;

/// Canonicalize a floating-point value for deterministic output.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Round to `digits` fractional digits, canonicalizing the result.
pub fn round_to_digits(v: f64, digits: u32) -> f64 {
    let k = 10f64.powi(digits as i32);
    canonical_f64((v * k).round() / k)
}

#[cfg(test)]
mod tests {
    use super::{canonical_f64, round_to_digits};

    #[test]
    fn canonicalizes_negative_zero() {
        assert_eq!(canonical_f64(-0.0), 0.0);
        assert!(canonical_f64(-0.0).is_sign_positive());
    }

    #[test]
    fn nan_stays_nan() {
        assert!(canonical_f64(f64::NAN).is_nan());
    }

    #[test]
    fn rounds_and_drops_negative_zero() {
        assert_eq!(round_to_digits(1.23456, 3), 1.235);
        assert_eq!(round_to_digits(-0.0001, 3), 0.0);
        assert!(round_to_digits(-0.0001, 3).is_sign_positive());
    }
}
