//! C `%g` number formatting
//!
//! The mesh importer reads numbers the way the legacy tools printed
//! them, so floats are rendered with six significant digits, trailing
//! zeros stripped, and a two-digit signed exponent when the magnitude is
//! very small or very large.

const PRECISION: i32 = 6;

/// Format a value the way `printf("%g", value)` does
pub fn format_g(value: f64) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent must come from the already-rounded representation:
    // 999999.5 prints as 1e+06, not 1000000.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Left-justify `text` to at least `width` bytes, like `%-*s`.
///
/// Width counts UTF-8 bytes, not characters.
pub(crate) fn pad_bytes(text: &str, width: usize) -> String {
    let mut padded = String::with_capacity(text.len().max(width));
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(text.len())));
    padded
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(2.0), "2");
        assert_eq!(format_g(-30.0), "-30");
        assert_eq!(format_g(100000.0), "100000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(-3.25), "-3.25");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.1f32 as f64), "0.1");
        assert_eq!(format_g(33.333332f32 as f64), "33.3333");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(format_g(1000000.0), "1e+06");
        assert_eq!(format_g(123456789.0), "1.23457e+08");
        assert_eq!(format_g(0.00001), "1e-05");
        assert_eq!(format_g(-2.5e-7), "-2.5e-07");
        assert_eq!(format_g(1e100), "1e+100");
    }

    #[test]
    fn test_rounding_bumps_exponent() {
        assert_eq!(format_g(999999.5), "1e+06");
        assert_eq!(format_g(0.000099999996), "0.0001");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(-0.0), "-0");
        assert_eq!(format_g(f64::INFINITY), "inf");
        assert_eq!(format_g(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_g(f64::NAN), "nan");
    }

    #[test]
    fn test_pad_bytes() {
        assert_eq!(pad_bytes("Still", 10), "Still     ");
        assert_eq!(pad_bytes("VeryLongSequenceName", 10), "VeryLongSequenceName");
        assert_eq!(pad_bytes("\u{fc}ber", 10), "\u{fc}ber     ");
        assert_eq!(pad_bytes("\u{fc}ber", 10).len(), 10);
    }
}
