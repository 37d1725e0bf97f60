//! Textual form of a result, written back into the buffer after `=`
//!
//! Digits are the shortest string that round-trips to the same `f64`. Layout
//! matches how browsers stringify numbers: plain decimals for magnitudes in
//! `[1e-7, 1e21)` and `d.ddde±x` outside that range, so `0.1 + 0.2` shows as
//! `0.30000000000000004` and `1e21` as `1e+21`.

/// Largest decimal exponent (exclusive) printed without an exponent part
const MAX_PLAIN_EXPONENT: i32 = 21;
/// Smallest decimal exponent (exclusive) printed without an exponent part
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Formats a number for the expression buffer
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Covers -0 as well
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let body = layout(&digits, exponent + 1);

    if value.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// Lays out significant `digits` with the decimal point after `point`
/// digits (negative means leading zeros after the point).
fn layout(digits: &str, point: i32) -> String {
    let len = digits.len() as i32;

    if len <= point && point <= MAX_PLAIN_EXPONENT {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= MAX_PLAIN_EXPONENT {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if MIN_PLAIN_EXPONENT < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let exp = point - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exp.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exp.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(1000.0), "1000");
    }

    #[test]
    fn test_format_zero_and_negative_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(123.456), "123.456");
        assert_eq!(format_number(-0.25), "-0.25");
    }

    #[test]
    fn test_format_shortest_roundtrip() {
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_small_magnitudes() {
        assert_eq!(format_number(0.000_001_5), "0.0000015");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.25e-10), "1.25e-10");
    }

    #[test]
    fn test_format_large_magnitudes() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(2.5e25), "2.5e+25");
        assert_eq!(format_number(-1e300), "-1e+300");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_plain_output_reparses() {
        for value in [14.0, 3.5, 0.1 + 0.2, 1e20, 0.000_001_5, 987_654.321] {
            let text = format_number(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{text}");
        }
    }
}
