//! Float, decimal and integer rendering

use crate::config::{DisplayConfig, FloatFmt};

/// Magnitudes at or above this switch mixed mode to exponential notation
const SCIENTIFIC_BOUND: f64 = 999_999.0;
/// Magnitudes below this switch mixed mode to exponential notation
const SMALL_BOUND: f64 = 0.000_001;
/// Fixed-precision renderings longer than this fall back to exponential
const MAX_FIXED_LEN: usize = 19;

/// Render an integer with the configured digit grouping
pub(crate) fn format_integer(digits: &str, config: &DisplayConfig) -> String {
    localize(digits, config)
}

/// Render a float according to precision and the mixed/full mode
pub(crate) fn format_float(v: f64, single: bool, config: &DisplayConfig) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let s = match (config.float_precision, config.fmt_float) {
        (Some(precision), _) => {
            let fixed = format!("{v:.precision$}");
            if fixed.len() > MAX_FIXED_LEN {
                format!("{v:.precision$e}")
            } else {
                fixed
            }
        }
        (None, FloatFmt::Full) => {
            let s = shortest(v, single);
            if s.contains('.') {
                s
            } else {
                format!("{s}.0")
            }
        }
        (None, FloatFmt::Mixed) => mixed(v, single, config),
    };
    localize(&s, config)
}

fn shortest(v: f64, single: bool) -> String {
    if single {
        (v as f32).to_string()
    } else {
        v.to_string()
    }
}

fn mixed(v: f64, single: bool, config: &DisplayConfig) -> String {
    let abs = v.abs();
    if v.fract() == 0.0 && abs < SCIENTIFIC_BOUND {
        return format!("{v:.1}");
    }

    let plain = shortest(v, single);
    if plain.len() > 9 {
        // digit grouping and exponents do not mix
        if (abs < SMALL_BOUND || abs > SCIENTIFIC_BOUND) && config.thousands_separator.is_none() {
            format!("{v:.4e}")
        } else {
            let s = format!("{v:.6}");
            if config.trim_decimal_zeros {
                trim_zeros(&s, true)
            } else {
                s
            }
        }
    } else if v.fract() == 0.0 {
        format!("{v:e}")
    } else {
        plain
    }
}

/// Strip trailing fractional zeros; `keep_one` leaves `1.0` rather than `1`
fn trim_zeros(s: &str, keep_one: bool) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0');
    match trimmed.strip_suffix('.') {
        Some(int) if keep_one => format!("{int}.0"),
        Some(int) => int.to_string(),
        None => trimmed.to_string(),
    }
}

/// Render a fixed-point decimal mantissa with `scale` fractional digits
pub(crate) fn format_decimal(mantissa: i128, scale: usize, config: &DisplayConfig) -> String {
    let digits = mantissa.unsigned_abs().to_string();
    let digits = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (int, frac) = digits.split_at(digits.len() - scale);
    let sign = if mantissa < 0 { "-" } else { "" };

    let s = if frac.is_empty() {
        format!("{sign}{int}")
    } else if config.trim_decimal_zeros {
        trim_zeros(&format!("{sign}{int}.{frac}"), false)
    } else {
        format!("{sign}{int}.{frac}")
    };
    localize(&s, config)
}

/// Apply the thousands and decimal separators to a plain numeric string
fn localize(s: &str, config: &DisplayConfig) -> String {
    if config.thousands_separator.is_none() && config.decimal_separator == '.' {
        return s.to_string();
    }

    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (mantissa, exponent) = match unsigned.find('e') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };

    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    match config.thousands_separator {
        Some(sep) if exponent.is_empty() => out.push_str(&group_digits(int, sep)),
        _ => out.push_str(int),
    }
    if let Some(frac) = frac {
        out.push(config.decimal_separator);
        out.push_str(frac);
    }
    out.push_str(exponent);
    out
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DisplayConfig {
        DisplayConfig::default()
    }

    #[test]
    fn test_mixed_mode() {
        let cfg = config();
        assert_eq!(format_float(1.0, false, &cfg), "1.0");
        assert_eq!(format_float(0.5, false, &cfg), "0.5");
        assert_eq!(format_float(-2.25, false, &cfg), "-2.25");
        assert_eq!(format_float(std::f64::consts::PI, false, &cfg), "3.141593");
        assert_eq!(format_float(1e6, false, &cfg), "1e6");
        assert_eq!(format_float(1e-8, false, &cfg), "1.0000e-8");
        assert_eq!(format_float(123456789.5, false, &cfg), "1.2346e8");
        assert_eq!(format_float(f64::NAN, false, &cfg), "NaN");
        assert_eq!(format_float(f64::NEG_INFINITY, false, &cfg), "-inf");
    }

    #[test]
    fn test_single_precision_uses_shortest_f32_repr() {
        let cfg = config();
        assert_eq!(format_float(0.1f32 as f64, true, &cfg), "0.1");
    }

    #[test]
    fn test_fixed_precision() {
        let mut cfg = config();
        cfg.float_precision = Some(15);
        assert_eq!(
            format_float(std::f64::consts::PI, false, &cfg),
            "3.141592653589793"
        );
        cfg.float_precision = Some(3);
        assert_eq!(format_float(std::f64::consts::E, false, &cfg), "2.718");
        assert_eq!(format_float(1.0, false, &cfg), "1.000");
    }

    #[test]
    fn test_full_mode() {
        let mut cfg = config();
        cfg.fmt_float = FloatFmt::Full;
        assert_eq!(format_float(1e-8, false, &cfg), "0.00000001");
        assert_eq!(format_float(1e6, false, &cfg), "1000000.0");
        assert_eq!(
            format_float(std::f64::consts::PI, false, &cfg),
            "3.141592653589793"
        );
    }

    #[test]
    fn test_separators() {
        let mut cfg = config();
        cfg.thousands_separator = Some('.');
        cfg.decimal_separator = ',';
        assert_eq!(format_integer("-1234567", &cfg), "-1.234.567");
        assert_eq!(format_float(123456789.5, false, &cfg), "123.456.789,5");
        assert_eq!(format_float(1234.5, false, &cfg), "1.234,5");

        cfg.thousands_separator = None;
        assert_eq!(format_float(1e-8, false, &cfg), "1,0000e-8");
        assert_eq!(format_integer("1234", &cfg), "1234");
    }

    #[test]
    fn test_decimal() {
        let mut cfg = config();
        assert_eq!(format_decimal(12345, 2, &cfg), "123.45");
        assert_eq!(format_decimal(-5, 3, &cfg), "-0.005");
        assert_eq!(format_decimal(1500, 3, &cfg), "1.5");
        assert_eq!(format_decimal(1000, 3, &cfg), "1");
        assert_eq!(format_decimal(42, 0, &cfg), "42");

        cfg.trim_decimal_zeros = false;
        assert_eq!(format_decimal(1500, 3, &cfg), "1.500");

        cfg.thousands_separator = Some(',');
        assert_eq!(format_decimal(123456700, 2, &cfg), "1,234,567.00");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ','), "1");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1234", ','), "1,234");
        assert_eq!(group_digits("123456", '_'), "123_456");
    }
}
