use std::fmt;

const SIGNIFICANT_DIGITS: usize = 6;

/// Formats a coordinate or length the way a default C++ output stream does:
/// six significant digits, no trailing zeros, exponent form only for very
/// large or very small magnitudes.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value == 0.0 {
            return f.write_str("0");
        }
        if !value.is_finite() {
            return write!(f, "{value}");
        }

        // Rounding to the significant digits first decides the exponent
        let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return write!(f, "{value}");
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return write!(f, "{value}");
        };

        if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
        } else {
            let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
            f.write_str(trim_fraction(&format!("{value:.decimals$}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64) -> String {
        Num(value).to_string()
    }

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(100.0), "100");
        assert_eq!(fmt(-3.0), "-3");
        assert_eq!(fmt(600.0), "600");
    }

    #[test]
    fn six_significant_digits() {
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(99.2283), "99.2283");
        assert_eq!(fmt(329.309_126_455), "329.309");
        assert_eq!(fmt(99.999_999_9), "100");
        assert_eq!(fmt(-0.25), "-0.25");
    }

    #[test]
    fn exponent_form_at_extremes() {
        assert_eq!(fmt(1_234_567.0), "1.23457e+06");
        assert_eq!(fmt(0.0001), "0.0001");
        assert_eq!(fmt(0.00001), "1e-05");
    }
}
