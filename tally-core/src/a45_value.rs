use crate::config::DEFAULT_SIGNIFICANT_DIGITS;
use std::fmt;

/// A successful result. Always finite when it comes from `evaluate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value(pub f64);

/// Rounds to 10 significant digits, or to the formatter's precision:
/// `format!("{:.4}", v)` keeps 4. The alternate form (`{:#}`) never uses
/// e notation, so the text can be evaluated again.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f
            .precision()
            .unwrap_or(DEFAULT_SIGNIFICANT_DIGITS)
            .clamp(1, 17);
        f.write_str(&format_significant(self.0, digits, f.alternate()))
    }
}

fn format_significant(x: f64, digits: usize, positional_only: bool) -> String {
    // Also turns `-0` into `0`.
    if x == 0.0 {
        return "0".to_owned();
    }
    if !x.is_finite() {
        return format!("{x}");
    }
    // Let the standard library do the rounding, then read back the exponent.
    let sci = format!("{:.*e}", digits - 1, x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };
    let digits = digits as i32;
    if (-6..digits).contains(&exp) {
        let decimals = (digits - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, x)).to_owned()
    } else if positional_only {
        positional(strip_zeros(mantissa), exp)
    } else {
        format!("{}e{}", strip_zeros(mantissa), exp)
    }
}

/// Shift the point of a rounded mantissa: `2.5`, `-7` -> `0.00000025` and
/// `1.5`, `12` -> `1500000000000`.
fn positional(mantissa: &str, exp: i32) -> String {
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    // Digits before the point.
    let whole = exp + 1;
    if whole <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(whole.unsigned_abs() as usize))
    } else if whole as usize >= digits.len() {
        format!("{sign}{digits}{}", "0".repeat(whole as usize - digits.len()))
    } else {
        let (int, frac) = digits.split_at(whole as usize);
        format!("{sign}{int}.{frac}")
    }
}

/// `1.2500` -> `1.25`, `3.000` -> `3`
fn strip_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}
