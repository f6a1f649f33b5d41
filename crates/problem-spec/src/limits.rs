//! Lenient numeric parsing for limit strings found on problem pages.
//!
//! Pages print limits with trailing units or punctuation (`"1.5s"`,
//! `"256MB"`), so only the leading numeric prefix of a token is read.

use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?(\d*)(?:\.(\d*))?").unwrap());

static INTEGER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?(\d+)").unwrap());

/// Convert a decimal seconds token to whole milliseconds.
///
/// Digits past the third fractional place are truncated, never rounded:
/// `"0.3339"` is 333 ms. The conversion is done on the decimal digits, so
/// `"1.001"` is exactly 1001 ms.
pub fn seconds_to_millis(token: &str) -> Option<u64> {
    let caps = DECIMAL_PREFIX_RE.captures(token.trim())?;
    let whole = caps.get(1).map_or("", |m| m.as_str());
    let frac = caps.get(2).map_or("", |m| m.as_str());
    if whole.is_empty() && frac.is_empty() {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut millis_digits: String = frac.chars().take(3).collect();
    while millis_digits.len() < 3 {
        millis_digits.push('0');
    }
    let frac_millis: u64 = millis_digits.parse().ok()?;

    whole.checked_mul(1000)?.checked_add(frac_millis)
}

/// Leading non-negative integer of a token, ignoring any fractional part or
/// unit suffix.
pub fn leading_integer(token: &str) -> Option<u64> {
    let caps = INTEGER_PREFIX_RE.captures(token.trim())?;
    caps.get(1)?.as_str().parse().ok()
}

/// Largest value in a candidate list, or `None` if the list is empty or
/// holds a non-finite value.
pub fn max_candidate(candidates: &[f64]) -> Option<f64> {
    if candidates.iter().any(|c| !c.is_finite()) {
        return None;
    }
    candidates.iter().copied().reduce(f64::max)
}
