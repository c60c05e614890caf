//! Statement amount cleaning
//!
//! Handles the usual export noise:
//!   $1,234.56     -1,234.56     (45.00)     € 12.50

/// Parse a statement amount, stripping currency symbols, thousands separators
/// and whitespace. Accounting-style parentheses mean negative.
///
/// Only `,` is a thousands separator and `.` is always the decimal point, so
/// a European `1.234,56` reads as `1.23456`.
///
/// Returns `None` for anything that does not leave a finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (negated, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negated { -value.abs() } else { value })
}
