//! Display-cell formatting for report tables.

/// Placeholder for a metric the ride did not carry.
pub const MISSING: &str = "-";

/// Format with a fixed number of decimal places.
pub fn decimal(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Format as a whole number with thousands separators.
pub fn grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number without trailing zeros, `205` not `205.0`.
pub fn trimmed(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Fixed-decimal cell, dash when absent.
pub fn optional_decimal(value: Option<f64>, places: usize) -> String {
    value.map_or(MISSING.to_string(), |v| decimal(v, places))
}

/// Trimmed numeric cell, dash when absent.
pub fn optional_trimmed(value: Option<f64>) -> String {
    value.map_or(MISSING.to_string(), trimmed)
}

/// Text cell, dash when absent.
pub fn optional_text(value: Option<&str>) -> String {
    value.map_or(MISSING.to_string(), str::to_string)
}
