// src/domain/format.rs

/// Formats a whole number with comma thousands separators (`1234567` → `1,234,567`).
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates toward zero, then formats like [`format_thousands`].
pub fn format_amount(value: f64) -> String {
    format_thousands(value.trunc() as i64)
}
