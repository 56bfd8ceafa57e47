//! Utility functions and helpers

use rust_decimal::Decimal;

/// Format an integer with thousands separators
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Format a whole-rupiah amount, e.g. `Rp 1.250.000` or `-Rp 3.000`
pub fn format_rupiah(amount: i64, symbol: &str, separator: &str) -> String {
    let body = format_number(amount.unsigned_abs(), separator);
    if amount < 0 {
        format!("-{} {}", symbol, body)
    } else {
        format!("{} {}", symbol, body)
    }
}

/// Quantity rounded to `dp` places with trailing zeros dropped
pub fn format_decimal(value: Decimal, dp: u32) -> String {
    value.round_dp(dp).normalize().to_string()
}
