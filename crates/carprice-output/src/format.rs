//! Display formatting for predicted prices.

/// Currency prefix on the single-record display string.
pub const CURRENCY_PREFIX: &str = "SAR";

/// Rounds a raw prediction to two decimal places.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a prediction with fixed two-decimal rounding and thousands
/// separators: `45231.5` becomes `"45,231.50"`.
///
/// Deterministic and idempotent; no state is involved.
pub fn format_price(value: f64) -> String {
    let rounded = round_price(value);
    let negative = rounded < 0.0;
    let cents = (rounded.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!(
        "{}{grouped}.{fraction:02}",
        if negative { "-" } else { "" }
    )
}

/// The user-facing display string: currency prefix plus formatted value.
pub fn display_price(value: f64) -> String {
    format!("{CURRENCY_PREFIX} {}", format_price(value))
}
