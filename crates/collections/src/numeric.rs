//! Number formatting helpers.

/// Splits the digits of `value` into groups of three with `separator`.
///
/// Values with fewer than four digits are returned unchanged.
///
/// ```
/// # use game_collections::format_thousands;
/// assert_eq!(format_thousands(333, "."), "333");
/// assert_eq!(format_thousands(12_345_678_901, "."), "12.345.678.901");
/// assert_eq!(format_thousands(-1_500, ","), "-1,500");
/// ```
pub fn format_thousands(value: i64, separator: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };

    if digits.len() < 4 {
        return format!("{sign}{digits}");
    }

    let head = digits.len() % 3;
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
    formatted.push_str(sign);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - head) % 3 == 0 {
            formatted.push_str(separator);
        }
        formatted.push(digit);
    }
    formatted
}
