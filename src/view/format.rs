//! Number and time formatting for display

use chrono::DateTime;

/// Group digits in threes with commas: `1000000` -> `"1,000,000"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Format an upstream `updated` timestamp (ms since epoch) as UTC
pub fn format_updated(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}
