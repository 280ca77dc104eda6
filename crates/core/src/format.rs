//! Render-time formatting helpers.
//!
//! The document model stores raw numbers; every currency and measurement
//! value is formatted here, at the renderer boundary, with exactly two
//! decimal places and en-US thousands grouping.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a decimal with two decimal places and comma grouping,
/// e.g. `18000` -> `"18,000.00"`.
pub fn grouped_2dp(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), format!("{frac:0<2}")),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 3);
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// File-name stem derived from a quote number: ASCII alphanumerics and
/// `-` pass through, every other character becomes `_`.
pub fn sanitize_file_stem(quote_number: &str) -> String {
    quote_number
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' { ch } else { '_' })
        .collect()
}

/// Rate-validity display format: `MM/DD/YYYY HH:mm`, 24-hour clock.
pub fn rate_validity(value: DateTime<Utc>) -> String {
    value.format("%m/%d/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::{grouped_2dp, rate_validity, sanitize_file_stem};

    #[test]
    fn groups_thousands_and_pads_decimals() {
        assert_eq!(grouped_2dp(Decimal::new(18_000, 0)), "18,000.00");
        assert_eq!(grouped_2dp(Decimal::new(2_300, 2)), "23.00");
        assert_eq!(grouped_2dp(Decimal::new(1_234_567_5, 1)), "1,234,567.50");
        assert_eq!(grouped_2dp(Decimal::ZERO), "0.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(grouped_2dp(Decimal::new(12_345, 3)), "12.35");
        assert_eq!(grouped_2dp(Decimal::new(-9_995, 3)), "-10.00");
    }

    #[test]
    fn keeps_hyphens_in_file_stems() {
        assert_eq!(sanitize_file_stem("Q-2025-11-36"), "Q-2025-11-36");
    }

    #[test]
    fn replaces_non_alphanumerics_in_file_stems() {
        assert_eq!(sanitize_file_stem("Q/2025#11"), "Q_2025_11");
        assert_eq!(sanitize_file_stem("Q 2025 (rev)"), "Q_2025__rev_");
    }

    #[test]
    fn rate_validity_uses_24_hour_clock() {
        let at = chrono::Utc.with_ymd_and_hms(2025, 11, 3, 17, 5, 0).unwrap();
        assert_eq!(rate_validity(at), "11/03/2025 17:05");
    }
}
