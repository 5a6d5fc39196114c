//! Presentation helpers shared by the CLI and web views

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Relative age of a headline, e.g. `"3 hours ago"`.
///
/// Timestamps in the future count as zero seconds old.
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - published).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{s} seconds ago"),
        s if s < 3_600 => format!("{} minutes ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3_600),
        s => format!("{} days ago", s / 86_400),
    }
}

/// USD amount with thousands separators: `$65,000`, `$0.38`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(3).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(f) => format!("{sign}${grouped}.{f}"),
        None => format!("{sign}${grouped}"),
    }
}

/// 24h change with two decimals, e.g. `"2.50%"`
pub fn format_change(change: Decimal) -> String {
    format!("{:.2}%", change.round_dp(2))
}

/// Direction arrow for a 24h change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Zero counts as up
    pub fn of(change: Decimal) -> Self {
        if change >= Decimal::ZERO { Self::Up } else { Self::Down }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(42), now), "42 seconds ago");
        assert_eq!(time_ago(now - Duration::seconds(125), now), "2 minutes ago");
        assert_eq!(time_ago(now - Duration::minutes(90), now), "1 hours ago");
        assert_eq!(time_ago(now - Duration::hours(50), now), "2 days ago");
        assert_eq!(time_ago(now + Duration::minutes(5), now), "0 seconds ago");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(65000)), "$65,000");
        assert_eq!(format_usd(dec!(97500.50)), "$97,500.5");
        assert_eq!(format_usd(dec!(0.38)), "$0.38");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.891");
        assert_eq!(format_usd(dec!(999)), "$999");
    }

    #[test]
    fn test_change_and_trend() {
        assert_eq!(format_change(dec!(2.5)), "2.50%");
        assert_eq!(format_change(dec!(-1.126)), "-1.13%");
        assert_eq!(Trend::of(dec!(0)), Trend::Up);
        assert_eq!(Trend::of(dec!(-0.01)), Trend::Down);
    }
}
