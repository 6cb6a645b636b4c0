mod config_cmd;
mod fridge;
mod prefs;
mod recipe;
mod recommend;
mod sync_cmd;

pub use config_cmd::ConfigCommand;
pub use fridge::FridgeCommand;
pub use prefs::PrefsCommand;
pub use recipe::RecipeCommand;
pub use recommend::RecommendCommand;
pub use sync_cmd::{StatusCommand, SyncCommand};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a YYYY-MM-DD date as midnight UTC.
pub(crate) fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", value))
}

/// `now` plus `days` whole days, rejecting offsets outside chrono's range.
pub(crate) fn days_from(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, String> {
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| format!("Invalid --expires-in '{}': date out of range", days))
}

/// Truncates to `width` characters, not bytes.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_days_from() {
        let now = parse_date("2024-03-15").unwrap();
        assert_eq!(days_from(now, 3).unwrap(), parse_date("2024-03-18").unwrap());
        assert_eq!(days_from(now, -1).unwrap(), parse_date("2024-03-14").unwrap());

        let err = days_from(now, 100_000_000).unwrap_err();
        assert!(err.contains("--expires-in"));
        assert!(days_from(now, i64::MAX).is_err());
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("番茄炒蛋", 10), "番茄炒蛋");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
