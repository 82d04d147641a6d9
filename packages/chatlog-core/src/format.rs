//! Display formatting for conversation metadata

use chrono::{DateTime, Local, TimeZone};

/// Format a Unix timestamp (seconds, possibly fractional) in the given zone.
///
/// Returns `None` for values outside chrono's representable range.
pub fn format_timestamp<Tz>(ts: f64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor() as i64;
    let nanos = ((ts - ts.floor()) * 1e9) as u32;
    let utc = DateTime::from_timestamp(secs, nanos.min(999_999_999))?;
    Some(utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
}

/// Format a conversation's last update time in the local zone.
pub fn format_update_time(ts: Option<f64>) -> Option<String> {
    ts.and_then(|ts| format_timestamp(ts, &Local))
}

/// "1 message", "12 messages"; `None` when the server sent no count.
pub fn message_count_label(count: Option<u32>) -> Option<String> {
    count.map(|n| match n {
        1 => "1 message".to_string(),
        n => format!("{} messages", n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_timestamp_utc() {
        assert_eq!(
            format_timestamp(1_700_000_000.0, &Utc).as_deref(),
            Some("2023-11-14 22:13")
        );
    }

    #[test]
    fn test_format_timestamp_fractional() {
        assert_eq!(
            format_timestamp(1_700_000_000.75, &Utc).as_deref(),
            Some("2023-11-14 22:13")
        );
    }

    #[test]
    fn test_format_timestamp_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp(1_700_000_000.0, &tz).as_deref(),
            Some("2023-11-15 00:13")
        );
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(f64::NAN, &Utc), None);
        assert_eq!(format_timestamp(f64::INFINITY, &Utc), None);
        assert_eq!(format_timestamp(1e20, &Utc), None);
    }

    #[test]
    fn test_format_update_time_missing() {
        assert_eq!(format_update_time(None), None);
        assert!(format_update_time(Some(0.0)).is_some());
    }

    #[test]
    fn test_message_count_label() {
        assert_eq!(message_count_label(None), None);
        assert_eq!(message_count_label(Some(0)).as_deref(), Some("0 messages"));
        assert_eq!(message_count_label(Some(1)).as_deref(), Some("1 message"));
        assert_eq!(message_count_label(Some(12)).as_deref(), Some("12 messages"));
    }
}
