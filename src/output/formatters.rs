//! Reusable formatting utilities for CLI output
//!
//! Timestamps, durations and tag lists shared by the display models.

use chrono::{DateTime, Local, Utc};

/// Placeholder for absent values
pub const NONE: &str = "--";

/// Format a UTC timestamp in local time, `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NONE.to_string(),
    }
}

/// Format a timestamp carried as text (RFC 3339 or epoch milliseconds).
pub fn format_timestamp_str(ts: Option<&str>) -> String {
    let Some(ts) = ts else {
        return NONE.to_string();
    };
    if let Ok(dt) = ts.parse::<DateTime<Utc>>() {
        return format_timestamp(Some(&dt));
    }
    if let Some(dt) = ts.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis) {
        return format_timestamp(Some(&dt));
    }
    ts.to_string()
}

/// Format a duration in seconds as `2h 15m 30s`.
///
/// Returns the placeholder for absent or zero durations.
pub fn format_duration_seconds(seconds: Option<i64>) -> String {
    let secs = match seconds {
        Some(s) if s > 0 => s,
        _ => return NONE.to_string(),
    };

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Join tags for a table cell, showing at most `max` of them.
pub fn format_tags(tags: Option<&[String]>, max: usize) -> String {
    let tags = match tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => return NONE.to_string(),
    };
    let shown = tags.iter().take(max).cloned().collect::<Vec<_>>().join(", ");
    if tags.len() > max {
        format!("{} (+{})", shown, tags.len() - max)
    } else {
        shown
    }
}

/// Truncate to `max_len` characters with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First line of a possibly multi-line message.
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_none() {
        assert_eq!(format_timestamp(None), "--");
        assert_eq!(format_timestamp_str(None), "--");
    }

    #[test]
    fn test_format_timestamp_str_variants() {
        let rfc = format_timestamp_str(Some("2025-01-15T12:00:00Z"));
        assert!(rfc.starts_with("2025-01-1"));

        let millis = format_timestamp_str(Some("1736942400000"));
        assert!(millis.starts_with("2025-01-1"));

        assert_eq!(format_timestamp_str(Some("yesterday")), "yesterday");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration_seconds(Some(3661)), "1h 1m 1s");
        assert_eq!(format_duration_seconds(Some(125)), "2m 5s");
        assert_eq!(format_duration_seconds(Some(45)), "45s");
        assert_eq!(format_duration_seconds(Some(0)), "--");
        assert_eq!(format_duration_seconds(None), "--");
    }

    #[test]
    fn test_format_tags() {
        let tags = vec!["env:prod".to_string(), "team:a".to_string(), "x:y".to_string()];
        assert_eq!(format_tags(Some(&tags), 5), "env:prod, team:a, x:y");
        assert_eq!(format_tags(Some(&tags), 2), "env:prod, team:a (+1)");
        assert_eq!(format_tags(Some(&[]), 2), "--");
        assert_eq!(format_tags(None, 2), "--");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long message", 10), "a very ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }
}
