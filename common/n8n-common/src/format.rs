//! Timestamp, duration and status formatting
//!
//! All helpers return the `N/A` placeholder for missing or unparsable input.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::types::NOT_AVAILABLE;

/// Parse an ISO-8601 timestamp as n8n emits it
///
/// RFC 3339 (`Z` or explicit offset) is the normal case; timestamps without
/// an offset are read as UTC.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Shorten an ISO timestamp for display: `2024-01-05T10:11:12.345Z` -> `2024-01-05 10:11:12`
pub fn format_timestamp(ts: Option<&str>) -> String {
    match ts {
        Some(ts) if !ts.is_empty() => ts.chars().take(19).collect::<String>().replace('T', " "),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Elapsed time between two timestamps, rendered with [`format_elapsed`]
pub fn format_duration(start: Option<&str>, stop: Option<&str>) -> String {
    let (Some(start), Some(stop)) = (start, stop) else {
        return NOT_AVAILABLE.to_string();
    };
    match (parse_timestamp(start), parse_timestamp(stop)) {
        (Some(start), Some(stop)) => format_elapsed(stop - start),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render a duration: `<1s` as ms, `<60s` as seconds with one decimal, else `Xm Ys`
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.num_microseconds().unwrap_or(i64::MAX);
    let total_seconds = micros as f64 / 1_000_000.0;

    if total_seconds < 1.0 {
        format!("{}ms", elapsed.num_milliseconds())
    } else if total_seconds < 60.0 {
        format!("{:.1}s", total_seconds)
    } else {
        let seconds = elapsed.num_seconds();
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}

/// First `max` characters of `text` (never splits a character)
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Single-character marker for an execution status
pub fn status_icon(status: &str) -> &'static str {
    match status {
        "success" => "✓",
        "error" => "✗",
        "waiting" => "⏳",
        "running" => "▶",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dur(start: &str, stop: &str) -> String {
        format_duration(Some(start), Some(stop))
    }

    #[test]
    fn test_sub_second_renders_milliseconds() {
        assert_eq!(
            dur("2024-01-01T00:00:00.000Z", "2024-01-01T00:00:00.250Z"),
            "250ms"
        );
        assert_eq!(dur("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z"), "0ms");
    }

    #[test]
    fn test_sub_minute_renders_one_decimal() {
        assert_eq!(
            dur("2024-01-01T00:00:00.000Z", "2024-01-01T00:00:01.500Z"),
            "1.5s"
        );
        assert_eq!(
            dur("2024-01-01T00:00:00.000Z", "2024-01-01T00:00:59.000Z"),
            "59.0s"
        );
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(
            dur("2024-01-01T00:00:00.000Z", "2024-01-01T00:01:00.000Z"),
            "1m 0s"
        );
        assert_eq!(
            dur("2024-01-01T00:00:00.000Z", "2024-01-01T00:02:05.900Z"),
            "2m 5s"
        );
    }

    #[test]
    fn test_tiers_are_monotonic() {
        let start = "2024-01-01T00:00:00.000Z";
        let stops = [
            ("2024-01-01T00:00:00.999Z", "ms"),
            ("2024-01-01T00:00:01.000Z", "s"),
            ("2024-01-01T00:00:59.900Z", "s"),
            ("2024-01-01T00:01:00.000Z", "m"),
            ("2024-01-01T01:00:00.000Z", "m"),
        ];
        for (stop, tier) in stops {
            let rendered = dur(start, stop);
            match tier {
                "ms" => assert!(rendered.ends_with("ms"), "{rendered}"),
                "s" => {
                    assert!(rendered.ends_with('s') && !rendered.ends_with("ms"));
                    assert!(rendered.contains('.'), "{rendered}");
                }
                _ => assert!(rendered.contains("m "), "{rendered}"),
            }
        }
    }

    #[test]
    fn test_offsets_are_honoured() {
        assert_eq!(
            dur("2024-01-01T01:00:00+01:00", "2024-01-01T00:00:30Z"),
            "30.0s"
        );
    }

    #[test]
    fn test_naive_timestamps_read_as_utc() {
        assert_eq!(dur("2024-01-01T00:00:00", "2024-01-01T00:00:00.5"), "500ms");
    }

    #[test]
    fn test_missing_or_invalid_input_is_placeholder() {
        assert_eq!(format_duration(None, Some("2024-01-01T00:00:00Z")), "N/A");
        assert_eq!(format_duration(Some("2024-01-01T00:00:00Z"), None), "N/A");
        assert_eq!(dur("yesterday", "2024-01-01T00:00:00Z"), "N/A");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(Some("2024-03-05T10:11:12.345Z")),
            "2024-03-05 10:11:12"
        );
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some("")), "N/A");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 10), "hi");
        assert_eq!(truncate("✓✗⏳", 2), "✓✗");
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(status_icon("success"), "✓");
        assert_eq!(status_icon("error"), "✗");
        assert_eq!(status_icon("waiting"), "⏳");
        assert_eq!(status_icon("running"), "▶");
        assert_eq!(status_icon("canceled"), "?");
    }
}
