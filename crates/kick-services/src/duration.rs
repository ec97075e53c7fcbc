//! Human readable downtime durations

/// Format a number of seconds as `"{h}h {m}m {s}s"`
///
/// Hours are not wrapped into days. A negative duration means the caller
/// passed an end before its start and is reported as an invalid range.
pub fn format_duration(duration_seconds: i64) -> String {
    if duration_seconds < 0 {
        return "0h 0m 0s (Invalid Date Range)".to_string();
    }

    let hours = duration_seconds / 3600;
    let remainder = duration_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;

    format!("{}h {}m {}s", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0h 0m 0s");
        assert_eq!(format_duration(59), "0h 0m 59s");
        assert_eq!(format_duration(3661), "1h 1m 1s");
        assert_eq!(format_duration(26 * 3600), "26h 0m 0s");
        assert_eq!(format_duration(3 * 86_400 + 125), "72h 2m 5s");
    }

    #[test]
    fn test_format_negative_duration() {
        assert_eq!(format_duration(-1), "0h 0m 0s (Invalid Date Range)");
    }
}
