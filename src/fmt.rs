use chrono::{NaiveDateTime, NaiveTime};

/// Normalize a source time-of-day string to %H:%M.
///
/// Sources disagree on rendering: some carry bare times ("9:00 AM",
/// "14:30:00"), some full timestamps. Unparsable input yields an empty
/// string rather than an error.
pub fn normalize_time(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(raw, fmt) {
            return t.format("%H:%M").to_string();
        }
    }
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %I:%M %p", "%m/%d/%Y %H:%M"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%H:%M").to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_time_bare_times() {
        assert_eq!(normalize_time("14:30:00"), "14:30");
        assert_eq!(normalize_time("9:05"), "09:05");
        assert_eq!(normalize_time("9:00 AM"), "09:00");
        assert_eq!(normalize_time("1:30PM"), "13:30");
    }

    #[test]
    fn test_normalize_time_timestamps() {
        assert_eq!(normalize_time("2025-01-08 10:00:00"), "10:00");
        assert_eq!(normalize_time("01/08/2025 2:00 PM"), "14:00");
    }

    #[test]
    fn test_normalize_time_unparsable_is_empty() {
        assert_eq!(normalize_time(""), "");
        assert_eq!(normalize_time("   "), "");
        assert_eq!(normalize_time("TBA"), "");
        assert_eq!(normalize_time("25:99"), "");
    }
}
