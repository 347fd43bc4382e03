/// Convert a number of seconds to a string in the format "HH:MM:SS".
/// If the number of hours is 0, it will be omitted.
pub fn seconds_to_hms_string(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a size in bytes as megabytes with two decimals.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

pub fn format_bit_rate(kbps: u32) -> String {
    format!("{kbps} kbps")
}

/// Format an ISO 8601 timestamp as a calendar date. Values that cannot be
/// parsed are shown up to their first `T`.
pub fn format_date(timestamp: &str) -> String {
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(timestamp) {
        return date.format("%Y-%m-%d").to_string();
    }
    timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date)
        .to_string()
}

/// Render a 0-5 rating as filled and empty stars.
pub fn rating_stars(rating: Option<u8>) -> String {
    let rating = rating.unwrap_or(0).min(5) as usize;
    format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_hms_string() {
        // Test with hours
        assert_eq!(seconds_to_hms_string(3661), "1:01:01");
        assert_eq!(seconds_to_hms_string(3600), "1:00:00");

        // Test without hours
        assert_eq!(seconds_to_hms_string(61), "1:01");
        assert_eq!(seconds_to_hms_string(123), "2:03");

        // Test edge cases
        assert_eq!(seconds_to_hms_string(0), "0:00");
        assert_eq!(seconds_to_hms_string(59), "0:59");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size_mb(1536 * 1024), "1.50 MB");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-04-05T10:20:30Z"), "2023-04-05");
        assert_eq!(format_date("2023-04-05T10:20:30.123456"), "2023-04-05");
        assert_eq!(format_date("sometime"), "sometime");
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(Some(3)), "★★★☆☆");
        assert_eq!(rating_stars(None), "☆☆☆☆☆");
    }
}
