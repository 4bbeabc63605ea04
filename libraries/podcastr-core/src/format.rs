//! Display formatting for durations and publish dates

use chrono::{DateTime, Utc};

/// Format a duration in whole seconds as `HH:MM:SS`
///
/// Every field is zero-padded to two digits. Hours are not wrapped, so
/// long recordings keep counting (`360000` seconds is `100:00:00`).
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a publish date the way episode lists show it (`8 Jan 21`)
pub fn format_published_at(published_at: &DateTime<Utc>) -> String {
    published_at.format("%-d %b %y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(format_duration(0), "00:00:00");
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(3599), "00:59:59");
    }

    #[test]
    fn hours_are_padded() {
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(3600), "01:00:00");
    }

    #[test]
    fn hours_have_no_upper_bound() {
        assert_eq!(format_duration(99 * 3600 + 59 * 60 + 59), "99:59:59");
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn published_label_drops_leading_zero() {
        let date = Utc.with_ymd_and_hms(2021, 1, 8, 16, 0, 0).unwrap();
        assert_eq!(format_published_at(&date), "8 Jan 21");

        let date = Utc.with_ymd_and_hms(2020, 12, 24, 9, 30, 0).unwrap();
        assert_eq!(format_published_at(&date), "24 Dec 20");
    }
}
