//! Relative-time display formatting.
//!
//! Feed items carry a short human-readable age ("now", "5min", "3h",
//! "2d") alongside the full timestamp. Posts older than 30 days fall back
//! to a plain date.

use chrono::{DateTime, Utc};

/// Formats how long ago `timestamp` was, relative to `now`.
pub fn relative_time_from(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - timestamp;

    if diff.num_days() > 30 {
        timestamp.format("%d/%m/%Y").to_string()
    } else if diff.num_days() > 0 {
        format!("{}d", diff.num_days())
    } else if diff.num_hours() > 0 {
        format!("{}h", diff.num_hours())
    } else if diff.num_minutes() > 0 {
        format!("{}min", diff.num_minutes())
    } else {
        "now".to_string()
    }
}

/// Formats how long ago `timestamp` was, relative to the current time.
pub fn relative_time(timestamp: DateTime<Utc>) -> String {
    relative_time_from(timestamp, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_just_now() {
        let now = base();
        assert_eq!(relative_time_from(now, now), "now");
        assert_eq!(relative_time_from(now - Duration::seconds(30), now), "now");
    }

    #[test]
    fn test_minutes() {
        let now = base();
        assert_eq!(relative_time_from(now - Duration::minutes(5), now), "5min");
        assert_eq!(relative_time_from(now - Duration::minutes(59), now), "59min");
    }

    #[test]
    fn test_hours() {
        let now = base();
        assert_eq!(relative_time_from(now - Duration::hours(1), now), "1h");
        assert_eq!(relative_time_from(now - Duration::hours(23), now), "23h");
    }

    #[test]
    fn test_days() {
        let now = base();
        assert_eq!(relative_time_from(now - Duration::days(2), now), "2d");
        assert_eq!(relative_time_from(now - Duration::days(30), now), "30d");
    }

    #[test]
    fn test_old_posts_show_date() {
        let now = base();
        let old = now - Duration::days(45);
        assert_eq!(relative_time_from(old, now), "01/05/2024");
    }
}
