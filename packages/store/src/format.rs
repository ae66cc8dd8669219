//! Display helpers for timestamps on post cards and profiles.

use chrono::{DateTime, Utc};

/// Relative age such as "2 hours ago". Future timestamps read as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    let (count, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if elapsed.num_hours() < 24 {
        (elapsed.num_hours(), "hour")
    } else {
        (elapsed.num_days(), "day")
    };
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// "Joined March 2024"
pub fn joined_label(created_at: DateTime<Utc>) -> String {
    format!("Joined {}", created_at.format("%B %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now + Duration::minutes(5), now), "just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(59), now), "59 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(time_ago(now - Duration::hours(24), now), "1 day ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
    }

    #[test]
    fn test_joined_label() {
        let created = Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap();
        assert_eq!(joined_label(created), "Joined March 2024");
    }
}
