use chrono::{DateTime, Utc};

/// `"just now"` for anything younger than a whole day, otherwise whole days
/// as `"3d"`.
pub fn relative_created_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(created_at).num_days();
    if days == 0 {
        "just now".to_string()
    } else {
        format!("{days}d")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn same_day_reads_just_now() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let created = now - Duration::hours(23);
        assert_eq!(relative_created_time(created, now), "just now");
    }

    #[test]
    fn older_comments_show_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 5, 4, 12, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2025, 4, 30, 12, 26, 59).unwrap();
        assert_eq!(relative_created_time(created, now), "3d");
    }
}
