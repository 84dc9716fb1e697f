use chrono::{Local, NaiveDateTime};

/// Relative to the browser's local clock; the backend sends zone-less local times.
pub fn relative_to_now(old: NaiveDateTime) -> String {
    relative_time(old, Local::now().naive_local())
}

pub fn relative_time(old: NaiveDateTime, new: NaiveDateTime) -> String {
    let duration = new.signed_duration_since(old);

    if duration.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let seconds = duration.num_seconds();
    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => {
            let s = if minutes == 1 { "" } else { "s" };
            format!("{minutes} min{s} ago")
        }
        3600..=86399 => {
            let s = if hours == 1 { "" } else { "s" };
            format!("{hours} hour{s} ago")
        }
        _ => {
            if days < 30 {
                let s = if days == 1 { "" } else { "s" };
                format!("{days} day{s} ago")
            } else if days < 365 {
                let months = days / 30;
                let s = if months == 1 { "" } else { "s" };
                format!("{months} month{s} ago")
            } else {
                let years = days / 365;
                let s = if years == 1 { "" } else { "s" };
                format!("{years} year{s} ago")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn buckets() {
        let now = at("2024-06-01T12:00:00");
        let ago = |delta: TimeDelta| relative_time(now - delta, now);
        assert_eq!("just now", ago(TimeDelta::seconds(30)));
        assert_eq!("1 min ago", ago(TimeDelta::seconds(90)));
        assert_eq!("5 hours ago", ago(TimeDelta::hours(5)));
        assert_eq!("1 day ago", ago(TimeDelta::days(1)));
        assert_eq!("2 months ago", ago(TimeDelta::days(61)));
        assert_eq!("3 years ago", ago(TimeDelta::days(3 * 365 + 2)));
        assert_eq!("in the future", relative_time(now + TimeDelta::minutes(1), now));
    }
}
