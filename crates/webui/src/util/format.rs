use chrono::{DateTime, Local};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `1536` -> `1.5 KB`.
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

/// Formats milliseconds since the Unix epoch in the browser's time zone.
pub fn epoch_millis(millis: i64) -> String {
    if millis <= 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "-".to_string(),
        |utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}

/// First seven characters of a commit id.
pub fn short_commit(commit_id: &str) -> &str {
    commit_id.get(..7).unwrap_or(commit_id)
}
