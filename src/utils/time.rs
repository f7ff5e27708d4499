use chrono::{DateTime, Local};

pub fn format_human(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Sortable, filesystem-safe timestamp used in snapshot file names.
pub fn snapshot_timestamp_slug(time: DateTime<Local>) -> String {
    time.format("%Y_%m_%d_%H_%M_%S").to_string()
}
