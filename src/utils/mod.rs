pub mod file;
pub mod time;

pub use file::{list_csv_files, FileEntry};
pub use time::{format_human, snapshot_timestamp_slug};
