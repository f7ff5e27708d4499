use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Metadata for a file entry found in a snapshot directory.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// List files with `extension`, newest first. A missing directory is empty.
pub fn list_files_with_extension(dir: impl AsRef<Path>, extension: &str) -> io::Result<Vec<FileEntry>> {
    let dir_path = dir.as_ref();
    let read_dir = match fs::read_dir(dir_path) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };

        let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
        let Some(name) = path
            .file_name()
            .and_then(|segment| segment.to_str())
            .map(|s| s.to_string())
        else {
            continue;
        };

        entries.push(FileEntry {
            name,
            path,
            modified,
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    Ok(entries)
}

pub fn list_csv_files(dir: impl AsRef<Path>) -> io::Result<Vec<FileEntry>> {
    list_files_with_extension(dir, "csv")
}
