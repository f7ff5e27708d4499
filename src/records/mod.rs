use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::{Context, Result};
use crate::export::csv::{read_rows_csv, write_rows_csv};
use crate::fetch::FundRow;
use crate::utils::{list_csv_files, snapshot_timestamp_slug, FileEntry};

const SNAPSHOT_SUFFIX: &str = "_funds.csv";
/// Snapshots left on disk after each save; older ones are deleted.
pub const SNAPSHOTS_KEPT: usize = 3;

/// Where a snapshot's rows came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SnapshotSource {
    Network,
    Disk(String),
}

/// Rows of one fetch cycle together with the time they were fetched.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub rows: Vec<FundRow>,
    pub fetched_at: DateTime<Local>,
    pub source: SnapshotSource,
}

/// A snapshot stays fresh while it is younger than the revalidation interval.
/// Timestamps in the future count as fresh.
pub fn is_fresh(modified: SystemTime, now: SystemTime, revalidate: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age < revalidate,
        Err(_) => true,
    }
}

/// CSV snapshots of previous fetches, used to honour the revalidation interval.
pub struct SnapshotStore {
    dir: PathBuf,
    revalidate: Duration,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, revalidate: Duration) -> Self {
        Self {
            dir: dir.into(),
            revalidate,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.snapshots_dir.clone(), config.revalidate)
    }

    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!(
                "Failed to create snapshots directory {}",
                self.dir.display()
            )
        })?;
        Ok(())
    }

    /// Persist rows fetched at `fetched_at` and return the written path.
    pub fn save(&self, rows: &[FundRow], fetched_at: DateTime<Local>) -> Result<PathBuf> {
        self.prepare()?;
        let path = self.dir.join(format!(
            "{}{}",
            snapshot_timestamp_slug(fetched_at),
            SNAPSHOT_SUFFIX
        ));
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
        write_rows_csv(file, rows)?;
        log::debug!("Saved {} funds to {}", rows.len(), path.display());
        self.prune(&path);
        Ok(path)
    }

    /// Snapshot files, newest first. Other CSV files in the directory are ignored.
    fn snapshots(&self) -> Result<Vec<FileEntry>> {
        let entries = list_csv_files(&self.dir).with_context(|| {
            format!("Failed to list snapshots directory {}", self.dir.display())
        })?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.name.ends_with(SNAPSHOT_SUFFIX))
            .collect())
    }

    /// Delete all but the newest `SNAPSHOTS_KEPT` snapshots, never `current`.
    fn prune(&self, current: &Path) {
        let entries = match self.snapshots() {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Skipping snapshot cleanup: {}", err);
                return;
            }
        };
        for entry in entries
            .iter()
            .filter(|entry| entry.path.as_path() != current)
            .skip(SNAPSHOTS_KEPT.saturating_sub(1))
        {
            match fs::remove_file(&entry.path) {
                Ok(()) => log::debug!("Removed old snapshot {}", entry.name),
                Err(err) => log::warn!("Failed to remove snapshot {}: {}", entry.name, err),
            }
        }
    }

    /// Most recently modified snapshot on disk, if any.
    pub fn latest_snapshot(&self) -> Result<Option<FileEntry>> {
        Ok(self.snapshots()?.into_iter().next())
    }

    pub fn load(&self, entry: &FileEntry) -> Result<Snapshot> {
        let file = fs::File::open(&entry.path)
            .with_context(|| format!("Failed to open snapshot {}", entry.path.display()))?;
        let rows = read_rows_csv(file)?;
        Ok(Snapshot {
            rows,
            fetched_at: DateTime::<Local>::from(entry.modified),
            source: SnapshotSource::Disk(entry.name.clone()),
        })
    }

    /// Latest snapshot if it is still inside the revalidation interval.
    pub fn fresh_snapshot(&self, now: SystemTime) -> Result<Option<Snapshot>> {
        let Some(entry) = self.latest_snapshot()? else {
            return Ok(None);
        };
        if !is_fresh(entry.modified, now, self.revalidate) {
            log::debug!("Snapshot {} is stale", entry.name);
            return Ok(None);
        }
        self.load(&entry).map(Some)
    }
}
