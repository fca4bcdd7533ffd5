//! Snapshot record and its on-disk metadata

use savepoint_core::fsops::directory_size;
use savepoint_core::naming::parse_snapshot_folder_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Metadata file written into every snapshot folder
pub const METADATA_FILE: &str = "metadata.json";

/// Fixed screenshot name inside a snapshot folder
pub const SCREENSHOT_FILE: &str = "snapshot.png";

/// A point-in-time copy of one profile's save files
///
/// Identity is the folder path. `size` is recomputed from disk whenever the
/// snapshot is loaded, never cached authoritatively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Snapshot folder on disk
    pub path: PathBuf,
    /// Profile the snapshot belongs to (1-4)
    pub profile: u8,
    /// Creation time, seconds since epoch
    pub timestamp: i64,
    /// Total bytes under the folder
    pub size: u64,
    /// Whether `snapshot.png` exists in the folder
    pub has_screenshot: bool,
}

impl Snapshot {
    /// Load a snapshot from a catalog folder
    ///
    /// Prefers `metadata.json`; falls back to parsing the folder name and
    /// probing for the screenshot directly. Folders matching neither are
    /// not snapshots and yield `None` (a malformed metadata file also
    /// yields `None` so one corrupt entry cannot poison a listing).
    pub fn load(dir: &Path) -> Option<Snapshot> {
        if !dir.is_dir() {
            return None;
        }

        let meta_path = dir.join(METADATA_FILE);
        if meta_path.is_file() {
            let meta = SnapshotMeta::read(&meta_path)?;
            return Some(Snapshot {
                path: dir.to_path_buf(),
                profile: meta.profile,
                timestamp: meta.timestamp,
                size: directory_size(dir),
                has_screenshot: meta.has_screenshot,
            });
        }

        let name = dir.file_name()?.to_str()?;
        let parsed = parse_snapshot_folder_name(name)?;
        Some(Snapshot {
            path: dir.to_path_buf(),
            profile: parsed.profile,
            timestamp: parsed.timestamp,
            size: directory_size(dir),
            has_screenshot: dir.join(SCREENSHOT_FILE).is_file(),
        })
    }

    /// Path to the screenshot, if the snapshot has one
    pub fn screenshot_path(&self) -> Option<PathBuf> {
        if self.has_screenshot {
            Some(self.path.join(SCREENSHOT_FILE))
        } else {
            None
        }
    }
}

/// Serialized snapshot metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Profile number (1-4)
    pub profile: u8,
    /// Creation time, seconds since epoch
    pub timestamp: i64,
    /// How many save files were copied at creation
    pub files_copied: usize,
    /// Whether a screenshot was captured
    pub has_screenshot: bool,
}

impl SnapshotMeta {
    /// Read and parse a metadata file, logging malformed content
    fn read(path: &Path) -> Option<SnapshotMeta> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read snapshot metadata");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed snapshot metadata");
                None
            }
        }
    }

    /// Write the metadata file into a snapshot folder
    pub fn write(&self, dir: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(METADATA_FILE), raw)?;
        Ok(())
    }
}
