//! Snapshot catalog operations
//!
//! One directory per profile, one subdirectory per snapshot. The store also
//! owns the rolling `live_backup/` folder written before every restore.

use crate::capture::ScreenCapture;
use crate::snapshot::{Snapshot, SnapshotMeta, SCREENSHOT_FILE};
use chrono::Utc;
use parking_lot::Mutex;
use savepoint_core::fsops::{copy_files, delete_directory, directory_size};
use savepoint_core::naming::snapshot_folder_name;
use savepoint_core::profile::{find_profile_files, PROFILE_RANGE};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Folder under `snapshot_dir` holding the rolling pre-restore backups
const LIVE_BACKUP_DIR: &str = "live_backup";

/// Owns the snapshot catalog on disk
pub struct SnapshotStore {
    save_dir: PathBuf,
    snapshot_dir: PathBuf,
    capture: Box<dyn ScreenCapture>,
    /// Per-profile creation time of the newest snapshot, shared with the
    /// watcher's consumer thread
    last_snapshot_time: Mutex<HashMap<u8, i64>>,
}

impl SnapshotStore {
    /// Create a store over the given save directory and catalog root
    ///
    /// Creates `snapshot_dir` if needed and seeds the per-profile
    /// last-snapshot times from the existing catalog, so the first
    /// post-restart event debounces against history instead of always
    /// opening a new snapshot.
    pub fn new(save_dir: PathBuf, snapshot_dir: PathBuf, capture: Box<dyn ScreenCapture>) -> Self {
        if let Err(e) = fs::create_dir_all(&snapshot_dir) {
            warn!(dir = %snapshot_dir.display(), error = %e, "failed to create snapshot directory");
        }

        let store = Self {
            save_dir,
            snapshot_dir,
            capture,
            last_snapshot_time: Mutex::new(HashMap::new()),
        };

        {
            let mut times = store.last_snapshot_time.lock();
            for snapshot in store.list_snapshots(None) {
                let entry = times.entry(snapshot.profile).or_insert(snapshot.timestamp);
                if snapshot.timestamp > *entry {
                    *entry = snapshot.timestamp;
                }
            }
        }

        info!(
            save_dir = %store.save_dir.display(),
            snapshot_dir = %store.snapshot_dir.display(),
            "snapshot store ready"
        );
        store
    }

    /// Directory containing the game's live save files
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Root of the snapshot catalog
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Creation time of the newest snapshot for a profile
    pub fn last_snapshot_time(&self, profile: u8) -> Option<i64> {
        self.last_snapshot_time.lock().get(&profile).copied()
    }

    /// Snapshot the current save files of a profile
    ///
    /// With `overwrite_last` and an existing snapshot, the newest
    /// snapshot's folder is refreshed in place instead of opening a new
    /// one. Returns `None` when there is nothing to snapshot or nothing
    /// could be copied.
    pub fn create_snapshot(
        &self,
        profile: u8,
        take_screenshot: bool,
        overwrite_last: bool,
    ) -> Option<Snapshot> {
        let sources = find_profile_files(&self.save_dir, profile);
        if sources.is_empty() {
            warn!(profile, "no save files found, nothing to snapshot");
            return None;
        }

        let timestamp = Utc::now().timestamp();

        let existing = if overwrite_last {
            self.list_snapshots(Some(profile))
                .into_iter()
                .next()
                .map(|s| s.path)
        } else {
            None
        };

        let folder = match existing {
            Some(folder) => {
                info!(path = %folder.display(), "overwriting last snapshot");
                folder
            }
            None => {
                let profile_dir = self.snapshot_dir.join(format!("Profile{profile}"));
                let name = snapshot_folder_name(profile, timestamp);
                let mut folder = profile_dir.join(&name);
                // Same-second collision: suffix until the name is free.
                let mut n = 2;
                while folder.exists() {
                    folder = profile_dir.join(format!("{name}-{n}"));
                    n += 1;
                }
                if let Err(e) = fs::create_dir_all(&folder) {
                    warn!(path = %folder.display(), error = %e, "failed to create snapshot folder");
                    return None;
                }
                info!(path = %folder.display(), "creating snapshot");
                folder
            }
        };

        let copied = copy_files(&sources, &folder);
        if copied == 0 {
            warn!(profile, "failed to copy any save files");
            return None;
        }

        let mut has_screenshot = false;
        if take_screenshot {
            has_screenshot = self.capture.capture(&folder.join(SCREENSHOT_FILE));
        }

        let meta = SnapshotMeta {
            profile,
            timestamp,
            files_copied: copied,
            has_screenshot,
        };
        if let Err(e) = meta.write(&folder) {
            warn!(path = %folder.display(), error = %e, "failed to write snapshot metadata");
            return None;
        }

        self.last_snapshot_time.lock().insert(profile, timestamp);

        Some(Snapshot {
            size: directory_size(&folder),
            path: folder,
            profile,
            timestamp,
            has_screenshot,
        })
    }

    /// List snapshots for one profile, or all four
    ///
    /// Unrecognized directories are skipped silently. The result is sorted
    /// newest-first with a stable order among equal timestamps.
    pub fn list_snapshots(&self, profile: Option<u8>) -> Vec<Snapshot> {
        let profiles: Vec<u8> = match profile {
            Some(p) => vec![p],
            None => PROFILE_RANGE.collect(),
        };

        let mut snapshots = Vec::new();
        for p in profiles {
            let profile_dir = self.snapshot_dir.join(format!("Profile{p}"));
            if !profile_dir.is_dir() {
                continue;
            }

            let entries = match fs::read_dir(&profile_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(dir = %profile_dir.display(), error = %e, "failed to scan profile directory");
                    continue;
                }
            };

            for entry in entries.flatten() {
                if let Some(snapshot) = Snapshot::load(&entry.path()) {
                    snapshots.push(snapshot);
                }
            }
        }

        snapshots.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.path.cmp(&b.path))
        });
        snapshots
    }

    /// Delete a snapshot's folder
    pub fn delete_snapshot(&self, snapshot: &Snapshot) -> bool {
        let deleted = delete_directory(&snapshot.path);
        if deleted {
            info!(path = %snapshot.path.display(), "deleted snapshot");
        }
        deleted
    }

    /// Delete several snapshots, returning how many succeeded
    pub fn delete_snapshots(&self, snapshots: &[Snapshot]) -> usize {
        snapshots
            .iter()
            .filter(|s| self.delete_snapshot(s))
            .count()
    }

    /// Restore a snapshot's save files into the live save directory
    ///
    /// With `backup_current`, the profile's current save files are first
    /// copied into the rolling live-backup folder (cleared of its previous
    /// contents). Backup failure is logged but never aborts the restore.
    pub fn restore_snapshot(&self, snapshot: &Snapshot, backup_current: bool) -> bool {
        let profile = snapshot.profile;

        if backup_current {
            self.backup_live_files(profile);
        }

        let entries = match fs::read_dir(&snapshot.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %snapshot.path.display(), error = %e, "failed to read snapshot folder");
                return false;
            }
        };

        // Save files only: the screenshot and metadata files match neither
        // suffix, so they stay behind by construction.
        let mut sources = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.ends_with(".sav") || name.ends_with(".bak") {
                    sources.push(path);
                }
            }
        }

        if sources.is_empty() {
            warn!(path = %snapshot.path.display(), "no save files found in snapshot");
            return false;
        }

        let copied = copy_files(&sources, &self.save_dir);
        if copied == 0 {
            warn!(path = %snapshot.path.display(), "failed to copy any snapshot files");
            return false;
        }

        info!(copied, path = %snapshot.path.display(), "restored snapshot");
        true
    }

    /// Rolling backup folder for a profile
    pub fn live_backup_dir(&self, profile: u8) -> PathBuf {
        self.snapshot_dir
            .join(LIVE_BACKUP_DIR)
            .join(format!("Profile{profile}"))
    }

    /// Copy the profile's current save files into the rolling backup
    fn backup_live_files(&self, profile: u8) {
        let current = find_profile_files(&self.save_dir, profile);
        if current.is_empty() {
            return;
        }

        let backup_dir = self.live_backup_dir(profile);
        if let Err(e) = fs::create_dir_all(&backup_dir) {
            warn!(dir = %backup_dir.display(), error = %e, "failed to create live backup folder");
            return;
        }

        // Clear the previous backup's files, keeping the folder itself.
        if let Ok(entries) = fs::read_dir(&backup_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    if let Err(e) = fs::remove_file(&path) {
                        warn!(path = %path.display(), error = %e, "failed to clear old backup file");
                    }
                }
            }
        }

        let copied = copy_files(&current, &backup_dir);
        info!(copied, dir = %backup_dir.display(), "backed up current save files");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::NoopCapture;
    use crate::snapshot::METADATA_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn test_store(root: &Path) -> SnapshotStore {
        SnapshotStore::new(
            root.join("saves"),
            root.join("snapshots"),
            Box::new(NoopCapture),
        )
    }

    fn write_save(root: &Path, name: &str, contents: &[u8]) {
        let save_dir = root.join("saves");
        fs::create_dir_all(&save_dir).unwrap();
        fs::write(save_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_create_then_list() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"run 42");
        write_save(temp_dir.path(), "Profile1_Temp.sav", b"temp");
        let store = test_store(temp_dir.path());

        let created = store.create_snapshot(1, false, false).unwrap();
        assert_eq!(created.profile, 1);
        assert!(!created.has_screenshot);

        let listed = store.list_snapshots(Some(1));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, created.path);

        // The copied file set matches the source set, content and all.
        assert_eq!(
            fs::read(created.path.join("Profile1.sav")).unwrap(),
            b"run 42"
        );
        assert_eq!(
            fs::read(created.path.join("Profile1_Temp.sav")).unwrap(),
            b"temp"
        );
        assert!(created.path.join(METADATA_FILE).is_file());
    }

    #[test]
    fn test_create_without_saves_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(temp_dir.path());
        assert!(store.create_snapshot(1, false, false).is_none());
    }

    #[test]
    fn test_overwrite_last_reuses_folder() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile2.sav", b"before");
        let store = test_store(temp_dir.path());

        let first = store.create_snapshot(2, false, false).unwrap();

        write_save(temp_dir.path(), "Profile2.sav", b"after");
        let second = store.create_snapshot(2, false, true).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(store.list_snapshots(Some(2)).len(), 1);
        assert_eq!(fs::read(second.path.join("Profile2.sav")).unwrap(), b"after");
    }

    #[test]
    fn test_overwrite_last_without_prior_creates_new() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile3.sav", b"fresh");
        let store = test_store(temp_dir.path());

        assert!(store.create_snapshot(3, false, true).is_some());
        assert_eq!(store.list_snapshots(Some(3)).len(), 1);
    }

    #[test]
    fn test_same_second_snapshots_get_distinct_folders() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"data");
        let store = test_store(temp_dir.path());

        // Two non-overwriting creations in the same second must not
        // collide on the folder name.
        let a = store.create_snapshot(1, false, false).unwrap();
        let b = store.create_snapshot(1, false, false).unwrap();
        assert_ne!(a.path, b.path);
        assert_eq!(store.list_snapshots(Some(1)).len(), 2);
    }

    #[test]
    fn test_list_all_profiles_sorted_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(temp_dir.path());

        // Build catalog entries by hand with controlled timestamps.
        for (profile, ts) in [(1u8, 100i64), (2, 300), (1, 200)] {
            let folder = store
                .snapshot_dir()
                .join(format!("Profile{profile}"))
                .join(format!("folder-{profile}-{ts}"));
            fs::create_dir_all(&folder).unwrap();
            SnapshotMeta {
                profile,
                timestamp: ts,
                files_copied: 1,
                has_screenshot: false,
            }
            .write(&folder)
            .unwrap();
        }

        let all = store.list_snapshots(None);
        let times: Vec<i64> = all.iter().map(|s| s.timestamp).collect();
        assert_eq!(times, vec![300, 200, 100]);

        // Stable across repeated calls given identical inputs.
        assert_eq!(store.list_snapshots(None), all);
    }

    #[test]
    fn test_list_skips_unrecognized_and_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(temp_dir.path());
        let profile_dir = store.snapshot_dir().join("Profile1");

        fs::create_dir_all(profile_dir.join("not-a-snapshot")).unwrap();
        let malformed = profile_dir.join("2024-01-01_00-00-00_profile1");
        fs::create_dir_all(&malformed).unwrap();
        fs::write(malformed.join(METADATA_FILE), b"{broken").unwrap();
        let good = profile_dir.join("2024-01-02_00-00-00_profile1");
        fs::create_dir_all(&good).unwrap();

        let listed = store.list_snapshots(Some(1));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, good);
    }

    #[test]
    fn test_list_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(temp_dir.path());
        assert!(store.list_snapshots(None).is_empty());
        assert!(store.list_snapshots(Some(4)).is_empty());
    }

    #[test]
    fn test_delete_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"data");
        let store = test_store(temp_dir.path());

        let snapshot = store.create_snapshot(1, false, false).unwrap();
        assert!(store.delete_snapshot(&snapshot));
        assert!(!store.delete_snapshot(&snapshot));
        assert!(store.list_snapshots(Some(1)).is_empty());
    }

    #[test]
    fn test_delete_snapshots_counts_successes() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"data");
        let store = test_store(temp_dir.path());

        let a = store.create_snapshot(1, false, false).unwrap();
        let b = store.create_snapshot(1, false, false).unwrap();

        // Delete one out from under the batch; the batch keeps going.
        store.delete_snapshot(&a);
        assert_eq!(store.delete_snapshots(&[a, b]), 1);
    }

    #[test]
    fn test_restore_with_backup() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile2.sav", b"old run");
        let store = test_store(temp_dir.path());

        let snapshot = store.create_snapshot(2, false, false).unwrap();

        // Live state moves on after the snapshot.
        write_save(temp_dir.path(), "Profile2.sav", b"new run");

        assert!(store.restore_snapshot(&snapshot, true));

        // Save dir now reflects the snapshot...
        assert_eq!(
            fs::read(store.save_dir().join("Profile2.sav")).unwrap(),
            b"old run"
        );
        // ...and the pre-restore state sits in the rolling backup.
        assert_eq!(
            fs::read(store.live_backup_dir(2).join("Profile2.sav")).unwrap(),
            b"new run"
        );
    }

    #[test]
    fn test_restore_overwrites_previous_backup() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile2.sav", b"v1");
        let store = test_store(temp_dir.path());
        let snapshot = store.create_snapshot(2, false, false).unwrap();

        write_save(temp_dir.path(), "Profile2.sav", b"v2");
        assert!(store.restore_snapshot(&snapshot, true));

        write_save(temp_dir.path(), "Profile2.sav", b"v3");
        assert!(store.restore_snapshot(&snapshot, true));

        // Rolling, not accumulating: only the latest pre-restore state.
        assert_eq!(
            fs::read(store.live_backup_dir(2).join("Profile2.sav")).unwrap(),
            b"v3"
        );
    }

    #[test]
    fn test_restore_empty_snapshot_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(temp_dir.path());

        let folder = store.snapshot_dir().join("Profile1").join("empty");
        fs::create_dir_all(&folder).unwrap();
        SnapshotMeta {
            profile: 1,
            timestamp: 100,
            files_copied: 0,
            has_screenshot: false,
        }
        .write(&folder)
        .unwrap();

        let snapshot = Snapshot::load(&folder).unwrap();
        assert!(!store.restore_snapshot(&snapshot, true));
    }

    #[test]
    fn test_live_backup_never_listed() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"data");
        let store = test_store(temp_dir.path());

        let snapshot = store.create_snapshot(1, false, false).unwrap();
        store.restore_snapshot(&snapshot, true);

        assert_eq!(store.list_snapshots(None).len(), 1);
    }

    #[test]
    fn test_last_snapshot_time_seeded_from_catalog() {
        let temp_dir = TempDir::new().unwrap();
        write_save(temp_dir.path(), "Profile1.sav", b"data");

        let created = {
            let store = test_store(temp_dir.path());
            store.create_snapshot(1, false, false).unwrap()
        };

        // A fresh store over the same catalog sees the prior snapshot.
        let reopened = test_store(temp_dir.path());
        assert_eq!(reopened.last_snapshot_time(1), Some(created.timestamp));
        assert_eq!(reopened.last_snapshot_time(2), None);
    }
}
