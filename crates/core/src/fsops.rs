//! Best-effort file transfer primitives
//!
//! Copies and deletes here never abort a whole batch on one failure. The
//! snapshot catalog has to stay usable even when individual files vanish
//! mid-operation (the game rewrites its saves while we read them), so every
//! helper degrades to a count or a boolean and logs the rest.

use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Copy a set of files into a directory, returning how many succeeded
///
/// Creates `dest_dir` (and parents) if needed. Each source that still
/// exists is copied to `dest_dir/<basename>` with its modification time
/// preserved. Sources that vanished between enumeration and copy are
/// skipped and logged.
pub fn copy_files(sources: &[PathBuf], dest_dir: &Path) -> usize {
    if let Err(e) = fs::create_dir_all(dest_dir) {
        warn!(dir = %dest_dir.display(), error = %e, "failed to create destination directory");
        return 0;
    }

    let mut copied = 0;
    for src in sources {
        if !src.is_file() {
            warn!(path = %src.display(), "source vanished before copy, skipping");
            continue;
        }

        let name = match src.file_name() {
            Some(name) => name,
            None => continue,
        };
        let dest = dest_dir.join(name);

        match fs::copy(src, &dest) {
            Ok(_) => {
                preserve_mtime(src, &dest);
                debug!(from = %src.display(), to = %dest.display(), "copied");
                copied += 1;
            }
            Err(e) => {
                warn!(from = %src.display(), to = %dest.display(), error = %e, "copy failed");
            }
        }
    }

    copied
}

/// Carry the source's modification time over to the copy
fn preserve_mtime(src: &Path, dest: &Path) {
    let mtime = match fs::metadata(src) {
        Ok(meta) => FileTime::from_last_modification_time(&meta),
        Err(_) => return,
    };
    if let Err(e) = filetime::set_file_mtime(dest, mtime) {
        debug!(path = %dest.display(), error = %e, "failed to preserve mtime");
    }
}

/// Total size in bytes of all regular files under a directory
///
/// A directory that does not exist yields 0.
pub fn directory_size(dir: &Path) -> u64 {
    if !dir.exists() {
        return 0;
    }

    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Recursively delete a directory
///
/// Returns `false` (not an error) when the directory is already gone.
pub fn delete_directory(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }

    match fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "deleted directory");
            true
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to delete directory");
            false
        }
    }
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
