//! Save-file naming conventions and per-profile discovery
//!
//! Hades II keeps up to four save slots in a flat directory:
//! `Profile{N}.sav`, `Profile{N}_Temp.sav` and rolling `Profile{N}.sav.bak*`
//! backups. Everything here works on file names only, so it stays cheap
//! enough to run inside the watcher's event filter.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Valid profile numbers (save slots)
pub const PROFILE_RANGE: RangeInclusive<u8> = 1..=4;

/// Extract the profile number from a save file name
///
/// Matches names beginning with the literal `Profile` followed by a digit
/// run terminated by a non-digit or end of string. Returns the number only
/// if it is a valid slot; anything else yields `None`.
pub fn extract_profile_number(filename: &str) -> Option<u8> {
    let rest = filename.strip_prefix("Profile")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let profile: u8 = digits.parse().ok()?;
    if PROFILE_RANGE.contains(&profile) {
        Some(profile)
    } else {
        None
    }
}

/// Check whether a file name looks like a save file
///
/// The watcher uses this to discard irrelevant filesystem events before
/// they reach the queue.
pub fn is_save_file(filename: &str) -> bool {
    filename.ends_with(".sav")
        || filename.ends_with("_Temp.sav")
        || filename.ends_with(".sav.bak")
}

/// Find all save files belonging to a profile
///
/// Returns the primary save, the temp save and any `Profile{N}.sav.bak*`
/// backups that currently exist. A missing save directory yields an empty
/// list, not an error.
pub fn find_profile_files(save_dir: &Path, profile: u8) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if !save_dir.is_dir() {
        return files;
    }

    let primary = save_dir.join(format!("Profile{profile}.sav"));
    if primary.is_file() {
        files.push(primary);
    }

    let temp = save_dir.join(format!("Profile{profile}_Temp.sav"));
    if temp.is_file() {
        files.push(temp);
    }

    let bak_prefix = format!("Profile{profile}.sav.bak");
    match fs::read_dir(save_dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let name = entry.file_name();
                if let Some(name) = name.to_str() {
                    if name.starts_with(&bak_prefix) && entry.path().is_file() {
                        files.push(entry.path());
                    }
                }
            }
        }
        Err(e) => {
            warn!(dir = %save_dir.display(), error = %e, "failed to scan save directory");
        }
    }

    files
}
