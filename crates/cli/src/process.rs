//! Best-effort detection of a running game process
//!
//! Restoring while the game holds its save files open invites corruption,
//! so restore refuses when a process matching the game's name is found.
//! Detection failures read as "not running"; this is advisory, not a lock.

/// Substring matched (case-insensitively) against process names
pub const GAME_PROCESS_NAME: &str = "hades";

#[cfg(target_os = "linux")]
pub fn game_running(needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let entries = match std::fs::read_dir("/proc") {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    for entry in entries.flatten() {
        let comm_path = entry.path().join("comm");
        if let Ok(comm) = std::fs::read_to_string(comm_path) {
            if comm.trim().to_lowercase().contains(&needle) {
                return true;
            }
        }
    }
    false
}

#[cfg(not(target_os = "linux"))]
pub fn game_running(needle: &str) -> bool {
    use std::process::Command;

    match Command::new("pgrep").arg("-i").arg(needle).output() {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}
