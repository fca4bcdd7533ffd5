//! Screenshot capture capability
//!
//! Capture is optional everywhere: a failed or absent capture downgrades a
//! snapshot to `has_screenshot = false` and nothing else. The store takes a
//! `Box<dyn ScreenCapture>` at construction; call sites never re-detect
//! availability.

use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Capture backend interface
pub trait ScreenCapture: Send + Sync {
    /// Capture the current display into `dest`
    ///
    /// Returns `true` only if a readable image exists at `dest` afterward.
    fn capture(&self, dest: &Path) -> bool;
}

/// Capture backend that never captures
///
/// Used when no screenshot command is configured.
pub struct NoopCapture;

impl ScreenCapture for NoopCapture {
    fn capture(&self, _dest: &Path) -> bool {
        debug!("screenshot capture not configured");
        false
    }
}

/// Capture backend that shells out to a user-configured command
///
/// The destination path is appended as the final argument, e.g.
/// `grim` or `scrot -o` both work.
pub struct CommandCapture {
    command: String,
}

impl CommandCapture {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl ScreenCapture for CommandCapture {
    fn capture(&self, dest: &Path) -> bool {
        let mut parts = self.command.split_whitespace();
        let program = match parts.next() {
            Some(program) => program,
            None => {
                warn!("empty screenshot command");
                return false;
            }
        };

        let status = Command::new(program).args(parts).arg(dest).status();

        match status {
            Ok(status) if status.success() && dest.is_file() => {
                debug!(path = %dest.display(), "screenshot captured");
                true
            }
            Ok(status) => {
                warn!(command = %self.command, %status, "screenshot command failed");
                false
            }
            Err(e) => {
                warn!(command = %self.command, error = %e, "failed to run screenshot command");
                false
            }
        }
    }
}
