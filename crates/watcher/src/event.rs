//! Event types crossing the watcher's thread boundaries

use savepoint_store::Snapshot;
use std::path::PathBuf;

/// What happened to a save file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveEventKind {
    /// File appeared (always significant, bypasses producer debounce)
    Created,
    /// File contents changed
    Modified,
}

/// A qualifying save-file event, as queued for the consumer
#[derive(Debug, Clone)]
pub struct SaveEvent {
    /// Profile the file belongs to (1-4)
    pub profile: u8,
    /// Path that changed
    pub path: PathBuf,
    /// Type of change
    pub kind: SaveEventKind,
    /// Wall-clock seconds since epoch at enqueue time
    pub timestamp: i64,
}

/// Outcome notifications delivered to the presentation layer
///
/// The watcher pushes these onto a channel the presentation layer polls or
/// blocks on; delivery failures are logged inside the engine, never raised.
#[derive(Debug, Clone)]
pub enum WatcherNotification {
    /// An automatic snapshot was created
    SnapshotCreated(Snapshot),
    /// Snapshot creation failed
    Error(String),
}
