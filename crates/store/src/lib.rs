//! Snapshot catalog for Savepoint
//!
//! This crate owns the on-disk snapshot layout:
//!
//! ```text
//! snapshot_dir/
//!   Profile{N}/
//!     YYYY-MM-DD_HH-MM-SS_profile{N}/
//!       Profile{N}.sav
//!       Profile{N}_Temp.sav
//!       snapshot.png        (optional)
//!       metadata.json
//!   live_backup/
//!     Profile{N}/           (rolling pre-restore copy, overwritten)
//! ```
//!
//! Every operation degrades to `None`/`false`/a count and logs the rest;
//! a malformed catalog entry never takes the catalog down with it.

pub mod capture;
pub mod snapshot;
pub mod store;

pub use capture::{CommandCapture, NoopCapture, ScreenCapture};
pub use snapshot::{Snapshot, SnapshotMeta, METADATA_FILE, SCREENSHOT_FILE};
pub use store::SnapshotStore;
