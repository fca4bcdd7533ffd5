//! Automatic snapshot creation for Savepoint
//!
//! This crate watches the save directory and turns qualifying file events
//! into snapshots:
//! - filesystem events are filtered to save files and tagged with a profile
//! - rapid write bursts are debounced per profile before they reach the queue
//! - a dedicated consumer drains the queue and decides create-new vs
//!   overwrite-last, so snapshot I/O never blocks the event source

pub mod debounce;
pub mod event;
pub mod watcher;

pub use debounce::{should_overwrite_last, DebounceState};
pub use event::{SaveEvent, SaveEventKind, WatcherNotification};
pub use watcher::{SaveWatcher, WatcherError};
