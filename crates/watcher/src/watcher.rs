//! Save directory watcher and snapshot consumer
//!
//! One `notify` watcher observes the save directory and feeds qualifying
//! events through the producer-side debounce onto an unbounded queue. A
//! dedicated consumer thread drains the queue FIFO and performs snapshot
//! I/O, polling a stop flag between events so shutdown is observed within
//! one poll interval. Disabling only flips an atomic flag: events keep
//! flowing and are discarded at the consumer, so monitoring resumes
//! instantly on enable.

use crate::debounce::{should_overwrite_last, DebounceState};
use crate::event::{SaveEvent, SaveEventKind, WatcherNotification};
use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use savepoint_core::profile::{extract_profile_number, is_save_file};
use savepoint_store::SnapshotStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How often the consumer checks the stop flag while idle
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Errors starting the watch subsystem
///
/// A failed start leaves auto-snapshot inert; everything else in the
/// system stays usable.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("file watcher unavailable: {0}")]
    Unavailable(#[from] notify::Error),
    #[error("failed to spawn snapshot consumer: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Watches the save directory and creates snapshots automatically
pub struct SaveWatcher {
    store: Arc<SnapshotStore>,
    threshold_secs: i64,
    enabled: Arc<AtomicBool>,
    notify_tx: Sender<WatcherNotification>,
    notify_rx: Receiver<WatcherNotification>,
    running: Option<Running>,
}

/// Live observation state, present only between start and stop
struct Running {
    _fs_watcher: RecommendedWatcher,
    stop: Arc<AtomicBool>,
    consumer: JoinHandle<()>,
}

impl SaveWatcher {
    /// Create a stopped, disabled watcher over the given store
    pub fn new(store: Arc<SnapshotStore>, threshold_secs: u64) -> Self {
        let (notify_tx, notify_rx) = unbounded();
        Self {
            store,
            threshold_secs: threshold_secs as i64,
            enabled: Arc::new(AtomicBool::new(false)),
            notify_tx,
            notify_rx,
            running: None,
        }
    }

    /// Channel of snapshot/error notifications for the presentation layer
    ///
    /// Notifications are delivered from the consumer thread; the receiver
    /// decides how to marshal them into its own context.
    pub fn notifications(&self) -> Receiver<WatcherNotification> {
        self.notify_rx.clone()
    }

    /// Start observing the save directory
    ///
    /// Starting an already-running watcher is a logged no-op.
    pub fn start(&mut self) -> Result<(), WatcherError> {
        if self.running.is_some() {
            warn!("watcher is already running");
            return Ok(());
        }

        let (event_tx, event_rx) = unbounded::<SaveEvent>();

        let mut debounce = DebounceState::new(self.threshold_secs);
        let mut fs_watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
                Ok(event) => enqueue_matching(&event, &mut debounce, &event_tx),
                Err(e) => warn!(error = %e, "filesystem watch error"),
            })?;
        fs_watcher.watch(self.store.save_dir(), RecursiveMode::Recursive)?;

        let stop = Arc::new(AtomicBool::new(false));
        let consumer = thread::Builder::new()
            .name("savepoint-consumer".to_string())
            .spawn({
                let store = Arc::clone(&self.store);
                let enabled = Arc::clone(&self.enabled);
                let stop = Arc::clone(&stop);
                let notify_tx = self.notify_tx.clone();
                let threshold_secs = self.threshold_secs;
                move || consumer_loop(event_rx, store, enabled, stop, notify_tx, threshold_secs)
            })?;

        info!(dir = %self.store.save_dir().display(), "watcher started");
        self.running = Some(Running {
            _fs_watcher: fs_watcher,
            stop,
            consumer,
        });
        Ok(())
    }

    /// Stop observing and join the consumer
    ///
    /// Dropping the filesystem watcher ends event delivery; the consumer
    /// notices the stop flag within one poll interval (an in-flight
    /// snapshot always runs to completion first). Events still queued at
    /// that point represent obsolete save states and are dropped.
    pub fn stop(&mut self) {
        let running = match self.running.take() {
            Some(running) => running,
            None => return,
        };

        running.stop.store(true, Ordering::Relaxed);
        drop(running._fs_watcher);

        if running.consumer.join().is_err() {
            warn!("snapshot consumer panicked during shutdown");
        }
        info!("watcher stopped");
    }

    /// Resume automatic snapshot creation
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
        info!("auto-snapshot enabled");
    }

    /// Pause automatic snapshot creation without stopping observation
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
        info!("auto-snapshot disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for SaveWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Filter a raw filesystem event and queue whatever qualifies
///
/// Runs on the notify event thread, so it only does name checks and a
/// channel send; all snapshot I/O happens on the consumer side.
fn enqueue_matching(event: &Event, debounce: &mut DebounceState, queue: &Sender<SaveEvent>) {
    let kind = match event.kind {
        EventKind::Create(_) => SaveEventKind::Created,
        EventKind::Modify(_) => SaveEventKind::Modified,
        _ => return,
    };

    for path in &event.paths {
        if path.is_dir() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !is_save_file(name) {
            continue;
        }
        let profile = match extract_profile_number(name) {
            Some(profile) => profile,
            None => continue,
        };

        let timestamp = Utc::now().timestamp();
        if !debounce.admit(profile, kind, timestamp) {
            debug!(path = %path.display(), "debounced save event");
            continue;
        }

        debug!(path = %path.display(), profile, ?kind, "queueing save event");
        let event = SaveEvent {
            profile,
            path: path.clone(),
            kind,
            timestamp,
        };
        if queue.send(event).is_err() {
            // Consumer is gone; the watcher is shutting down.
            return;
        }
    }
}

/// Drain the event queue until told to stop
fn consumer_loop(
    events: Receiver<SaveEvent>,
    store: Arc<SnapshotStore>,
    enabled: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    notifications: Sender<WatcherNotification>,
    threshold_secs: i64,
) {
    debug!("snapshot consumer started");

    loop {
        match events.recv_timeout(POLL_INTERVAL) {
            Ok(event) => {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                if !enabled.load(Ordering::Relaxed) {
                    debug!(profile = event.profile, "auto-snapshot disabled, dropping event");
                    continue;
                }
                handle_event(&event, &store, threshold_secs, &notifications);
            }
            Err(RecvTimeoutError::Timeout) => {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    debug!("snapshot consumer stopped");
}

/// Turn one queued event into a snapshot and notify the outcome
fn handle_event(
    event: &SaveEvent,
    store: &SnapshotStore,
    threshold_secs: i64,
    notifications: &Sender<WatcherNotification>,
) {
    let overwrite = should_overwrite_last(
        store.last_snapshot_time(event.profile),
        event.timestamp,
        threshold_secs,
    );

    info!(profile = event.profile, overwrite, "creating automatic snapshot");
    let notification = match store.create_snapshot(event.profile, true, overwrite) {
        Some(snapshot) => WatcherNotification::SnapshotCreated(snapshot),
        None => {
            warn!(profile = event.profile, "automatic snapshot failed");
            WatcherNotification::Error(format!(
                "failed to create snapshot for profile {}",
                event.profile
            ))
        }
    };

    if notifications.send(notification).is_err() {
        debug!("notification receiver dropped");
    }
}
