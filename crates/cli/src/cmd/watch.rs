//! Watch the save directory and snapshot automatically

use crate::util;
use anyhow::{Context, Result};
use crossbeam_channel::{select, unbounded};
use owo_colors::OwoColorize;
use savepoint_watcher::{SaveWatcher, WatcherNotification};
use std::sync::Arc;

pub fn run() -> Result<()> {
    let settings = util::load_settings()?;
    let store = Arc::new(util::open_store(&settings));

    let mut watcher = SaveWatcher::new(Arc::clone(&store), settings.debounce_secs);
    let notifications = watcher.notifications();

    watcher
        .start()
        .context("Failed to start the save watcher")?;
    if settings.auto_snapshot {
        watcher.enable();
    } else {
        println!(
            "{}",
            "auto_snapshot is off in settings; watching without snapshotting".yellow()
        );
    }

    println!(
        "Watching {}",
        store.save_dir().display().to_string().cyan()
    );
    println!("  {}", "Press Enter to stop".dimmed());

    // Enter on stdin ends the session.
    let (quit_tx, quit_rx) = unbounded::<()>();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = quit_tx.send(());
    });

    loop {
        select! {
            recv(notifications) -> notification => match notification {
                Ok(WatcherNotification::SnapshotCreated(snapshot)) => {
                    println!(
                        "{} profile {} -> {}",
                        "snapshot".green(),
                        snapshot.profile,
                        util::snapshot_name(&snapshot).cyan()
                    );
                }
                Ok(WatcherNotification::Error(message)) => {
                    println!("{} {}", "error".red(), message);
                }
                Err(_) => break,
            },
            recv(quit_rx) -> _ => break,
        }
    }

    tracing::info!("watch session ended by user");
    watcher.stop();
    println!("Stopped");
    Ok(())
}
