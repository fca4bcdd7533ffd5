//! Restore a snapshot into the live save directory

use crate::{process, util};
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run(reference: &str, no_backup: bool, yes: bool) -> Result<()> {
    let settings = util::load_settings()?;
    let store = util::open_store(&settings);

    let listing = store.list_snapshots(None);
    let snapshot = util::resolve_snapshot_ref(reference, &listing)?;
    let name = util::snapshot_name(&snapshot);

    if settings.check_game_running && process::game_running(process::GAME_PROCESS_NAME) {
        anyhow::bail!("Hades II appears to be running; close it before restoring");
    }

    if !yes {
        println!(
            "Restore snapshot {} (profile {})?",
            name.cyan(),
            snapshot.profile
        );
        if no_backup {
            println!(
                "  {}",
                "The current save files will NOT be backed up".yellow()
            );
        } else {
            println!("  The current save files will be backed up first");
        }
        if !util::confirm("Continue?") {
            println!("Aborted");
            return Ok(());
        }
    }

    if store.restore_snapshot(&snapshot, !no_backup) {
        println!("{} {}", "Restored".green(), name.cyan());
        if !no_backup {
            println!(
                "  Previous save files: {}",
                store.live_backup_dir(snapshot.profile).display()
            );
        }
        Ok(())
    } else {
        anyhow::bail!("Restore of {} failed (see log output)", name)
    }
}
