//! Show settings and catalog status

use crate::util;
use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use savepoint_core::fsops::{directory_size, format_size};
use savepoint_core::profile::PROFILE_RANGE;
use savepoint_core::timefmt::time_ago;

pub fn run() -> Result<()> {
    let settings = util::load_settings()?;
    let store = util::open_store(&settings);

    println!("{}", "Savepoint Status".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!(
        "Saves:         {}",
        settings.save_dir.display().to_string().cyan()
    );
    println!(
        "Snapshots:     {}",
        settings.snapshot_dir.display().to_string().cyan()
    );
    println!(
        "Auto-snapshot: {} (threshold {}s)",
        if settings.auto_snapshot {
            "on".green().to_string()
        } else {
            "off".yellow().to_string()
        },
        settings.debounce_secs
    );
    println!();

    let now = Utc::now().timestamp();
    let mut total_count = 0;
    for profile in PROFILE_RANGE {
        let snapshots = store.list_snapshots(Some(profile));
        if snapshots.is_empty() {
            println!("  Profile {}: {}", profile, "no snapshots".dimmed());
            continue;
        }
        total_count += snapshots.len();
        println!(
            "  Profile {}: {} snapshot(s), newest {}",
            profile,
            snapshots.len(),
            time_ago(snapshots[0].timestamp, now)
        );
    }
    println!();
    println!("Total:        {} snapshot(s)", total_count);
    println!(
        "Catalog size: {}",
        format_size(directory_size(&settings.snapshot_dir))
    );

    if total_count == 0 {
        println!();
        println!(
            "{}",
            "Tip: run 'sp watch' while playing to snapshot automatically".dimmed()
        );
    }
    Ok(())
}
