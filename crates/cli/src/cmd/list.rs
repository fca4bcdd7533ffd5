//! List snapshots, newest first

use crate::util;
use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;

pub fn run(profile: Option<u8>) -> Result<()> {
    let settings = util::load_settings()?;
    let store = util::open_store(&settings);
    let snapshots = store.list_snapshots(profile);

    if snapshots.is_empty() {
        println!("{}", "No snapshots yet".dimmed());
        println!("  {}", "Tip: take one with 'sp snap <profile>'".dimmed());
        return Ok(());
    }

    let now = Utc::now().timestamp();
    for (i, snapshot) in snapshots.iter().enumerate() {
        util::display_snapshot_row(i + 1, snapshot, now);
    }
    println!();
    println!("{} snapshot(s)", snapshots.len());
    Ok(())
}
