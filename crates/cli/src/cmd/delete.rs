//! Delete snapshots

use crate::util;
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run(references: &[String], yes: bool) -> Result<()> {
    let settings = util::load_settings()?;
    let store = util::open_store(&settings);

    // Resolve everything against one listing so indices stay consistent
    // no matter the deletion order.
    let listing = store.list_snapshots(None);
    let mut selected = Vec::new();
    for reference in references {
        selected.push(util::resolve_snapshot_ref(reference, &listing)?);
    }

    if !yes {
        for snapshot in &selected {
            println!("  {}", util::snapshot_name(snapshot).cyan());
        }
        if !util::confirm(&format!("Delete {} snapshot(s)?", selected.len())) {
            println!("Aborted");
            return Ok(());
        }
    }

    let deleted = store.delete_snapshots(&selected);
    if deleted == selected.len() {
        println!("{} {} snapshot(s)", "Deleted".green(), deleted);
    } else {
        println!(
            "{} {} of {} snapshot(s) (see log output)",
            "Deleted".yellow(),
            deleted,
            selected.len()
        );
    }
    Ok(())
}
