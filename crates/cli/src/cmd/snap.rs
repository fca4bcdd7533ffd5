//! Take a manual snapshot

use crate::util;
use anyhow::Result;
use owo_colors::OwoColorize;
use savepoint_core::fsops::format_size;

pub fn run(profile: u8, no_screenshot: bool) -> Result<()> {
    let settings = util::load_settings()?;
    let store = util::open_store(&settings);

    match store.create_snapshot(profile, !no_screenshot, false) {
        Some(snapshot) => {
            println!(
                "{} {}",
                "Snapshot created:".green(),
                util::snapshot_name(&snapshot).cyan()
            );
            println!("  Profile:    {}", snapshot.profile);
            println!("  Size:       {}", format_size(snapshot.size));
            println!(
                "  Screenshot: {}",
                if snapshot.has_screenshot { "yes" } else { "no" }
            );
            Ok(())
        }
        None => anyhow::bail!(
            "No snapshot created for profile {} (are there save files in {}?)",
            profile,
            settings.save_dir.display()
        ),
    }
}
