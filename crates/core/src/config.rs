//! Settings file handling
//!
//! Settings live in a TOML file owned by the presentation layer; the engine
//! consumes them as plain values. `debounce_secs` is clamped on load so a
//! hand-edited file cannot push the watcher into a degenerate regime.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEBOUNCE_MIN_SECS: u64 = 1;
const DEBOUNCE_MAX_SECS: u64 = 60;

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory containing the game's live save files
    pub save_dir: PathBuf,
    /// Root of the snapshot catalog
    pub snapshot_dir: PathBuf,
    /// Whether the watcher starts with auto-snapshot enabled
    pub auto_snapshot: bool,
    /// Debounce threshold in seconds (clamped to 1-60 on load)
    pub debounce_secs: u64,
    /// Refuse to restore while the game process is running
    pub check_game_running: bool,
    /// External command used to capture screenshots, if any
    pub screenshot_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data = dirs::data_dir().unwrap_or_else(|| home.join(".local/share"));

        Self {
            save_dir: home.join("Saved Games").join("Hades II"),
            snapshot_dir: data.join("savepoint").join("snapshots"),
            auto_snapshot: true,
            debounce_secs: 5,
            check_game_running: true,
            screenshot_command: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, clamping out-of-range values
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        let clamped = settings
            .debounce_secs
            .clamp(DEBOUNCE_MIN_SECS, DEBOUNCE_MAX_SECS);
        if clamped != settings.debounce_secs {
            warn!(
                configured = settings.debounce_secs,
                clamped, "debounce_secs out of range, clamping"
            );
            settings.debounce_secs = clamped;
        }

        Ok(settings)
    }

    /// Write settings to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;
        Ok(())
    }
}
