//! Shared primitives for Savepoint
//!
//! This crate provides:
//! - Save-file naming conventions and profile discovery
//! - Snapshot folder name encode/decode
//! - Relative/absolute time formatting
//! - Best-effort file transfer primitives
//! - Settings file handling

pub mod config;
pub mod fsops;
pub mod naming;
pub mod profile;
pub mod timefmt;

pub use config::Settings;
pub use naming::{parse_snapshot_folder_name, snapshot_folder_name, ParsedFolderName};
pub use profile::{extract_profile_number, find_profile_files, is_save_file, PROFILE_RANGE};

/// Result type for savepoint operations
pub type Result<T> = anyhow::Result<T>;
