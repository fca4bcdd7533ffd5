//! Snapshot folder name encode/decode
//!
//! Snapshot folders are named `YYYY-MM-DD_HH-MM-SS_profile{N}` in local
//! time, which sorts chronologically by construction. The name doubles as a
//! fallback metadata source: a folder whose `metadata.json` is missing can
//! still be recognized by parsing its name.

use crate::profile::PROFILE_RANGE;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Timestamp and profile recovered from a snapshot folder name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedFolderName {
    /// Seconds since epoch, truncated to second resolution
    pub timestamp: i64,
    /// Profile number (1-4)
    pub profile: u8,
}

/// Encode a snapshot folder name for a profile at the given timestamp
///
/// Second-resolution only. Collisions within the same second are handled by
/// the store, which appends a `-N` suffix to the name; the suffix survives
/// [`parse_snapshot_folder_name`] because the profile digit run terminates
/// at the first non-digit.
pub fn snapshot_folder_name(profile: u8, timestamp: i64) -> String {
    let dt: DateTime<Local> = match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt,
        None => Local::now(),
    };
    format!("{}_profile{}", dt.format("%Y-%m-%d_%H-%M-%S"), profile)
}

/// Decode a snapshot folder name back into timestamp and profile
///
/// Splits on `_` and expects at least date, time and `profile{N}` parts;
/// extra parts are tolerated and ignored. The time part uses `-` in place
/// of `:`. Any parse failure yields `None`.
pub fn parse_snapshot_folder_name(name: &str) -> Option<ParsedFolderName> {
    let parts: Vec<&str> = name.split('_').collect();
    if parts.len() < 3 {
        return None;
    }

    let profile_part = parts[2].strip_prefix("profile")?;
    let digits: String = profile_part
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let profile: u8 = digits.parse().ok()?;
    if !PROFILE_RANGE.contains(&profile) {
        return None;
    }

    let datetime = format!("{} {}", parts[0], parts[1].replace('-', ":"));
    let naive = NaiveDateTime::parse_from_str(&datetime, "%Y-%m-%d %H:%M:%S").ok()?;
    let timestamp = Local.from_local_datetime(&naive).earliest()?.timestamp();

    Some(ParsedFolderName { timestamp, profile })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_folder_name_format() {
        let ts = Local
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 5)
            .unwrap()
            .timestamp();
        assert_eq!(snapshot_folder_name(2, ts), "2024-03-01_12-30-05_profile2");
    }

    #[test]
    fn test_round_trip_all_profiles() {
        let ts = Local
            .with_ymd_and_hms(2025, 11, 30, 23, 59, 59)
            .unwrap()
            .timestamp();

        for profile in PROFILE_RANGE {
            let name = snapshot_folder_name(profile, ts);
            let parsed = parse_snapshot_folder_name(&name).unwrap();
            assert_eq!(parsed.timestamp, ts);
            assert_eq!(parsed.profile, profile);
        }
    }

    #[test]
    fn test_parse_tolerates_collision_suffix() {
        let ts = Local
            .with_ymd_and_hms(2024, 6, 15, 8, 0, 0)
            .unwrap()
            .timestamp();
        let name = format!("{}-2", snapshot_folder_name(1, ts));
        let parsed = parse_snapshot_folder_name(&name).unwrap();
        assert_eq!(parsed.timestamp, ts);
        assert_eq!(parsed.profile, 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_snapshot_folder_name(""), None);
        assert_eq!(parse_snapshot_folder_name("not-a-snapshot"), None);
        assert_eq!(parse_snapshot_folder_name("2024-03-01_12-30-05"), None);
        assert_eq!(
            parse_snapshot_folder_name("2024-03-01_12-30-05_slot2"),
            None
        );
        assert_eq!(
            parse_snapshot_folder_name("2024-03-01_12-30-05_profile9"),
            None
        );
        assert_eq!(
            parse_snapshot_folder_name("2024-13-01_12-30-05_profile2"),
            None
        );
        assert_eq!(
            parse_snapshot_folder_name("2024-03-01_25-30-05_profile2"),
            None
        );
    }
}
