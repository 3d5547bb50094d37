//! Archival relocation of staged scan artifacts.
//!
//! Scheduled runs leave artifacts under the staging root, mirrored from
//! the paths the publisher writes. This module sweeps one day's files
//! into the bank checkout, preserving the date folder, so the staging
//! tree stays small and the bank keeps the history.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ArchiveConfig;
use crate::error::Result;

/// Sweep the staged artifacts of `date` for every configured target.
///
/// Returns the number of files moved. A target whose staging directory
/// does not exist, or holds no JSON, contributes nothing; a day without
/// runs stages nothing and that is not an error.
pub fn relocate_for_date(config: &ArchiveConfig, date: NaiveDate) -> Result<usize> {
    let day = date.format("%Y-%m-%d").to_string();
    let mut moved = 0;

    for target in &config.targets {
        let source_dir = config.data_dir.join(&target.staging).join(&day);
        let dest_dir = config.bank_dir.join(&target.archive).join(&day);
        moved += relocate_dir(&source_dir, &dest_dir)?;
    }

    info!(moved, day = %day, "Archive relocation finished");
    Ok(moved)
}

/// Move every `.json` file from `source_dir` into `dest_dir`.
fn relocate_dir(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        debug!(dir = %source_dir.display(), "No staging directory, skipping");
        return Ok(0);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }

    if files.is_empty() {
        debug!(dir = %source_dir.display(), "No staged artifacts, skipping");
        return Ok(0);
    }

    fs::create_dir_all(dest_dir)?;

    let mut moved = 0;
    for path in files {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let dest = dest_dir.join(file_name);

        // Copy then delete; a rename can fail when the bank checkout
        // sits on a different filesystem.
        fs::copy(&path, &dest)?;
        fs::remove_file(&path)?;
        debug!(from = %path.display(), to = %dest.display(), "Relocated artifact");
        moved += 1;
    }

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchiveTarget;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_config(root: &TempDir) -> ArchiveConfig {
        ArchiveConfig {
            data_dir: root.path().join("data"),
            bank_dir: root.path().join("central_bank"),
            targets: vec![
                ArchiveTarget {
                    staging: "strategy".into(),
                    archive: "polymarket/strategy".into(),
                },
                ArchiveTarget {
                    staging: "trends".into(),
                    archive: "polymarket/trends".into(),
                },
            ],
        }
    }

    fn stage_file(config: &ArchiveConfig, staging: &str, day: &str, name: &str) -> PathBuf {
        let dir = config.data_dir.join(staging).join(day);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, r#"{"probe": true}"#).unwrap();
        path
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn relocates_staged_json_into_the_bank() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);
        let staged = stage_file(&config, "trends", "2026-03-05", "radar-2026-3-5-12_00.json");

        let moved = relocate_for_date(&config, test_date()).unwrap();

        assert_eq!(moved, 1);
        assert!(!staged.exists());
        let dest = config
            .bank_dir
            .join("polymarket/trends/2026-03-05/radar-2026-3-5-12_00.json");
        assert!(dest.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), r#"{"probe": true}"#);
    }

    #[test]
    fn missing_staging_directory_is_a_quiet_no_op() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);

        assert_eq!(relocate_for_date(&config, test_date()).unwrap(), 0);
        assert!(!config.bank_dir.exists());
    }

    #[test]
    fn non_json_files_stay_behind() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);
        stage_file(&config, "trends", "2026-03-05", "radar-2026-3-5-12_00.json");
        let notes = config.data_dir.join("trends/2026-03-05/notes.txt");
        fs::write(&notes, "scratch").unwrap();

        let moved = relocate_for_date(&config, test_date()).unwrap();

        assert_eq!(moved, 1);
        assert!(notes.exists());
        assert!(!config
            .bank_dir
            .join("polymarket/trends/2026-03-05/notes.txt")
            .exists());
    }

    #[test]
    fn other_days_are_left_alone() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);
        let yesterday = stage_file(&config, "trends", "2026-03-04", "radar-2026-3-4-12_00.json");

        let moved = relocate_for_date(&config, test_date()).unwrap();

        assert_eq!(moved, 0);
        assert!(yesterday.exists());
    }

    #[test]
    fn every_target_sweeps_in_one_run() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);
        stage_file(&config, "strategy", "2026-03-05", "plan.json");
        stage_file(&config, "trends", "2026-03-05", "radar.json");

        let moved = relocate_for_date(&config, test_date()).unwrap();

        assert_eq!(moved, 2);
        assert!(config
            .bank_dir
            .join("polymarket/strategy/2026-03-05/plan.json")
            .exists());
        assert!(config
            .bank_dir
            .join("polymarket/trends/2026-03-05/radar.json")
            .exists());
    }

    #[test]
    fn json_directories_are_not_files() {
        let root = TempDir::new().unwrap();
        let config = make_config(&root);
        let odd = config.data_dir.join("trends/2026-03-05/nested.json");
        fs::create_dir_all(&odd).unwrap();

        assert_eq!(relocate_for_date(&config, test_date()).unwrap(), 0);
        assert!(odd.is_dir());
    }
}
