//! Append-only action log for user-visible operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;

/// Timestamped record of what the user did, separate from diagnostics.
///
/// A failed write never fails the operation it describes; it is reported
/// on stderr and the session continues.
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    /// Bind to the log file, creating it when missing
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        OpenOptions::new().create(true).append(true).open(&path)?;
        log::debug!("action log at {}", path.display());
        Ok(Self { path })
    }

    /// Append one timestamped entry
    pub fn record(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{timestamp}: {message}\n");
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = result {
            log::warn!("action log write failed: {err}");
            eprintln!(
                "{}",
                format!("warning: could not write to {}: {err}", self.path.display()).yellow()
            );
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.log");
        assert!(!path.exists());
        ActionLog::open(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_record_appends_timestamped_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActionLog::open(dir.path().join("actions.log")).unwrap();

        log.record("Added store 'S1'");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let line = contents.lines().next().unwrap();
        let (timestamp, message) = line.split_once(": ").unwrap();
        assert!(NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(message, "Added store 'S1'");
    }

    #[test]
    fn test_record_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActionLog::open(dir.path().join("actions.log")).unwrap();

        log.record("first");
        log.record("second");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second"));
    }
}
