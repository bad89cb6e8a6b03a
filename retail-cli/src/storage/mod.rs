//! Workbook persistence behind a pluggable backend

pub mod value;
pub mod workbook;
pub mod xlsx;

#[cfg(test)]
pub(crate) mod memory;

pub use value::{CellValue, DATE_FORMAT, Row};
pub use workbook::Workbook;
pub use xlsx::XlsxStorage;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// One worksheet: tab name, caption row, and data rows
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub captions: Vec<String>,
    pub rows: Vec<Row>,
}

impl SheetData {
    /// Create an empty worksheet with the given tab name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            captions: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Failures raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The path cannot name a workbook at all
    #[error("invalid workbook path '{}': {}", .path.display(), .reason)]
    InvalidPath { path: PathBuf, reason: String },
    /// The workbook exists in name but cannot be opened
    #[error("workbook '{}' is unavailable: {}", .path.display(), .reason)]
    Unavailable { path: PathBuf, reason: String },
    /// A write to the backing resource failed
    #[error("failed to persist workbook '{}': {}", .path.display(), .source)]
    Persistence {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    pub(crate) fn invalid_path(path: &Path, reason: impl Into<String>) -> Self {
        StorageError::InvalidPath {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unavailable(path: &Path, reason: impl Into<String>) -> Self {
        StorageError::Unavailable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn persistence(
        path: &Path,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Persistence {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

/// Reads and writes complete workbook snapshots.
///
/// Implementations own the backing resource. `load` runs once when the
/// workbook is opened; `save` rewrites the whole snapshot on every flush.
pub trait TableStorage {
    /// Human-readable identity of the backing resource, for messages
    fn description(&self) -> String;

    /// Read every worksheet from the backing resource
    fn load(&mut self) -> Result<Vec<SheetData>, StorageError>;

    /// Replace the backing resource contents with this snapshot
    fn save(&mut self, sheets: &[SheetData]) -> Result<(), StorageError>;

    /// Release the backing resource
    fn close(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}
