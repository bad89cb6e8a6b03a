//! Store error types

use thiserror::Error;

use super::schema::TableId;
use crate::storage::StorageError;

/// Failures raised by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Table number outside 1..=4
    #[error("table number must be between 1 and 4, got {0}")]
    InvalidTable(usize),
    /// The workbook has fewer worksheets than the store binds
    #[error("workbook has {found} worksheet(s) but the store binds {needed}")]
    MissingTables { found: usize, needed: usize },
    /// No row carries the requested key
    #[error("no record with id '{key}' in {table}")]
    NotFound { table: TableId, key: String },
    /// A row with the key already exists
    #[error("a record with id '{key}' already exists in {table}")]
    Duplicate { table: TableId, key: String },
    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
