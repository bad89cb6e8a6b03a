//! In-memory storage backend for tests

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{SheetData, StorageError, TableStorage};

/// Shared state behind a [`MemoryStorage`] handle
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub sheets: Vec<SheetData>,
    pub save_count: usize,
    /// Number of upcoming saves that should fail
    pub fail_saves: usize,
    pub closed: bool,
}

/// Storage backend holding sheets in memory
pub(crate) struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    /// Build a backend seeded with the given sheets, returning a handle
    /// to its state so tests can inspect and steer it after the backend
    /// has been boxed away.
    pub(crate) fn with_sheets(sheets: Vec<SheetData>) -> (Self, Arc<Mutex<MemoryState>>) {
        let state = Arc::new(Mutex::new(MemoryState {
            sheets,
            ..Default::default()
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl TableStorage for MemoryStorage {
    fn description(&self) -> String {
        "memory".to_string()
    }

    fn load(&mut self) -> Result<Vec<SheetData>, StorageError> {
        Ok(self.state.lock().unwrap().sheets.clone())
    }

    fn save(&mut self, sheets: &[SheetData]) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves > 0 {
            state.fail_saves -= 1;
            return Err(StorageError::persistence(
                Path::new("<memory>"),
                std::io::Error::other("simulated save failure"),
            ));
        }
        state.sheets = sheets.to_vec();
        state.save_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), StorageError> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }
}
