//! Open workbook handle over a storage backend

use super::{SheetData, StorageError, TableStorage};

/// An open workbook: the loaded worksheet snapshot plus its backend.
///
/// The handle must be released with [`Workbook::close`] when the caller
/// is done; dropping it only frees memory.
pub struct Workbook {
    sheets: Vec<SheetData>,
    storage: Box<dyn TableStorage>,
}

impl Workbook {
    /// Load the full snapshot from the backend
    pub fn open(mut storage: Box<dyn TableStorage>) -> Result<Self, StorageError> {
        let sheets = storage.load()?;
        log::info!(
            "opened workbook {} with {} worksheet(s)",
            storage.description(),
            sheets.len()
        );
        Ok(Self { sheets, storage })
    }

    /// Number of worksheets in the snapshot
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Worksheet at the given position
    pub fn sheet(&self, position: usize) -> &SheetData {
        &self.sheets[position]
    }

    /// Mutable worksheet at the given position
    pub fn sheet_mut(&mut self, position: usize) -> &mut SheetData {
        &mut self.sheets[position]
    }

    /// Write the snapshot back through the backend
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.sheets)
    }

    /// Release the backend, consuming the handle
    pub fn close(mut self) -> Result<(), StorageError> {
        let description = self.storage.description();
        self.storage.close()?;
        log::info!("closed workbook {}", description);
        Ok(())
    }
}
