//! Schema-aware record store over an open workbook

pub mod error;
pub mod models;
pub mod schema;

pub use error::StoreError;
pub use models::{Category, Product, ProductMovement, Record, RowPatch, Store};
pub use schema::{Column, ColumnKind, TableId, TableSchema};

use chrono::NaiveDate;

use crate::storage::{CellValue, DATE_FORMAT, Row, SheetData, Workbook};

/// The four fixed tables of a retail workbook.
///
/// Binds the first four worksheets by position and keys every row on its
/// first cell. Each mutation flushes synchronously; when the flush fails
/// the in-memory change is rolled back so memory and file stay aligned.
pub struct WorkbookStore {
    workbook: Workbook,
}

impl WorkbookStore {
    /// Bind the store to an open workbook
    pub fn open(workbook: Workbook) -> Result<Self, StoreError> {
        if workbook.sheet_count() < schema::TABLE_COUNT {
            return Err(StoreError::MissingTables {
                found: workbook.sheet_count(),
                needed: schema::TABLE_COUNT,
            });
        }
        let mut store = Self { workbook };
        for table in TableId::ALL {
            store.normalize(table);
        }
        Ok(store)
    }

    /// Caption row of a table
    pub fn captions(&self, table: TableId) -> &[String] {
        &self.workbook.sheet(table.sheet_position()).captions
    }

    /// All rows of a table, in worksheet order
    pub fn rows(&self, table: TableId) -> impl Iterator<Item = &Row> + '_ {
        self.workbook.sheet(table.sheet_position()).rows.iter()
    }

    /// Number of rows in a table
    pub fn row_count(&self, table: TableId) -> usize {
        self.workbook.sheet(table.sheet_position()).rows.len()
    }

    /// Find a row by primary key; linear scan, first match wins
    pub fn find_row(&self, table: TableId, key: &str) -> Option<(usize, &Row)> {
        self.workbook
            .sheet(table.sheet_position())
            .rows
            .iter()
            .enumerate()
            .find(|&(_, row)| row_key(row) == key)
    }

    /// Append a record and flush.
    ///
    /// Rejects keys already present so every row stays reachable by id.
    pub fn append(&mut self, record: Record) -> Result<(), StoreError> {
        let table = record.table();
        let key = record.key().to_string();
        if self.find_row(table, &key).is_some() {
            return Err(StoreError::Duplicate { table, key });
        }

        self.sheet_mut(table).rows.push(record.to_row());
        if let Err(err) = self.flush() {
            self.sheet_mut(table).rows.pop();
            return Err(err);
        }
        log::debug!("appended {} '{}'", table.record_label(), key);
        Ok(())
    }

    /// Apply a patch to the row with the given key and flush
    pub fn update(&mut self, key: &str, patch: RowPatch) -> Result<(), StoreError> {
        let table = patch.table();
        let Some((position, _)) = self.find_row(table, key) else {
            return Err(StoreError::NotFound {
                table,
                key: key.to_string(),
            });
        };

        let previous = self.sheet_mut(table).rows[position].clone();
        patch.apply(&mut self.sheet_mut(table).rows[position]);
        if let Err(err) = self.flush() {
            self.sheet_mut(table).rows[position] = previous;
            return Err(err);
        }
        log::debug!("updated {} '{}'", table.record_label(), key);
        Ok(())
    }

    /// Remove the row with the given key and flush; later rows shift up
    pub fn delete(&mut self, table: TableId, key: &str) -> Result<(), StoreError> {
        let Some((position, _)) = self.find_row(table, key) else {
            return Err(StoreError::NotFound {
                table,
                key: key.to_string(),
            });
        };

        let removed = self.sheet_mut(table).rows.remove(position);
        if let Err(err) = self.flush() {
            self.sheet_mut(table).rows.insert(position, removed);
            return Err(err);
        }
        log::debug!("deleted {} '{}'", table.record_label(), key);
        Ok(())
    }

    /// Write the current snapshot through to storage
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.workbook.save()?;
        Ok(())
    }

    /// Release the underlying workbook
    pub fn close(self) -> Result<(), StoreError> {
        self.workbook.close()?;
        Ok(())
    }

    fn sheet_mut(&mut self, table: TableId) -> &mut SheetData {
        self.workbook.sheet_mut(table.sheet_position())
    }

    /// Pad captions and rows to schema width and type date columns
    fn normalize(&mut self, table: TableId) {
        let schema = table.schema();
        let sheet = self.workbook.sheet_mut(table.sheet_position());
        if sheet.captions.is_empty() {
            sheet.captions = schema.captions();
        } else {
            for col in sheet.captions.len()..schema.width() {
                sheet.captions.push(schema.columns[col].caption.to_string());
            }
        }
        for row in &mut sheet.rows {
            if row.len() < schema.width() {
                row.resize(schema.width(), CellValue::Empty);
            }
            for (col, column) in schema.columns.iter().enumerate() {
                if column.kind == ColumnKind::Date {
                    match &row[col] {
                        CellValue::Text(text) => {
                            if let Ok(date) = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
                                row[col] = CellValue::Date(date);
                            }
                        }
                        // Bound date columns hold calendar dates only.
                        CellValue::DateTime(dt) => row[col] = CellValue::Date(dt.date()),
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Key of a row: its first cell rendered as text
fn row_key(row: &Row) -> String {
    row.first().map(|cell| cell.to_string()).unwrap_or_default()
}
