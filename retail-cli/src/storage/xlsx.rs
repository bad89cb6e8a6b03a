//! XLSX storage backend built on calamine and rust_xlsxwriter

use std::path::PathBuf;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{CellValue, DATE_FORMAT, SheetData, StorageError, TableStorage};

/// Storage backend that reads and writes a single .xlsx file.
///
/// Every save rewrites the whole file from the in-memory snapshot, so
/// worksheets beyond the ones the store manages survive untouched.
#[derive(Debug)]
pub struct XlsxStorage {
    path: PathBuf,
}

impl XlsxStorage {
    /// Validate the path and bind to an existing workbook file
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StorageError::invalid_path(&path, "path is empty"));
        }
        if !path.is_file() {
            return Err(StorageError::unavailable(&path, "file not found"));
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") => Ok(Self { path }),
            Some("xls") => Err(StorageError::unavailable(
                &path,
                "legacy .xls workbooks cannot be written back; re-save the file as .xlsx first",
            )),
            _ => Err(StorageError::invalid_path(
                &path,
                "expected an .xls or .xlsx extension",
            )),
        }
    }
}

impl TableStorage for XlsxStorage {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&mut self) -> Result<Vec<SheetData>, StorageError> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|err| {
            StorageError::unavailable(&self.path, format!("not a readable workbook: {err}"))
        })?;

        let names: Vec<String> = workbook.sheet_names().to_owned();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook.worksheet_range(&name).map_err(|err| {
                StorageError::unavailable(
                    &self.path,
                    format!("cannot read worksheet '{name}': {err}"),
                )
            })?;

            let mut rows = range.rows();
            let captions = rows
                .next()
                .map(|row| row.iter().map(cell_caption).collect())
                .unwrap_or_default();
            let rows = rows
                .map(|row| row.iter().map(cell_value).collect())
                .collect();

            sheets.push(SheetData {
                name,
                captions,
                rows,
            });
        }

        log::debug!(
            "loaded {} worksheet(s) from {}",
            sheets.len(),
            self.path.display()
        );
        Ok(sheets)
    }

    fn save(&mut self, sheets: &[SheetData]) -> Result<(), StorageError> {
        let mut workbook =
            build_workbook(sheets).map_err(|err| StorageError::persistence(&self.path, err))?;
        workbook
            .save(&self.path)
            .map_err(|err| StorageError::persistence(&self.path, err))?;

        log::debug!(
            "persisted {} worksheet(s) to {}",
            sheets.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn build_workbook(sheets: &[SheetData]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for (col, caption) in sheet.captions.iter().enumerate() {
            worksheet.write_string(0, col as u16, caption)?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                write_cell(
                    worksheet,
                    (row_idx + 1) as u32,
                    col as u16,
                    cell,
                    &datetime_format,
                )?;
            }
        }
    }
    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    datetime_format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Date(d) => {
            // Dates go out as ISO text so files stay readable without
            // cell-format metadata.
            worksheet.write_string(row, col, &d.format(DATE_FORMAT).to_string())?;
        }
        CellValue::DateTime(dt) => {
            // Time-of-day cells keep their serial value; the number format
            // is what lets the next load recognize them as datetimes.
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s).unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn cell_caption(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => cell_value(other).to_string(),
    }
}

fn parse_iso(s: &str) -> Option<CellValue> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(CellValue::DateTime(dt));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(CellValue::Date)
}
