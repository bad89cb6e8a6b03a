//! Table export to JSON and CSV

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use colored::Colorize;

use super::ExportFormat;
use crate::storage::Row;
use crate::store::{TableId, WorkbookStore};

/// Dump one table to stdout or a file
pub fn run(
    store: &WorkbookStore,
    table: TableId,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let captions = store.captions(table);
    let rows: Vec<&Row> = store.rows(table).collect();

    let payload = match format {
        ExportFormat::Json => render_json(captions, &rows)?,
        ExportFormat::Csv => render_csv(captions, &rows)?,
    };

    match output {
        Some(path) => {
            fs::write(path, &payload)
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            println!(
                "Exported {} record(s) to {}",
                rows.len(),
                path.display().to_string().green()
            );
        }
        None => println!("{payload}"),
    }
    Ok(())
}

/// One JSON object per row, keyed by the table's captions
fn render_json(captions: &[String], rows: &[&Row]) -> Result<String> {
    let records: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (col, caption) in captions.iter().enumerate() {
                let value = row
                    .get(col)
                    .map(|cell| cell.to_json())
                    .unwrap_or(serde_json::Value::Null);
                object.insert(caption.clone(), value);
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::to_string_pretty(&records).context("failed to format JSON export")
}

fn render_csv(captions: &[String], rows: &[&Row]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(captions)
        .context("failed to write CSV header")?;
    for row in rows {
        let cells: Vec<String> = captions
            .iter()
            .enumerate()
            .map(|(col, _)| row.get(col).map(|cell| cell.to_string()).unwrap_or_default())
            .collect();
        writer
            .write_record(&cells)
            .context("failed to write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("failed to finish CSV export: {err}"))?;
    String::from_utf8(bytes).context("CSV export was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CellValue;
    use chrono::NaiveDate;

    fn captions() -> Vec<String> {
        ["OperationId", "Date", "PackageCount", "HasClientCard"]
            .map(str::to_string)
            .to_vec()
    }

    fn movement_rows() -> Vec<Row> {
        vec![vec![
            CellValue::Text("OP-1".to_string()),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()),
            CellValue::Number(3.0),
            CellValue::Bool(true),
        ]]
    }

    #[test]
    fn test_render_json_objects_keyed_by_caption() {
        let rows = movement_rows();
        let refs: Vec<&Row> = rows.iter().collect();

        let rendered = render_json(&captions(), &refs).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed[0]["OperationId"], serde_json::json!("OP-1"));
        assert_eq!(parsed[0]["Date"], serde_json::json!("2024-08-01"));
        assert_eq!(parsed[0]["PackageCount"], serde_json::json!(3));
        assert_eq!(parsed[0]["HasClientCard"], serde_json::json!(true));
    }

    #[test]
    fn test_render_json_empty_table() {
        let rendered = render_json(&captions(), &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }

    #[test]
    fn test_render_csv_rows() {
        let rows = movement_rows();
        let refs: Vec<&Row> = rows.iter().collect();

        let rendered = render_csv(&captions(), &refs).unwrap();
        assert_eq!(
            rendered,
            "OperationId,Date,PackageCount,HasClientCard\nOP-1,2024-08-01,3,yes\n"
        );
    }

    #[test]
    fn test_render_csv_quotes_embedded_commas() {
        let captions = ["StoreId", "Address"].map(str::to_string).to_vec();
        let rows = vec![vec![
            CellValue::Text("S1".to_string()),
            CellValue::Text("1 Main St, North".to_string()),
        ]];
        let refs: Vec<&Row> = rows.iter().collect();

        let rendered = render_csv(&captions, &refs).unwrap();
        assert_eq!(rendered, "StoreId,Address\nS1,\"1 Main St, North\"\n");
    }
}
