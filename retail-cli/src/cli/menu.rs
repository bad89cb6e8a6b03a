//! Interactive menus for browsing and editing the four tables

use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;

use super::{input, view};
use crate::action_log::ActionLog;
use crate::store::models::{category_cols, movement_cols, product_cols, store_cols};
use crate::store::{
    Category, Product, ProductMovement, Record, RowPatch, Store, StoreError, TableId,
    WorkbookStore,
};

// Fixed demonstration query carried over from the legacy report menu;
// it announces its parameters without evaluating them.
const DEMO_CATEGORY: &str = "Remote-control toys";
const DEMO_AGE_LIMIT: &str = "12+";
const DEMO_DISTRICT: &str = "North";
const DEMO_FROM: &str = "2024-08-01";
const DEMO_TO: &str = "2024-08-05";

/// Run the interactive session until the user exits
pub fn run(store: &mut WorkbookStore, log: &ActionLog) -> Result<()> {
    println!("{}", "Retail workbook manager".bold());
    loop {
        let items = [
            "Product movements",
            "Products",
            "Categories",
            "Stores",
            "Demo query",
            "Exit",
        ];
        let choice = Select::new()
            .with_prompt("Main menu")
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => table_menu(store, log, TableId::Movements)?,
            1 => table_menu(store, log, TableId::Products)?,
            2 => table_menu(store, log, TableId::Categories)?,
            3 => table_menu(store, log, TableId::Stores)?,
            4 => demo_query(log),
            _ => break,
        }
    }
    Ok(())
}

/// Per-table menu; store failures are reported and logged, only prompt
/// failures abort the session.
fn table_menu(store: &mut WorkbookStore, log: &ActionLog, table: TableId) -> Result<()> {
    loop {
        let items = ["View", "Add", "Edit", "Delete", "Back"];
        let choice = Select::new()
            .with_prompt(format!("Menu: {table}"))
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => view_table(store, log, table),
            1 => add_record(store, log, table)?,
            2 => edit_record(store, log, table)?,
            3 => delete_record(store, log, table)?,
            _ => return Ok(()),
        }
    }
}

fn view_table(store: &WorkbookStore, log: &ActionLog, table: TableId) {
    let captions = store.captions(table).to_vec();
    let rows: Vec<Vec<String>> = store
        .rows(table)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    println!("{}", view::render_table(&captions, &rows));
    println!("{}", format!("{} record(s)", rows.len()).dimmed());
    log.record(&format!("Viewed {table}"));
}

fn add_record(store: &mut WorkbookStore, log: &ActionLog, table: TableId) -> Result<()> {
    let record = match table {
        TableId::Movements => Record::Movement(collect_movement()?),
        TableId::Products => Record::Product(collect_product()?),
        TableId::Categories => Record::Category(collect_category()?),
        TableId::Stores => Record::Store(collect_store()?),
    };
    let key = record.key().to_string();
    match store.append(record) {
        Ok(()) => {
            println!("{}", "Record added.".green());
            log.record(&format!("Added {} '{}'", table.record_label(), key));
        }
        Err(err) => report_failure(log, "Add failed", &err),
    }
    Ok(())
}

fn edit_record(store: &mut WorkbookStore, log: &ActionLog, table: TableId) -> Result<()> {
    let key = input::prompt(table.schema().key_caption(), input::non_empty)?;
    let current = match store.find_row(table, &key) {
        Some((_, row)) => row.clone(),
        None => {
            let err = StoreError::NotFound { table, key };
            report_failure(log, "Edit failed", &err);
            return Ok(());
        }
    };

    let patch = match table {
        TableId::Movements => RowPatch::Movement {
            date: input::prompt_optional(
                "New date (YYYY-MM-DD)",
                &current[movement_cols::DATE].to_string(),
                input::date,
            )?,
            operation_type: input::prompt_optional(
                "New operation type",
                &current[movement_cols::OPERATION_TYPE].to_string(),
                input::non_empty,
            )?,
        },
        TableId::Products => RowPatch::Product {
            product_name: input::prompt_optional(
                "New product name",
                &current[product_cols::PRODUCT_NAME].to_string(),
                input::non_empty,
            )?,
        },
        TableId::Categories => RowPatch::Category {
            age_limit: input::prompt_optional(
                "New age limit",
                &current[category_cols::AGE_LIMIT].to_string(),
                input::non_empty,
            )?,
        },
        TableId::Stores => RowPatch::Store {
            address: input::prompt_optional(
                "New address",
                &current[store_cols::ADDRESS].to_string(),
                input::non_empty,
            )?,
        },
    };

    match store.update(&key, patch) {
        Ok(()) => {
            println!("{}", "Record updated.".green());
            log.record(&format!("Updated {} '{}'", table.record_label(), key));
        }
        Err(err) => report_failure(log, "Edit failed", &err),
    }
    Ok(())
}

fn delete_record(store: &mut WorkbookStore, log: &ActionLog, table: TableId) -> Result<()> {
    let key = input::prompt(table.schema().key_caption(), input::non_empty)?;
    match store.delete(table, &key) {
        Ok(()) => {
            println!("{}", "Record deleted.".green());
            log.record(&format!("Deleted {} '{}'", table.record_label(), key));
        }
        Err(err) => report_failure(log, "Delete failed", &err),
    }
    Ok(())
}

fn demo_query(log: &ActionLog) {
    println!(
        "Total sale value of '{}' products, age limit {}, district {}, {} to {}",
        DEMO_CATEGORY.cyan(),
        DEMO_AGE_LIMIT,
        DEMO_DISTRICT,
        DEMO_FROM,
        DEMO_TO
    );
    println!(
        "{}",
        "Query accepted; evaluation is not wired up yet.".dimmed()
    );
    log.record("Ran the demo query");
}

fn report_failure(log: &ActionLog, context: &str, err: &StoreError) {
    println!("{}", format!("{context}: {err}").red());
    log.record(&format!("{context}: {err}"));
}

fn collect_movement() -> Result<ProductMovement> {
    Ok(ProductMovement {
        operation_id: input::prompt("Operation id", input::non_empty)?,
        date: input::prompt("Date (YYYY-MM-DD)", input::date)?,
        store_id: input::prompt("Store id", input::non_empty)?,
        article_id: input::prompt("Article id", input::non_empty)?,
        operation_type: input::prompt("Operation type", input::non_empty)?,
        package_count: input::prompt("Package count (1-1000)", |s| {
            input::int_in_range(s, 1, 1000)
        })? as u32,
        has_client_card: input::prompt("Client card (yes/no)", input::yes_no)?,
    })
}

fn collect_product() -> Result<Product> {
    Ok(Product {
        article_id: input::prompt("Article id", input::non_empty)?,
        category_id: input::prompt("Category id", input::non_empty)?,
        product_name: input::prompt("Product name", input::non_empty)?,
        purchase_price: input::prompt("Purchase price", input::positive_decimal)?,
        sale_price: input::prompt("Sale price", input::positive_decimal)?,
        discount_percent: input::prompt("Discount percent (0-100)", |s| {
            input::int_in_range(s, 0, 100)
        })? as u8,
    })
}

fn collect_category() -> Result<Category> {
    Ok(Category {
        category_id: input::prompt("Category id", input::non_empty)?,
        category_name: input::prompt("Category name", input::non_empty)?,
        age_limit: input::prompt("Age limit", input::non_empty)?,
    })
}

fn collect_store() -> Result<Store> {
    Ok(Store {
        store_id: input::prompt("Store id", input::non_empty)?,
        district: input::prompt("District", input::non_empty)?,
        address: input::prompt("Address", input::non_empty)?,
    })
}
