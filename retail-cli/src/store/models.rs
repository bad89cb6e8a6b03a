//! Record types for the four managed tables

use chrono::NaiveDate;

use super::schema::TableId;
use crate::storage::{CellValue, Row};

/// Column positions in the product movements table
pub mod movement_cols {
    pub const OPERATION_ID: usize = 0;
    pub const DATE: usize = 1;
    pub const STORE_ID: usize = 2;
    pub const ARTICLE_ID: usize = 3;
    pub const OPERATION_TYPE: usize = 4;
    pub const PACKAGE_COUNT: usize = 5;
    pub const HAS_CLIENT_CARD: usize = 6;
}

/// Column positions in the products table
pub mod product_cols {
    pub const ARTICLE_ID: usize = 0;
    pub const CATEGORY_ID: usize = 1;
    pub const PRODUCT_NAME: usize = 2;
    pub const PURCHASE_PRICE: usize = 3;
    pub const SALE_PRICE: usize = 4;
    pub const DISCOUNT_PERCENT: usize = 5;
}

/// Column positions in the categories table
pub mod category_cols {
    pub const CATEGORY_ID: usize = 0;
    pub const CATEGORY_NAME: usize = 1;
    pub const AGE_LIMIT: usize = 2;
}

/// Column positions in the stores table
pub mod store_cols {
    pub const STORE_ID: usize = 0;
    pub const DISTRICT: usize = 1;
    pub const ADDRESS: usize = 2;
}

/// A goods movement through a store
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMovement {
    pub operation_id: String,
    pub date: NaiveDate,
    pub store_id: String,
    pub article_id: String,
    pub operation_type: String,
    pub package_count: u32,
    pub has_client_card: bool,
}

impl ProductMovement {
    pub fn to_row(&self) -> Row {
        vec![
            CellValue::Text(self.operation_id.clone()),
            CellValue::Date(self.date),
            CellValue::Text(self.store_id.clone()),
            CellValue::Text(self.article_id.clone()),
            CellValue::Text(self.operation_type.clone()),
            CellValue::Number(self.package_count as f64),
            CellValue::Bool(self.has_client_card),
        ]
    }

    /// Decode a worksheet row; `None` when a cell does not fit the schema
    pub fn from_row(row: &[CellValue]) -> Option<Self> {
        Some(Self {
            operation_id: row.get(movement_cols::OPERATION_ID)?.as_text()?.to_string(),
            date: row.get(movement_cols::DATE)?.as_date()?,
            store_id: row.get(movement_cols::STORE_ID)?.as_text()?.to_string(),
            article_id: row.get(movement_cols::ARTICLE_ID)?.as_text()?.to_string(),
            operation_type: row
                .get(movement_cols::OPERATION_TYPE)?
                .as_text()?
                .to_string(),
            package_count: row.get(movement_cols::PACKAGE_COUNT)?.as_number()? as u32,
            has_client_card: row.get(movement_cols::HAS_CLIENT_CARD)?.as_flag()?,
        })
    }
}

/// A product in the assortment
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub article_id: String,
    pub category_id: String,
    pub product_name: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub discount_percent: u8,
}

impl Product {
    pub fn to_row(&self) -> Row {
        vec![
            CellValue::Text(self.article_id.clone()),
            CellValue::Text(self.category_id.clone()),
            CellValue::Text(self.product_name.clone()),
            CellValue::Number(self.purchase_price),
            CellValue::Number(self.sale_price),
            CellValue::Number(self.discount_percent as f64),
        ]
    }

    /// Decode a worksheet row; `None` when a cell does not fit the schema
    pub fn from_row(row: &[CellValue]) -> Option<Self> {
        Some(Self {
            article_id: row.get(product_cols::ARTICLE_ID)?.as_text()?.to_string(),
            category_id: row.get(product_cols::CATEGORY_ID)?.as_text()?.to_string(),
            product_name: row.get(product_cols::PRODUCT_NAME)?.as_text()?.to_string(),
            purchase_price: row.get(product_cols::PURCHASE_PRICE)?.as_number()?,
            sale_price: row.get(product_cols::SALE_PRICE)?.as_number()?,
            discount_percent: row.get(product_cols::DISCOUNT_PERCENT)?.as_number()? as u8,
        })
    }
}

/// A product category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
    pub age_limit: String,
}

impl Category {
    pub fn to_row(&self) -> Row {
        vec![
            CellValue::Text(self.category_id.clone()),
            CellValue::Text(self.category_name.clone()),
            CellValue::Text(self.age_limit.clone()),
        ]
    }

    pub fn from_row(row: &[CellValue]) -> Option<Self> {
        Some(Self {
            category_id: row.get(category_cols::CATEGORY_ID)?.as_text()?.to_string(),
            category_name: row
                .get(category_cols::CATEGORY_NAME)?
                .as_text()?
                .to_string(),
            age_limit: row.get(category_cols::AGE_LIMIT)?.as_text()?.to_string(),
        })
    }
}

/// A retail store
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub store_id: String,
    pub district: String,
    pub address: String,
}

impl Store {
    pub fn to_row(&self) -> Row {
        vec![
            CellValue::Text(self.store_id.clone()),
            CellValue::Text(self.district.clone()),
            CellValue::Text(self.address.clone()),
        ]
    }

    pub fn from_row(row: &[CellValue]) -> Option<Self> {
        Some(Self {
            store_id: row.get(store_cols::STORE_ID)?.as_text()?.to_string(),
            district: row.get(store_cols::DISTRICT)?.as_text()?.to_string(),
            address: row.get(store_cols::ADDRESS)?.as_text()?.to_string(),
        })
    }
}

/// A record destined for one of the four tables
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Movement(ProductMovement),
    Product(Product),
    Category(Category),
    Store(Store),
}

impl Record {
    /// Table this record belongs to
    pub fn table(&self) -> TableId {
        match self {
            Record::Movement(_) => TableId::Movements,
            Record::Product(_) => TableId::Products,
            Record::Category(_) => TableId::Categories,
            Record::Store(_) => TableId::Stores,
        }
    }

    /// Primary-key value
    pub fn key(&self) -> &str {
        match self {
            Record::Movement(m) => &m.operation_id,
            Record::Product(p) => &p.article_id,
            Record::Category(c) => &c.category_id,
            Record::Store(s) => &s.store_id,
        }
    }

    /// Encode as a worksheet row
    pub fn to_row(&self) -> Row {
        match self {
            Record::Movement(m) => m.to_row(),
            Record::Product(p) => p.to_row(),
            Record::Category(c) => c.to_row(),
            Record::Store(s) => s.to_row(),
        }
    }
}

/// Field edits allowed on an existing row.
///
/// Each table exposes a fixed subset of editable fields; `None` leaves
/// the stored value in place.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPatch {
    Movement {
        date: Option<NaiveDate>,
        operation_type: Option<String>,
    },
    Product {
        product_name: Option<String>,
    },
    Category {
        age_limit: Option<String>,
    },
    Store {
        address: Option<String>,
    },
}

impl RowPatch {
    /// Table this patch applies to
    pub fn table(&self) -> TableId {
        match self {
            RowPatch::Movement { .. } => TableId::Movements,
            RowPatch::Product { .. } => TableId::Products,
            RowPatch::Category { .. } => TableId::Categories,
            RowPatch::Store { .. } => TableId::Stores,
        }
    }

    /// Overwrite exactly the row cells this patch names
    pub fn apply(&self, row: &mut Row) {
        match self {
            RowPatch::Movement {
                date,
                operation_type,
            } => {
                if let Some(date) = date {
                    row[movement_cols::DATE] = CellValue::Date(*date);
                }
                if let Some(operation_type) = operation_type {
                    row[movement_cols::OPERATION_TYPE] = CellValue::Text(operation_type.clone());
                }
            }
            RowPatch::Product { product_name } => {
                if let Some(product_name) = product_name {
                    row[product_cols::PRODUCT_NAME] = CellValue::Text(product_name.clone());
                }
            }
            RowPatch::Category { age_limit } => {
                if let Some(age_limit) = age_limit {
                    row[category_cols::AGE_LIMIT] = CellValue::Text(age_limit.clone());
                }
            }
            RowPatch::Store { address } => {
                if let Some(address) = address {
                    row[store_cols::ADDRESS] = CellValue::Text(address.clone());
                }
            }
        }
    }
}
