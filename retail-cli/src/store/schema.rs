//! Table identities and fixed worksheet schemas

use super::error::StoreError;

/// Number of tables the store binds, in worksheet order
pub const TABLE_COUNT: usize = 4;

/// Identifies one of the four managed tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Movements,
    Products,
    Categories,
    Stores,
}

impl TableId {
    pub const ALL: [TableId; TABLE_COUNT] = [
        TableId::Movements,
        TableId::Products,
        TableId::Categories,
        TableId::Stores,
    ];

    /// Resolve a 1-based table number
    pub fn from_index(index: usize) -> Result<Self, StoreError> {
        match index {
            1 => Ok(TableId::Movements),
            2 => Ok(TableId::Products),
            3 => Ok(TableId::Categories),
            4 => Ok(TableId::Stores),
            other => Err(StoreError::InvalidTable(other)),
        }
    }

    /// 1-based table number
    pub fn index(self) -> usize {
        match self {
            TableId::Movements => 1,
            TableId::Products => 2,
            TableId::Categories => 3,
            TableId::Stores => 4,
        }
    }

    /// Zero-based position of the worksheet this table is bound to
    pub fn sheet_position(self) -> usize {
        self.index() - 1
    }

    /// Plural name for menus and messages
    pub fn label(self) -> &'static str {
        match self {
            TableId::Movements => "product movements",
            TableId::Products => "products",
            TableId::Categories => "categories",
            TableId::Stores => "stores",
        }
    }

    /// Singular name for log entries
    pub fn record_label(self) -> &'static str {
        match self {
            TableId::Movements => "product movement",
            TableId::Products => "product",
            TableId::Categories => "category",
            TableId::Stores => "store",
        }
    }

    /// Fixed schema of the bound worksheet
    pub fn schema(self) -> &'static TableSchema {
        match self {
            TableId::Movements => &MOVEMENT_SCHEMA,
            TableId::Products => &PRODUCT_SCHEMA,
            TableId::Categories => &CATEGORY_SCHEMA,
            TableId::Stores => &STORE_SCHEMA,
        }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Value family a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Integer,
    Decimal,
    Flag,
}

/// One column of a table schema
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub caption: &'static str,
    pub kind: ColumnKind,
}

/// Fixed layout of one table; the first column is the primary key
#[derive(Debug)]
pub struct TableSchema {
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Caption row used when a worksheet does not carry its own
    pub fn captions(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.caption.to_string())
            .collect()
    }

    /// Caption of the primary-key column
    pub fn key_caption(&self) -> &'static str {
        self.columns[0].caption
    }
}

const fn column(caption: &'static str, kind: ColumnKind) -> Column {
    Column { caption, kind }
}

static MOVEMENT_SCHEMA: TableSchema = TableSchema {
    columns: &[
        column("OperationId", ColumnKind::Text),
        column("Date", ColumnKind::Date),
        column("StoreId", ColumnKind::Text),
        column("ArticleId", ColumnKind::Text),
        column("OperationType", ColumnKind::Text),
        column("PackageCount", ColumnKind::Integer),
        column("HasClientCard", ColumnKind::Flag),
    ],
};

static PRODUCT_SCHEMA: TableSchema = TableSchema {
    columns: &[
        column("ArticleId", ColumnKind::Text),
        column("CategoryId", ColumnKind::Text),
        column("ProductName", ColumnKind::Text),
        column("PurchasePrice", ColumnKind::Decimal),
        column("SalePrice", ColumnKind::Decimal),
        column("DiscountPercent", ColumnKind::Integer),
    ],
};

static CATEGORY_SCHEMA: TableSchema = TableSchema {
    columns: &[
        column("CategoryId", ColumnKind::Text),
        column("CategoryName", ColumnKind::Text),
        column("AgeLimit", ColumnKind::Text),
    ],
};

static STORE_SCHEMA: TableSchema = TableSchema {
    columns: &[
        column("StoreId", ColumnKind::Text),
        column("District", ColumnKind::Text),
        column("Address", ColumnKind::Text),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_resolves_table_numbers() {
        assert_eq!(TableId::from_index(1).unwrap(), TableId::Movements);
        assert_eq!(TableId::from_index(4).unwrap(), TableId::Stores);
        assert!(matches!(
            TableId::from_index(0),
            Err(StoreError::InvalidTable(0))
        ));
        assert!(matches!(
            TableId::from_index(5),
            Err(StoreError::InvalidTable(5))
        ));
    }

    #[test]
    fn test_index_round_trips() {
        for table in TableId::ALL {
            assert_eq!(TableId::from_index(table.index()).unwrap(), table);
            assert_eq!(table.sheet_position(), table.index() - 1);
        }
    }

    #[test]
    fn test_schema_widths() {
        assert_eq!(TableId::Movements.schema().width(), 7);
        assert_eq!(TableId::Products.schema().width(), 6);
        assert_eq!(TableId::Categories.schema().width(), 3);
        assert_eq!(TableId::Stores.schema().width(), 3);
    }

    #[test]
    fn test_key_caption_is_first_column() {
        assert_eq!(TableId::Movements.schema().key_caption(), "OperationId");
        assert_eq!(TableId::Products.schema().key_caption(), "ArticleId");
        assert_eq!(TableId::Categories.schema().key_caption(), "CategoryId");
        assert_eq!(TableId::Stores.schema().key_caption(), "StoreId");
    }
}
