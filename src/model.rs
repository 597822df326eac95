use serde::{Deserialize, Serialize};

/// Canonical string form of an article code. Equal business identifiers
/// always normalize to the identical string regardless of how the source
/// spreadsheet happened to type the cell.
pub type ArticleCode = String;

/// A single loosely typed spreadsheet cell. Real SAP exports mix integers,
/// floats, and strings freely inside one column, so the variants are kept
/// explicit and normalization handles each one deliberately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Plain text cell.
    Text(String),
    /// Floating point cell. Excel stores most numbers this way.
    Number(f64),
    /// Integer cell.
    Integer(i64),
    /// Missing cell.
    Empty,
}

impl CellValue {
    /// Returns true when the cell carries no content. Whitespace-only text
    /// counts as blank; clipboard pastes produce such cells routinely.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            CellValue::Number(_) | CellValue::Integer(_) => false,
        }
    }

    /// Best-effort numeric reading of the cell, used for cost values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Text(value) => value.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }

    /// Text rendering used for display and TSV output.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// An in-memory table: named columns plus ordered rows of loosely typed
/// cells. Loaders pad or truncate every row to the header width so row and
/// column indices always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates an empty table with the provided column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Returns true when every cell in the row is blank.
    pub fn row_is_blank(row: &[CellValue]) -> bool {
        row.iter().all(CellValue::is_blank)
    }
}

/// Column choices for the cost reference table, machine-proposed or
/// user-confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMapping {
    /// Column holding the article code.
    pub article: String,
    /// Column holding the manufacturing cost value.
    pub value: String,
}

impl CostMapping {
    pub fn new(article: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            value: value.into(),
        }
    }
}

/// Column choice for the SAP export, which only contributes a key. A
/// dedicated type keeps an incomplete cost mapping unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMapping {
    /// Column holding the article code.
    pub article: String,
}

impl KeyMapping {
    pub fn new(article: impl Into<String>) -> Self {
        Self {
            article: article.into(),
        }
    }
}
