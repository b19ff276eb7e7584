use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Column holding the food name used as the lookup key.
pub const KEY_COLUMN: &str = "Main food description";

/// Descriptive column that is not a nutrient.
pub const CATEGORY_COLUMN: &str = "WWEIA Category description";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the nutrient table
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
/// Dates and Excel error cells are carried as text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the cleaned nutrient table
// ---------------------------------------------------------------------------

/// An ordered, immutable table: column names plus rows aligned to them.
///
/// The same type is used for the full table and for query results, so a
/// result may lack the key column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset. Rows are padded with `Null` or truncated to the
    /// header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order, each aligned with [`Dataset::columns`].
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// One row as a column-name → value mapping.
    pub fn row_map(&self, row: usize) -> Option<BTreeMap<&str, &CellValue>> {
        let cells = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(cells.iter())
                .collect(),
        )
    }

    /// Distinct text values of the key column in order of first appearance.
    /// Empty when the key column is absent.
    pub fn food_names(&self) -> Vec<String> {
        let Some(key) = self.column_index(KEY_COLUMN) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row[key].as_str().map(str::to_string))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Every column except the key and category columns, in dataset order.
    pub fn nutrient_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.as_str() != KEY_COLUMN && c.as_str() != CATEGORY_COLUMN)
            .cloned()
            .collect()
    }
}
