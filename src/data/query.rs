use super::error::{DataError, Result};
use super::model::{CellValue, Dataset, KEY_COLUMN};

/// Nutrients shown when the caller has not picked any.
pub const DEFAULT_NUTRIENTS: [&str; 7] = [
    "Protein (g)",
    "Carbohydrate (g)",
    "Sugars, total (g)",
    "Calcium (mg)",
    "Magnesium (mg)",
    "Iron (mg)",
    "Vitamin C (mg)",
];

// ---------------------------------------------------------------------------
// Projection: a column selection validated against one dataset
// ---------------------------------------------------------------------------

/// Which columns a query returns.
///
/// Holds column names, not positions, so a projection stays meaningful when
/// applied to a narrower dataset; [`Dataset::select`] resolves it per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Every column, in dataset order.
    All,
    /// Named columns, in requested order.
    Columns(Vec<String>),
}

impl Projection {
    pub fn all() -> Self {
        Projection::All
    }

    /// Validate `names` against `dataset`; the first unknown name is an error.
    pub fn new<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Result<Self> {
        let projection = Projection::Columns(names.iter().map(|n| n.as_ref().to_string()).collect());
        projection.resolve(dataset)?;
        Ok(projection)
    }

    /// Keep only the names `dataset` knows, preserving their order.
    /// The result may select no columns at all.
    pub fn retain_known<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Self {
        Projection::Columns(
            names
                .iter()
                .map(|name| name.as_ref())
                .filter(|name| dataset.column_index(name).is_some())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Whether this projection selects no columns.
    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::Columns(cols) if cols.is_empty())
    }

    /// Column positions in `dataset`; an unknown name is a `DataError::Column`.
    fn resolve(&self, dataset: &Dataset) -> Result<Vec<usize>> {
        match self {
            Projection::All => Ok((0..dataset.columns().len()).collect()),
            Projection::Columns(names) => names
                .iter()
                .map(|name| {
                    dataset.column_index(name).ok_or_else(|| DataError::Column {
                        name: name.clone(),
                    })
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

impl Dataset {
    /// Rows whose key column equals `food` exactly, projected.
    ///
    /// Comparison is case- and whitespace-sensitive. Every matching row is
    /// returned in source order; no match gives an empty dataset. A projected
    /// column this dataset lacks is a `DataError::Column`.
    pub fn select(&self, food: &str, projection: &Projection) -> Result<Dataset> {
        let indices = projection.resolve(self)?;
        let columns = indices.iter().map(|&i| self.columns()[i].clone()).collect();

        let rows = match self.column_index(KEY_COLUMN) {
            Some(key) => self
                .rows()
                .iter()
                .filter(|row| matches!(&row[key], CellValue::Text(name) if name == food))
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
            None => Vec::new(),
        };
        Ok(Dataset::new(columns, rows))
    }
}

/// Nutrient values for `food`, optionally restricted to `columns`.
///
/// `None` returns every column. A requested column the dataset lacks is a
/// `DataError::Column`; callers that accept free-form names should
/// pre-filter with [`Projection::retain_known`].
pub fn get_nutrients(dataset: &Dataset, food: &str, columns: Option<&[&str]>) -> Result<Dataset> {
    let projection = match columns {
        Some(names) => Projection::new(dataset, names)?,
        None => Projection::all(),
    };
    dataset.select(food, &projection)
}
