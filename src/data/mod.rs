/// Data layer: core types, loading, and querying.
///
/// Architecture:
/// ```text
///  USDA .xlsx (HTTPS)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse + drop unused columns → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  ordered columns, rows of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  exact food match + Projection → Dataset
///   └──────────┘
/// ```

pub mod completion;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::DataError;
pub use loader::{load_clean, load_clean_from};
pub use model::{CellValue, Dataset, CATEGORY_COLUMN, KEY_COLUMN};
pub use query::{get_nutrients, Projection, DEFAULT_NUTRIENTS};
