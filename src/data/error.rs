use thiserror::Error;

/// Errors raised while loading or projecting the nutrient table.
///
/// A food that matches no row is not an error; it yields an empty result.
#[derive(Error, Debug)]
pub enum DataError {
    /// Transport failure: DNS, TLS, connection reset, body read.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("failed to fetch {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The payload is not a workbook calamine can open.
    #[error("invalid spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook opened but does not have the expected layout.
    #[error("invalid spreadsheet: {0}")]
    Parse(String),

    /// A projection named a column the dataset does not have.
    #[error("unknown column '{name}'")]
    Column { name: String },
}

impl DataError {
    /// Remote dataset unreachable or non-success status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, DataError::Fetch { .. } | DataError::Status { .. })
    }

    /// Payload unreadable or missing the expected header.
    pub fn is_parse(&self) -> bool {
        matches!(self, DataError::Workbook(_) | DataError::Parse(_))
    }

    /// Projection onto a non-existent column.
    pub fn is_column(&self) -> bool {
        matches!(self, DataError::Column { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
