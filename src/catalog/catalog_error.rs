use thiserror::Error;

/// Why a single partition fetch produced no usable data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}
