// errors.rs
use crate::catalog::CatalogError;
use std::fmt;
use thiserror::Error;

/// The two best-effort destinations a run writes to once a selection exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    SnapshotStore,
    Email,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::SnapshotStore => write!(f, "snapshot store"),
            Sink::Email => write!(f, "email"),
        }
    }
}

/// Errors raised by a pipeline run or its startup.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Catalog unavailable for {model}: {source}")]
    CatalogUnavailable {
        model: String,
        #[source]
        source: CatalogError,
    },

    #[error("Sink unavailable ({sink}): {reason}")]
    SinkUnavailable { sink: Sink, reason: String },

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid configuration for {0}: {1}")]
    InvalidConfig(String, String),

    #[error("Database Error: {0}")]
    DbError(String),
}
