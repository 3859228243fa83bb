//! Catalog sources and configuration for the listing browser

pub mod config;
pub mod loader;
pub mod sources;

use std::path::PathBuf;

use estate_core::CatalogError;
use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{BrowserConfig, CatalogConfig, InvalidRecordPolicy, SourceKind};
pub use loader::{CatalogLoader, LoadedCatalog};
pub use sources::{CatalogSource, CsvSource, FixtureSource, JsonSource};

/// Errors that can occur while loading a catalog or a configuration
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rejected listing: {0}")]
    Catalog(#[from] CatalogError),

    #[error("A {0} catalog needs a file path")]
    MissingPath(SourceKind),

    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
