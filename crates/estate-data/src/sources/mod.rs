//! Catalog sources

pub mod csv_source;
pub mod fixture_source;
pub mod json_source;

pub use csv_source::CsvSource;
pub use fixture_source::FixtureSource;
pub use json_source::JsonSource;

use async_trait::async_trait;
use estate_core::Property;

use crate::config::{CatalogConfig, SourceKind};
use crate::DataError;

/// Something that produces raw listing records.
///
/// Records are returned unvalidated; the loader decides what to do with
/// invalid ones.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read every record
    async fn load(&self) -> Result<Vec<Property>, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}

/// Build the source a catalog configuration describes
pub fn source_from_config(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>, DataError> {
    let path = || {
        config
            .path
            .clone()
            .ok_or(DataError::MissingPath(config.kind))
    };

    Ok(match config.kind {
        SourceKind::Fixture => Box::new(FixtureSource::new()),
        SourceKind::Json => Box::new(JsonSource::new(path()?)),
        SourceKind::Csv => Box::new(
            CsvSource::new(path()?)
                .with_delimiter(config.delimiter)
                .with_list_separator(config.list_separator),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sources_need_a_path() {
        let config = CatalogConfig {
            kind: SourceKind::Csv,
            path: None,
            ..CatalogConfig::default()
        };
        assert!(matches!(
            source_from_config(&config),
            Err(DataError::MissingPath(SourceKind::Csv))
        ));
    }

    #[test]
    fn test_default_config_builds_fixture() {
        let source = source_from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(source.source_name(), FixtureSource::NAME);
    }
}
