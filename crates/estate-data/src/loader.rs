//! Turning source records into a catalog

use estate_core::events::events::CatalogLoaded;
use estate_core::{Catalog, CatalogError};
use tracing::{info, warn};

use crate::config::{CatalogConfig, InvalidRecordPolicy};
use crate::sources::{source_from_config, CatalogSource};
use crate::DataError;

/// A catalog together with what was left out of it
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub source_name: String,

    /// Records dropped under [`InvalidRecordPolicy::Skip`]
    pub rejected: Vec<CatalogError>,
}

impl LoadedCatalog {
    pub fn loaded_event(&self) -> CatalogLoaded {
        CatalogLoaded {
            source_name: self.source_name.clone(),
            listing_count: self.catalog.len(),
            rejected_count: self.rejected.len(),
        }
    }
}

/// Validates source records and builds the catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    policy: InvalidRecordPolicy,
}

impl CatalogLoader {
    pub fn new(policy: InvalidRecordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InvalidRecordPolicy {
        self.policy
    }

    /// Build the configured source and load it
    pub async fn load_config(config: &CatalogConfig) -> Result<LoadedCatalog, DataError> {
        let source = source_from_config(config)?;
        Self::new(config.on_invalid).load(source.as_ref()).await
    }

    pub async fn load(&self, source: &dyn CatalogSource) -> Result<LoadedCatalog, DataError> {
        let records = source.load().await?;
        let source_name = source.source_name().to_string();
        let record_count = records.len();

        let (catalog, rejected) = match self.policy {
            InvalidRecordPolicy::Reject => (Catalog::new(records)?, Vec::new()),
            InvalidRecordPolicy::Skip => Catalog::new_lenient(records),
        };

        for error in &rejected {
            warn!("Skipped listing from {}: {}", source_name, error);
        }
        info!(
            "Loaded {} of {} listings from {}",
            catalog.len(),
            record_count,
            source_name
        );

        Ok(LoadedCatalog {
            catalog,
            source_name,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FixtureSource;
    use async_trait::async_trait;
    use estate_core::{Property, ValidationError};

    struct VecSource(Vec<Property>);

    #[async_trait]
    impl CatalogSource for VecSource {
        async fn load(&self) -> Result<Vec<Property>, DataError> {
            Ok(self.0.clone())
        }

        fn source_name(&self) -> &str {
            "memory"
        }
    }

    fn with_bad_record() -> VecSource {
        let mut records = FixtureSource::properties();
        records[2].rooms = 0;
        let duplicate = records[0].clone();
        records.push(duplicate);
        VecSource(records)
    }

    #[tokio::test]
    async fn test_reject_fails_on_first_invalid_record() {
        let loader = CatalogLoader::new(InvalidRecordPolicy::Reject);
        let error = loader.load(&with_bad_record()).await.unwrap_err();
        match error {
            DataError::Catalog(CatalogError::Invalid { id, source }) => {
                assert_eq!(id.as_str(), "3");
                assert_eq!(source, ValidationError::NoRooms);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_skip_keeps_the_valid_records() {
        let loader = CatalogLoader::new(InvalidRecordPolicy::Skip);
        let loaded = loader.load(&with_bad_record()).await.unwrap();

        assert_eq!(loaded.catalog.len(), 7);
        assert_eq!(loaded.rejected.len(), 2);
        assert!(!loaded.catalog.contains(&"3".into()));

        let event = loaded.loaded_event();
        assert_eq!(event.source_name, "memory");
        assert_eq!(event.listing_count, 7);
        assert_eq!(event.rejected_count, 2);
    }

    #[tokio::test]
    async fn test_load_default_config() {
        let loaded = CatalogLoader::load_config(&CatalogConfig::default())
            .await
            .unwrap();
        assert_eq!(loaded.catalog.len(), 8);
        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.source_name, FixtureSource::NAME);
    }
}
