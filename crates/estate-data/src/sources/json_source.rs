//! JSON catalog files

use std::path::PathBuf;

use async_trait::async_trait;
use estate_core::Property;
use serde::Deserialize;

use super::CatalogSource;
use crate::DataError;

/// A JSON file holding either an array of listings or `{ "properties": [...] }`
pub struct JsonSource {
    path: PathBuf,
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    List(Vec<Property>),
    Wrapped { properties: Vec<Property> },
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Parse a catalog document
    pub fn parse_records(text: &str) -> Result<Vec<Property>, DataError> {
        let document: JsonDocument = serde_json::from_str(text)?;
        Ok(match document {
            JsonDocument::List(records) => records,
            JsonDocument::Wrapped { properties } => properties,
        })
    }
}

#[async_trait]
impl CatalogSource for JsonSource {
    async fn load(&self) -> Result<Vec<Property>, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let records = Self::parse_records(&text)?;
        tracing::debug!("Read {} records from {}", records.len(), self.name);
        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
