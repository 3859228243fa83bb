//! Browser configuration file

use std::fmt;
use std::path::{Path, PathBuf};

use estate_core::AppSettings;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Where the catalog comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The built-in listings
    #[default]
    Fixture,
    Json,
    Csv,
}

impl SourceKind {
    /// Infer the source kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(SourceKind::Json),
            "csv" | "tsv" => Some(SourceKind::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Fixture => "fixture",
            SourceKind::Json => "JSON",
            SourceKind::Csv => "CSV",
        };
        f.write_str(name)
    }
}

/// What to do with a record that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Fail the whole load
    #[default]
    Reject,
    /// Drop the record and keep loading
    Skip,
}

/// Catalog source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    pub kind: SourceKind,

    /// Required for JSON and CSV sources
    pub path: Option<PathBuf>,

    /// CSV field delimiter
    pub delimiter: char,

    /// Separator inside the CSV `images` and `features` columns
    pub list_separator: char,

    pub on_invalid: InvalidRecordPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Fixture,
            path: None,
            delimiter: ',',
            list_separator: '|',
            on_invalid: InvalidRecordPolicy::Reject,
        }
    }
}

impl CatalogConfig {
    /// Configuration for a catalog file, inferring its kind from the extension
    pub fn for_path(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        let kind =
            SourceKind::from_path(&path).ok_or_else(|| DataError::UnsupportedFormat(path.clone()))?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => '\t',
            _ => ',',
        };

        Ok(Self {
            kind,
            path: Some(path),
            delimiter,
            ..Self::default()
        })
    }

    /// Short name for logs and the window title
    pub fn display_name(&self) -> String {
        match (&self.kind, &self.path) {
            (SourceKind::Fixture, _) | (_, None) => "annonces de démonstration".to_string(),
            (_, Some(path)) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("catalogue")
                .to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserConfig {
    pub catalog: CatalogConfig,
    pub settings: AppSettings,
}

impl BrowserConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&text)?;
        config.resolve_relative_to(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(config)
    }

    /// Interpret a command-line path: a configuration file or a catalog file.
    ///
    /// A JSON object with a `catalog` or `settings` key is a configuration;
    /// any other JSON or CSV file is loaded as a catalog with default settings.
    pub fn from_argument(path: &Path) -> Result<Self, DataError> {
        if SourceKind::from_path(path) == Some(SourceKind::Json) {
            let text = std::fs::read_to_string(path)?;
            if looks_like_config(&text) {
                return Self::from_file(path);
            }
        }

        Ok(Self {
            catalog: CatalogConfig::for_path(path)?,
            settings: AppSettings::default(),
        })
    }

    /// Make a relative catalog path relative to the configuration file
    fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(path) = &self.catalog.path {
            if path.is_relative() {
                self.catalog.path = Some(base.join(path));
            }
        }
    }
}

fn looks_like_config(text: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => {
            map.contains_key("catalog") || map.contains_key("settings")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::SelectionPolicy;

    #[test]
    fn test_empty_config_uses_fixture() {
        let config = BrowserConfig::from_json_str("{}").unwrap();
        assert_eq!(config.catalog.kind, SourceKind::Fixture);
        assert_eq!(config.catalog.list_separator, '|');
        assert_eq!(config.settings, AppSettings::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "catalog": {
                "kind": "csv",
                "path": "listings.csv",
                "delimiter": ";",
                "listSeparator": "/",
                "onInvalid": "skip"
            },
            "settings": {
                "selectionPolicy": "clearWhenFilteredOut",
                "filterPanel": { "priceCeiling": 2000000 }
            },
            "theme": "ignored"
        }"#;

        let config = BrowserConfig::from_json_str(json).unwrap();
        assert_eq!(config.catalog.kind, SourceKind::Csv);
        assert_eq!(config.catalog.delimiter, ';');
        assert_eq!(config.catalog.list_separator, '/');
        assert_eq!(config.catalog.on_invalid, InvalidRecordPolicy::Skip);
        assert_eq!(
            config.settings.selection_policy,
            SelectionPolicy::ClearWhenFilteredOut
        );
        assert_eq!(config.settings.filter_panel.price_ceiling, 2_000_000.0);
        assert_eq!(config.settings.filter_panel.surface_ceiling, 200.0);
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a/b.JSON")), Some(SourceKind::Json));
        assert_eq!(SourceKind::from_path(Path::new("b.csv")), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_path(Path::new("b.xlsx")), None);
        assert_eq!(SourceKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_for_path_rejects_unknown_formats() {
        let config = CatalogConfig::for_path("data/listings.tsv").unwrap();
        assert_eq!(config.kind, SourceKind::Csv);
        assert_eq!(config.delimiter, '\t');

        assert!(matches!(
            CatalogConfig::for_path("listings.xml"),
            Err(DataError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_config_detection() {
        assert!(looks_like_config(r#"{ "catalog": { "kind": "fixture" } }"#));
        assert!(looks_like_config(r#"{ "settings": {} }"#));
        assert!(!looks_like_config(r#"[ { "id": "1" } ]"#));
        assert!(!looks_like_config(r#"{ "properties": [] }"#));
    }

    #[test]
    fn test_relative_catalog_path_follows_config_location() {
        let mut config = BrowserConfig {
            catalog: CatalogConfig {
                kind: SourceKind::Json,
                path: Some(PathBuf::from("listings.json")),
                ..CatalogConfig::default()
            },
            settings: AppSettings::default(),
        };
        config.resolve_relative_to(Path::new("/etc/estate"));
        assert_eq!(
            config.catalog.path,
            Some(PathBuf::from("/etc/estate/listings.json"))
        );
    }
}
