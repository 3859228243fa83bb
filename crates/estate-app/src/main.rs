//! Main application entry point

use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;
use tracing::{error, info};

use estate_data::BrowserConfig;
use estate_ui::ErrorMessage;

mod app;

use app::BrowserApp;

/// Configuration from the optional command-line path, with the reason it
/// fell back to defaults if it did
fn startup_config(argument: Option<PathBuf>) -> (BrowserConfig, Vec<ErrorMessage>) {
    let Some(path) = argument else {
        return (BrowserConfig::default(), Vec::new());
    };

    match BrowserConfig::from_argument(&path) {
        Ok(config) => (config, Vec::new()),
        Err(err) => {
            error!(path = %path.display(), "Invalid startup argument: {}", err);
            let message = ErrorMessage::new(
                "Configuration invalide",
                format!("{}: {}", path.display(), err),
            );
            (BrowserConfig::default(), vec![message])
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let runtime = tokio::runtime::Runtime::new()?;
    let (config, startup_errors) = startup_config(std::env::args_os().nth(1).map(PathBuf::from));

    info!(
        source = %config.catalog.display_name(),
        policy = ?config.settings.selection_policy,
        "Starting listing browser"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Immobilier France")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };

    eframe::run_native(
        "Immobilier France",
        options,
        Box::new(move |cc| Box::new(BrowserApp::new(cc, runtime, config, startup_errors))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_data::SourceKind;

    #[test]
    fn test_no_argument_uses_defaults() {
        let (config, errors) = startup_config(None);
        assert_eq!(config, BrowserConfig::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_catalog_argument_selects_source() {
        let (config, errors) = startup_config(Some(PathBuf::from("listings.csv")));
        assert!(errors.is_empty());
        assert_eq!(config.catalog.kind, SourceKind::Csv);
        assert_eq!(config.catalog.path, Some(PathBuf::from("listings.csv")));
    }

    #[test]
    fn test_bad_argument_falls_back_with_error() {
        let (config, errors) = startup_config(Some(PathBuf::from("listings.xml")));
        assert_eq!(config, BrowserConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "Configuration invalide");

        let (_, errors) = startup_config(Some(PathBuf::from("/nonexistent/config.json")));
        assert_eq!(errors.len(), 1);
    }
}
