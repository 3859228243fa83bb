//! User interface components for the listing browser
//!
//! This crate provides the egui shell around the views: theme, menu bar,
//! header, error window and the filter form.

pub mod filter_panel;
pub mod shell;
pub mod theme;

pub use filter_panel::{FilterForm, FilterPanel};
pub use shell::{error_window, header, menu_bar, ErrorMessage, ShellAction, ShellStatus};
pub use theme::{apply_theme, Theme};
