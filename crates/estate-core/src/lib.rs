//! Core functionality for the listing browser
//!
//! This crate provides the listing model, the catalog, the filter engine and
//! the coordinator that keeps the list and the map in step.

pub mod catalog;
pub mod coordinator;
pub mod events;
pub mod filter;
pub mod format;
pub mod model;
pub mod settings;
pub mod sync;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use coordinator::{
    CoordinatorContext, CoordinatorOptions, ResultSet, ResultsUpdate, SelectionChange,
    SelectionError, ViewCoordinator, ViewSubscriber,
};
pub use events::EventBus;
pub use filter::{filter, FilterCriteria, FilterDimension, FilterEngine};
pub use format::EnergyTier;
pub use model::{
    Coordinates, EnergyClass, Location, Property, PropertyId, PropertyType, ValidationError,
};
pub use settings::{AppSettings, FilterPanelSettings, MapSettings};
pub use sync::{Selection, SelectionPolicy, SelectionState};
