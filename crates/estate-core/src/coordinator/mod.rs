use std::sync::Arc;

use thiserror::Error;

use crate::filter::FilterCriteria;
use crate::model::{Property, PropertyId};
use crate::sync::SelectionPolicy;

mod engine;
mod subscriber;

pub use engine::ViewCoordinator;
pub use subscriber::ViewSubscriber;

/// Shared, ordered result set
pub type ResultSet = Arc<[Arc<Property>]>;

/// Options for a [`ViewCoordinator`]
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorOptions {
    pub selection_policy: SelectionPolicy,
    pub parallel_threshold: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::default(),
            parallel_threshold: crate::filter::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Sent to views when the filtered sequence changes
#[derive(Debug, Clone)]
pub struct ResultsUpdate {
    pub criteria: FilterCriteria,
    pub results: ResultSet,
    pub total: usize,
}

/// Sent to views when the selection changes.
///
/// Carries the full record so views never have to look it up.
#[derive(Debug, Clone)]
pub struct SelectionChange {
    pub selected: Option<Arc<Property>>,
    pub revision: u64,
}

/// Consistent snapshot of the coordinator state
#[derive(Debug, Clone)]
pub struct CoordinatorContext {
    pub criteria: FilterCriteria,
    pub results: ResultSet,
    pub selected: Option<Arc<Property>>,
    pub selection_revision: u64,
    pub total: usize,
}

impl CoordinatorContext {
    pub fn is_selected(&self, id: &PropertyId) -> bool {
        self.selected.as_ref().map_or(false, |p| &p.id == id)
    }
}

/// Selection requests the coordinator refuses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("listing '{0}' is not in the catalog")]
    UnknownProperty(PropertyId),
}
