//! View coordinator implementation

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::{
    CoordinatorContext, CoordinatorOptions, ResultSet, ResultsUpdate, SelectionChange,
    SelectionError, ViewSubscriber,
};
use crate::catalog::Catalog;
use crate::events::events::{FiltersChanged, FiltersCleared, SelectionChanged, SelectionRejected};
use crate::events::EventBus;
use crate::filter::{FilterCriteria, FilterEngine};
use crate::model::{Property, PropertyId};
use crate::sync::{Selection, SelectionPolicy, SelectionState};

/// State guarded by the coordinator lock
#[derive(Debug, Clone)]
struct CoordinatorState {
    criteria: FilterCriteria,
    results: ResultSet,
    selection: SelectionState,
}

/// Owns filter criteria and selection, and keeps every view in step with them
pub struct ViewCoordinator {
    catalog: Catalog,
    engine: FilterEngine,
    policy: SelectionPolicy,
    state: Arc<RwLock<CoordinatorState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn ViewSubscriber>>>>,
    event_bus: Arc<EventBus>,
}

impl ViewCoordinator {
    /// Create a coordinator showing the whole catalog, nothing selected
    pub fn new(catalog: Catalog, options: CoordinatorOptions) -> Self {
        Self::with_event_bus(catalog, options, Arc::new(EventBus::new()))
    }

    pub fn with_event_bus(
        catalog: Catalog,
        options: CoordinatorOptions,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let state = CoordinatorState {
            criteria: FilterCriteria::default(),
            results: catalog.to_results().into(),
            selection: SelectionState::new(),
        };

        Self {
            catalog,
            engine: FilterEngine::new(options.parallel_threshold),
            policy: options.selection_policy,
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            event_bus,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.read().criteria.clone()
    }

    pub fn results(&self) -> ResultSet {
        self.state.read().results.clone()
    }

    pub fn selection(&self) -> Selection {
        self.state.read().selection.selection().clone()
    }

    pub fn selection_revision(&self) -> u64 {
        self.state.read().selection.revision()
    }

    pub fn selected_property(&self) -> Option<Arc<Property>> {
        let state = self.state.read();
        state
            .selection
            .selection()
            .id()
            .and_then(|id| self.catalog.get(id).cloned())
    }

    /// Snapshot of criteria, results and selection taken under one lock
    pub fn context(&self) -> CoordinatorContext {
        let state = self.state.read();
        CoordinatorContext {
            criteria: state.criteria.clone(),
            results: state.results.clone(),
            selected: state
                .selection
                .selection()
                .id()
                .and_then(|id| self.catalog.get(id).cloned()),
            selection_revision: state.selection.revision(),
            total: self.catalog.len(),
        }
    }

    /// Replace the criteria wholesale and recompute the results
    pub fn set_filters(&self, criteria: FilterCriteria) {
        let results: ResultSet = self.engine.apply(&self.catalog, &criteria).into();

        let mut state = self.state.write();
        state.criteria = criteria.clone();
        state.results = results.clone();

        let cleared = match self.policy {
            SelectionPolicy::Persist => None,
            SelectionPolicy::ClearWhenFilteredOut => {
                let hidden = state
                    .selection
                    .selection()
                    .id()
                    .map_or(false, |id| !results.iter().any(|p| &p.id == id));
                if hidden {
                    state.selection.clear()
                } else {
                    None
                }
            }
        };
        drop(state);

        debug!(
            matched = results.len(),
            total = self.catalog.len(),
            active = criteria.active_count(),
            "filters applied"
        );

        self.notify_results(&ResultsUpdate {
            criteria: criteria.clone(),
            results: results.clone(),
            total: self.catalog.len(),
        });

        if let Some(revision) = cleared {
            debug!(revision, "selection filtered out, cleared");
            self.announce_selection(None, revision);
        }

        self.event_bus.publish(FiltersChanged {
            criteria,
            matched: results.len(),
            total: self.catalog.len(),
        });
    }

    /// Select a listing by id.
    ///
    /// An id absent from the catalog leaves the state untouched and is
    /// reported through a warning and a [`SelectionRejected`] event.
    pub fn select(&self, id: &PropertyId) -> Result<Arc<Property>, SelectionError> {
        let Some(property) = self.catalog.get(id).cloned() else {
            warn!(property_id = %id, "selection of unknown listing ignored");
            self.event_bus.publish(SelectionRejected {
                property_id: id.clone(),
            });
            return Err(SelectionError::UnknownProperty(id.clone()));
        };

        let revision = self.state.write().selection.select(id.clone());
        debug!(property_id = %id, revision, "listing selected");

        self.announce_selection(Some(property.clone()), revision);
        Ok(property)
    }

    pub fn select_property(&self, property: &Property) -> Result<Arc<Property>, SelectionError> {
        self.select(&property.id)
    }

    pub fn clear_selection(&self) {
        let cleared = self.state.write().selection.clear();
        if let Some(revision) = cleared {
            debug!(revision, "selection cleared");
            self.announce_selection(None, revision);
        }
    }

    /// Reset the criteria to empty and drop the selection
    pub fn clear(&self) {
        let results: ResultSet = self.catalog.to_results().into();

        let mut state = self.state.write();
        state.criteria = FilterCriteria::default();
        state.results = results.clone();
        let cleared = state.selection.clear();
        drop(state);

        info!(total = self.catalog.len(), "filters cleared");

        self.notify_results(&ResultsUpdate {
            criteria: FilterCriteria::default(),
            results,
            total: self.catalog.len(),
        });
        if let Some(revision) = cleared {
            self.announce_selection(None, revision);
        }

        self.event_bus.publish(FiltersCleared {
            total: self.catalog.len(),
        });
    }

    /// Add a subscriber. It is held weakly and dropped once its owner goes away.
    pub fn add_subscriber(&self, subscriber: Arc<dyn ViewSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn announce_selection(&self, selected: Option<Arc<Property>>, revision: u64) {
        let property_id = selected.as_ref().map(|p| p.id.clone());
        self.notify_selection(&SelectionChange { selected, revision });
        self.event_bus.publish(SelectionChanged {
            property_id,
            revision,
        });
    }

    fn notify_results(&self, update: &ResultsUpdate) {
        for subscriber in self.live_subscribers() {
            subscriber.on_results_changed(update);
        }
    }

    fn notify_selection(&self, change: &SelectionChange) {
        for subscriber in self.live_subscribers() {
            subscriber.on_selection_changed(change);
        }
    }

    /// Prune dead weak references and return the live ones.
    /// The list lock is released before any subscriber runs.
    fn live_subscribers(&self) -> Vec<Arc<dyn ViewSubscriber>> {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|weak| weak.strong_count() > 0);
        subscribers.iter().filter_map(Weak::upgrade).collect()
    }
}
