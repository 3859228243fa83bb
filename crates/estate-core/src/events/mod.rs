use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// Browser-wide event bus, the observability hook of the coordinator
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the coordinator and the catalog loader
pub mod events {
    use super::Event;
    use crate::filter::FilterCriteria;
    use crate::model::PropertyId;

    /// A catalog was accepted
    #[derive(Debug, Clone)]
    pub struct CatalogLoaded {
        pub source_name: String,
        pub listing_count: usize,
        pub rejected_count: usize,
    }

    /// The criteria were replaced and the results recomputed
    #[derive(Debug, Clone)]
    pub struct FiltersChanged {
        pub criteria: FilterCriteria,
        pub matched: usize,
        pub total: usize,
    }

    /// Criteria and selection were reset
    #[derive(Debug, Clone)]
    pub struct FiltersCleared {
        pub total: usize,
    }

    /// The selection moved (`None` means it was cleared)
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        pub property_id: Option<PropertyId>,
        pub revision: u64,
    }

    /// A view asked to select a listing that is not in the catalog
    #[derive(Debug, Clone)]
    pub struct SelectionRejected {
        pub property_id: PropertyId,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        CatalogLoaded,
        FiltersChanged,
        FiltersCleared,
        SelectionChanged,
        SelectionRejected
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Subscribe a closure that receives the concrete event
    pub fn subscribe_fn<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event: &dyn Event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }

    /// Publish an event.
    ///
    /// Handlers run under the bus lock and must not publish in turn.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }

    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .lock()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter turning a closure into an [`EventHandler`]
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}
