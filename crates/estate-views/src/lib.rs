//! List and map views of the filtered listings

pub mod inbox;
pub mod list_view;
pub mod map;
pub mod style;
mod view;

#[cfg(test)]
mod test_support;

pub use inbox::{ViewInbox, ViewNotification};
pub use list_view::ListView;
pub use map::{Camera, FlyTo, MapView};
pub use view::{ListingView, ViewKind};

use std::sync::Arc;

use estate_core::{AppSettings, ViewCoordinator};

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Owner of the criteria, the results and the selection
    pub coordinator: Arc<ViewCoordinator>,

    pub settings: Arc<AppSettings>,
}

impl ViewerContext {
    pub fn new(coordinator: Arc<ViewCoordinator>, settings: Arc<AppSettings>) -> Self {
        Self {
            coordinator,
            settings,
        }
    }
}
