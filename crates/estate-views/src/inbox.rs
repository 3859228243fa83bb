//! Buffer between coordinator notifications and immediate-mode frames
//!
//! The coordinator pushes updates as soon as they happen; an egui view only
//! runs when a frame is drawn. Each view owns a [`ViewInbox`] registered as a
//! subscriber and drains it at the start of its next frame.

use std::collections::VecDeque;
use std::sync::Arc;

use estate_core::{ResultsUpdate, SelectionChange, ViewCoordinator, ViewSubscriber};
use parking_lot::Mutex;

/// A notification waiting for the next frame
#[derive(Debug, Clone)]
pub enum ViewNotification {
    Results(ResultsUpdate),
    Selection(SelectionChange),
}

#[derive(Default)]
pub struct ViewInbox {
    pending: Mutex<VecDeque<ViewNotification>>,
    repaint: Mutex<Option<egui::Context>>,
}

impl ViewInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inbox and register it with the coordinator.
    ///
    /// The coordinator only keeps a weak reference: the inbox stops receiving
    /// once the returned `Arc` is dropped.
    pub fn attach(coordinator: &ViewCoordinator) -> Arc<Self> {
        let inbox = Arc::new(Self::new());
        coordinator.add_subscriber(inbox.clone());
        inbox
    }

    /// Ask egui for a frame whenever a notification arrives
    pub fn set_repaint_context(&self, ctx: egui::Context) {
        *self.repaint.lock() = Some(ctx);
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<ViewNotification> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    fn push(&self, notification: ViewNotification) {
        self.pending.lock().push_back(notification);
        if let Some(ctx) = self.repaint.lock().as_ref() {
            ctx.request_repaint();
        }
    }
}

impl ViewSubscriber for ViewInbox {
    fn on_results_changed(&self, update: &ResultsUpdate) {
        self.push(ViewNotification::Results(update.clone()));
    }

    fn on_selection_changed(&self, change: &SelectionChange) {
        self.push(ViewNotification::Selection(change.clone()));
    }
}
