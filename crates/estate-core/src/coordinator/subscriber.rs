//! View subscriber trait

use super::{ResultsUpdate, SelectionChange};

/// Trait for views that render the coordinator's results and selection
pub trait ViewSubscriber: Send + Sync {
    /// Called after every filter recompute or clear
    fn on_results_changed(&self, update: &ResultsUpdate);

    /// Called on every accepted selection change, repeats included
    fn on_selection_changed(&self, change: &SelectionChange);
}
