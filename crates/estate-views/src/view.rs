//! View abstraction shared by the list and the map

use egui::Ui;
use serde_json::Value;

use crate::ViewerContext;

/// Which rendering of the results a view is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    List,
    Map,
}

/// Base trait for every rendering of the filtered listings
pub trait ListingView: Send + Sync {
    fn kind(&self) -> ViewKind;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Apply pending coordinator notifications and advance animations
    fn on_frame_update(&mut self, ctx: &ViewerContext, dt: f32);

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// View state worth keeping between sessions
    fn save_config(&self) -> Value {
        Value::Null
    }

    fn load_config(&mut self, _config: Value) {}

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get as any mut for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
