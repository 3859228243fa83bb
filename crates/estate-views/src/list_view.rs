//! Scrollable list of listing cards

use std::sync::Arc;

use egui::{Align, Color32, Frame, Margin, RichText, Rounding, ScrollArea, Sense, Stroke, Ui};
use estate_core::format::{
    format_currency, format_price_per_square_meter, format_result_count, format_rooms,
    format_surface,
};
use estate_core::{Property, ResultSet};

use crate::inbox::{ViewInbox, ViewNotification};
use crate::style;
use crate::{ListingView, ViewKind, ViewerContext};

/// Features shown on a card before the "+N" badge
const VISIBLE_FEATURES: usize = 3;

/// List rendering of the filtered listings
pub struct ListView {
    title: String,
    inbox: Arc<ViewInbox>,
    results: ResultSet,
    selected: Option<Arc<Property>>,

    /// Set by a selection notification, consumed by the next frame
    scroll_to_selected: bool,
}

impl ListView {
    pub fn new(ctx: &ViewerContext) -> Self {
        let inbox = ViewInbox::attach(&ctx.coordinator);
        let snapshot = ctx.coordinator.context();
        Self {
            title: "Liste".to_string(),
            inbox,
            results: snapshot.results,
            selected: snapshot.selected,
            scroll_to_selected: false,
        }
    }

    pub fn inbox(&self) -> &Arc<ViewInbox> {
        &self.inbox
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn selected(&self) -> Option<&Arc<Property>> {
        self.selected.as_ref()
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.scroll_to_selected
    }

    fn apply(&mut self, notification: ViewNotification) {
        match notification {
            ViewNotification::Results(update) => {
                self.results = update.results;
            }
            ViewNotification::Selection(change) => {
                self.scroll_to_selected = change.selected.is_some();
                self.selected = change.selected;
            }
        }
    }

    fn is_selected(&self, property: &Property) -> bool {
        self.selected
            .as_ref()
            .map_or(false, |selected| selected.id == property.id)
    }

    fn show_empty_state(ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(RichText::new("Aucun bien trouvé").heading());
            ui.add_space(4.0);
            ui.label(
                RichText::new("Essayez de modifier vos critères de recherche")
                    .color(style::MUTED_TEXT),
            );
        });
    }

    /// Draw one card and report whether it was clicked
    fn show_card(&mut self, ui: &mut Ui, property: &Property) -> bool {
        let selected = self.is_selected(property);
        let (fill, stroke) = if selected {
            (style::SELECTED_FILL, Stroke::new(2.0, style::PRIMARY))
        } else {
            (style::CARD_FILL, Stroke::new(1.0, style::CARD_BORDER))
        };

        let frame = Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(Rounding::same(8.0))
            .inner_margin(Margin::same(10.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                card_contents(ui, property);
            });

        let response = frame.response.interact(Sense::click());
        if selected && self.scroll_to_selected {
            response.scroll_to_me(Some(Align::Center));
            self.scroll_to_selected = false;
        }
        response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked()
    }
}

fn badge(ui: &mut Ui, text: impl Into<String>, fill: Color32, color: Color32) {
    Frame::none()
        .fill(fill)
        .rounding(Rounding::same(4.0))
        .inner_margin(Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text.into()).small().strong().color(color));
        });
}

fn card_contents(ui: &mut Ui, property: &Property) {
    ui.horizontal(|ui| {
        badge(
            ui,
            property.kind.label(),
            style::BADGE_FILL,
            Color32::from_rgb(55, 65, 81),
        );
        badge(
            ui,
            format!("DPE {}", property.energy_class),
            style::energy_color(property.energy_class),
            style::energy_text_color(property.energy_class),
        );
        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
            badge(ui, format_currency(property.price), style::PRIMARY, Color32::WHITE);
        });
    });

    ui.add_space(4.0);
    ui.label(RichText::new(&property.title).strong().size(15.0));
    ui.label(
        RichText::new(format!(
            "{}, {}",
            property.location.city, property.location.department
        ))
        .color(style::MUTED_TEXT),
    );

    ui.add_space(2.0);
    ui.label(format!(
        "{}  ·  {}  ·  {}",
        format_surface(property.surface),
        format_rooms(property.rooms),
        format_price_per_square_meter(property)
    ));

    if !property.description.is_empty() {
        ui.label(
            RichText::new(&property.description)
                .small()
                .color(style::MUTED_TEXT),
        );
    }

    let (shown, hidden) = feature_summary(&property.features, VISIBLE_FEATURES);
    if !shown.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for feature in shown {
                badge(ui, feature, style::BADGE_FILL, style::MUTED_TEXT);
            }
            if hidden > 0 {
                badge(ui, format!("+{}", hidden), style::BADGE_FILL, style::MUTED_TEXT);
            }
        });
    }
}

/// First `max` features and how many are left out
pub fn feature_summary(features: &[String], max: usize) -> (&[String], usize) {
    let shown = &features[..features.len().min(max)];
    (shown, features.len() - shown.len())
}

impl ListingView for ListView {
    fn kind(&self) -> ViewKind {
        ViewKind::List
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn on_frame_update(&mut self, _ctx: &ViewerContext, _dt: f32) {
        for notification in self.inbox.drain() {
            self.apply(notification);
        }
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_result_count(self.results.len())).strong());
        });
        ui.label(
            RichText::new("Cliquez sur un bien pour le localiser sur la carte")
                .small()
                .color(style::MUTED_TEXT),
        );
        ui.separator();

        if self.results.is_empty() {
            Self::show_empty_state(ui);
            return;
        }

        let results = self.results.clone();
        let mut clicked = None;

        ScrollArea::vertical()
            .id_source("listing_cards")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for property in results.iter() {
                    if self.show_card(ui, property) {
                        clicked = Some(property.clone());
                    }
                    ui.add_space(8.0);
                }
            });

        if let Some(property) = clicked {
            // Unknown ids are logged and reported by the coordinator
            let _ = ctx.coordinator.select_property(&property);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::viewer_context;
    use estate_core::{FilterCriteria, PropertyId};

    #[test]
    fn test_list_starts_from_the_coordinator_snapshot() {
        let ctx = viewer_context();
        let view = ListView::new(&ctx);
        assert_eq!(view.results().len(), 3);
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_list_follows_results_and_selection() {
        let ctx = viewer_context();
        let mut view = ListView::new(&ctx);

        ctx.coordinator
            .set_filters(FilterCriteria::new().with_search("rhône"));
        ctx.coordinator.select(&PropertyId::from("3")).unwrap();
        view.on_frame_update(&ctx, 0.016);

        let ids: Vec<&str> = view.results().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);
        assert_eq!(view.selected().unwrap().location.city, "Marseille");
        assert!(view.is_scroll_pending());

        ctx.coordinator.clear_selection();
        view.on_frame_update(&ctx, 0.016);
        assert!(view.selected().is_none());
        assert!(!view.is_scroll_pending());
    }

    #[test]
    fn test_feature_summary() {
        let features: Vec<String> = ["Balcon", "Cave", "Gardien", "Ascenseur"]
            .iter()
            .map(|f| f.to_string())
            .collect();
        let (shown, hidden) = feature_summary(&features, 3);
        assert_eq!(shown, &features[..3]);
        assert_eq!(hidden, 1);

        let (shown, hidden) = feature_summary(&features[..2], 3);
        assert_eq!(shown.len(), 2);
        assert_eq!(hidden, 0);
    }
}
