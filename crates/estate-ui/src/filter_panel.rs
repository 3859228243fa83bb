//! Filter form: the seven criteria as widgets

use egui::{ComboBox, RichText, Slider, Ui};
use estate_core::format::{format_price_ceiling, format_rooms, format_surface_ceiling};
use estate_core::{FilterCriteria, FilterPanelSettings, PropertyType, ViewCoordinator};

use crate::theme;

/// Widget state of the filter form.
///
/// Sliders carry plain numbers; [`FilterForm::to_criteria`] maps their
/// resting positions (lower at 0, upper at the ceiling) to absent bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    pub search: String,
    pub kind: Option<PropertyType>,
    pub min_rooms: Option<u32>,
    pub price: [f64; 2],
    pub surface: [f64; 2],
}

impl FilterForm {
    /// A form with every filter at rest
    pub fn new(settings: &FilterPanelSettings) -> Self {
        Self {
            search: String::new(),
            kind: None,
            min_rooms: None,
            price: [0.0, settings.price_ceiling],
            surface: [0.0, settings.surface_ceiling],
        }
    }

    /// Show existing criteria in the form
    pub fn from_criteria(criteria: &FilterCriteria, settings: &FilterPanelSettings) -> Self {
        Self {
            search: criteria.search_query.clone().unwrap_or_default(),
            kind: criteria.kind,
            min_rooms: criteria.rooms,
            price: [
                criteria.price_min.unwrap_or(0.0),
                criteria.price_max.unwrap_or(settings.price_ceiling),
            ],
            surface: [
                criteria.surface_min.unwrap_or(0.0),
                criteria.surface_max.unwrap_or(settings.surface_ceiling),
            ],
        }
    }

    pub fn reset(&mut self, settings: &FilterPanelSettings) {
        *self = Self::new(settings);
    }

    pub fn to_criteria(&self, settings: &FilterPanelSettings) -> FilterCriteria {
        let search = self.search.trim();
        FilterCriteria {
            price_min: lower_bound(self.price[0]),
            price_max: upper_bound(self.price[1], settings.price_ceiling),
            surface_min: lower_bound(self.surface[0]),
            surface_max: upper_bound(self.surface[1], settings.surface_ceiling),
            rooms: self.min_rooms,
            kind: self.kind,
            search_query: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

fn lower_bound(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

fn upper_bound(value: f64, ceiling: f64) -> Option<f64> {
    (value < ceiling).then_some(value)
}

/// Label of a minimum-rooms choice; the last one reads "N pièces et +"
pub fn rooms_choice_label(rooms: u32, max_choice: u32) -> String {
    if rooms >= max_choice {
        format!("{} et +", format_rooms(rooms))
    } else {
        format_rooms(rooms)
    }
}

/// `3 / 8 biens`
pub fn format_counter(filtered: usize, total: usize) -> String {
    format!("{} / {} biens", filtered, total)
}

/// Left-column filter form bound to the coordinator
pub struct FilterPanel {
    settings: FilterPanelSettings,
    form: FilterForm,
    applied: FilterCriteria,
}

impl FilterPanel {
    pub fn new(settings: FilterPanelSettings) -> Self {
        let form = FilterForm::new(&settings);
        let applied = form.to_criteria(&settings);
        Self {
            settings,
            form,
            applied,
        }
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilterForm {
        &mut self.form
    }

    /// Push the form to the coordinator if it changed since the last push
    pub fn apply(&mut self, coordinator: &ViewCoordinator) -> bool {
        let criteria = self.form.to_criteria(&self.settings);
        if criteria == self.applied {
            return false;
        }
        tracing::debug!(active = criteria.active_count(), "filter form changed");
        coordinator.set_filters(criteria.clone());
        self.applied = criteria;
        true
    }

    /// Reset the form and the coordinator
    pub fn clear(&mut self, coordinator: &ViewCoordinator) {
        self.form.reset(&self.settings);
        self.applied = self.form.to_criteria(&self.settings);
        coordinator.clear();
    }

    /// Follow criteria changed outside the form
    pub fn sync_from(&mut self, coordinator: &ViewCoordinator) {
        let criteria = coordinator.criteria();
        if criteria != self.applied {
            self.form = FilterForm::from_criteria(&criteria, &self.settings);
            self.applied = criteria;
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, coordinator: &ViewCoordinator) {
        self.sync_from(coordinator);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Filtres").strong().size(16.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = format_counter(coordinator.results().len(), coordinator.total_count());
                ui.label(RichText::new(count).color(theme::muted_color()));
            });
        });

        ui.add_space(4.0);
        ui.label("Localisation");
        ui.add(
            egui::TextEdit::singleline(&mut self.form.search)
                .hint_text("Ex: Paris, Lyon, Rhône...")
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Type de bien");
                self.type_combo(ui);
            });
            ui.vertical(|ui| {
                ui.label("Pièces minimum");
                self.rooms_combo(ui);
            });
        });

        let price_ceiling = self.settings.price_ceiling;
        ui.label("Prix");
        range_sliders(
            ui,
            &mut self.form.price,
            price_ceiling,
            self.settings.price_step,
            move |v| format_price_ceiling(v, price_ceiling),
        );

        let surface_ceiling = self.settings.surface_ceiling;
        ui.label("Surface");
        range_sliders(
            ui,
            &mut self.form.surface,
            surface_ceiling,
            self.settings.surface_step,
            move |v| format_surface_ceiling(v, surface_ceiling),
        );

        ui.add_space(4.0);
        if ui.button("Effacer les filtres").clicked() {
            self.clear(coordinator);
        } else {
            self.apply(coordinator);
        }
    }

    fn type_combo(&mut self, ui: &mut Ui) {
        let selected = self.form.kind.map_or("Tous les types", |k| k.label());
        ComboBox::from_id_source("type_filter")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.kind, None, "Tous les types");
                for kind in PropertyType::ALL {
                    ui.selectable_value(&mut self.form.kind, Some(kind), kind.label());
                }
            });
    }

    fn rooms_combo(&mut self, ui: &mut Ui) {
        let max = self.settings.max_rooms_choice.max(1);
        let selected = self
            .form
            .min_rooms
            .map_or_else(|| "Indifférent".to_string(), |r| rooms_choice_label(r, max));
        ComboBox::from_id_source("rooms_filter")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.min_rooms, None, "Indifférent");
                for rooms in 1..=max {
                    ui.selectable_value(
                        &mut self.form.min_rooms,
                        Some(rooms),
                        rooms_choice_label(rooms, max),
                    );
                }
            });
    }
}

/// Lower and upper slider over `0..=ceiling`, kept ordered
fn range_sliders(
    ui: &mut Ui,
    range: &mut [f64; 2],
    ceiling: f64,
    step: f64,
    label: impl Fn(f64) -> String + Copy,
) {
    let [min, max] = range;
    let min_changed = ui
        .add(
            Slider::new(&mut *min, 0.0..=ceiling)
                .step_by(step)
                .custom_formatter(move |v, _| label(v))
                .text("min"),
        )
        .changed();
    let max_changed = ui
        .add(
            Slider::new(&mut *max, 0.0..=ceiling)
                .step_by(step)
                .custom_formatter(move |v, _| label(v))
                .text("max"),
        )
        .changed();

    if *min > *max {
        if min_changed {
            *max = *min;
        } else if max_changed {
            *min = *max;
        }
    }
}
