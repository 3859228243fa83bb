//! Interactive map of the filtered listings

use std::sync::Arc;

use egui::{
    Align2, Area, Color32, FontId, Frame, Order, Painter, Pos2, Rect, RichText, Rounding, Sense,
    Stroke, Ui, Vec2,
};
use estate_core::format::{format_currency, format_rooms, format_surface};
use estate_core::{Coordinates, MapSettings, Property, ResultSet};
use serde_json::Value;

use super::basemap;
use super::camera::{Camera, FlyTo, MAX_ZOOM};
use super::cluster::{cluster_listings, cluster_style, MapMarker, PlacedListing};
use crate::inbox::{ViewInbox, ViewNotification};
use crate::style;
use crate::{ListingView, ViewKind, ViewerContext};

/// Zoom levels gained when a cluster is clicked
const CLUSTER_ZOOM_STEP: f64 = 2.0;
const CLUSTER_EASE_MS: u64 = 500;

/// Zoom levels per point of mouse wheel scroll
const WHEEL_ZOOM_RATE: f64 = 1.0 / 200.0;

/// Pointer distance that still hits a single marker
const MARKER_HIT_RADIUS: f32 = 16.0;

/// Map rendering of the filtered listings
pub struct MapView {
    title: String,
    inbox: Arc<ViewInbox>,
    settings: MapSettings,
    camera: Camera,
    flight: Option<FlyTo>,
    results: ResultSet,
    selected: Option<Arc<Property>>,
    popup_open: bool,
}

impl MapView {
    pub fn new(ctx: &ViewerContext) -> Self {
        let settings = ctx.settings.map.clone();
        let inbox = ViewInbox::attach(&ctx.coordinator);
        let snapshot = ctx.coordinator.context();
        Self {
            title: "Carte".to_string(),
            inbox,
            camera: Camera::new(settings.initial_center, settings.initial_zoom),
            settings,
            flight: None,
            results: snapshot.results,
            selected: snapshot.selected,
            popup_open: false,
        }
    }

    pub fn inbox(&self) -> &Arc<ViewInbox> {
        &self.inbox
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn flight(&self) -> Option<&FlyTo> {
        self.flight.as_ref()
    }

    pub fn selected(&self) -> Option<&Arc<Property>> {
        self.selected.as_ref()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Start an eased camera transition, replacing any running one
    pub fn fly_to(&mut self, center: Coordinates, zoom: f64, duration_ms: u64) {
        let target = Camera::new(center, zoom);
        self.flight = Some(FlyTo::new(self.camera, target, duration_ms));
    }

    /// Stop a running transition where it is
    pub fn cancel_flight(&mut self) {
        self.flight = None;
    }

    fn apply(&mut self, notification: ViewNotification) {
        match notification {
            ViewNotification::Results(update) => {
                self.results = update.results;
            }
            ViewNotification::Selection(change) => match change.selected {
                Some(property) => {
                    tracing::debug!(property_id = %property.id, "map flying to listing");
                    self.fly_to(
                        property.coordinates(),
                        self.settings.selection_zoom,
                        self.settings.fly_duration_ms,
                    );
                    self.selected = Some(property);
                    self.popup_open = true;
                }
                None => {
                    self.selected = None;
                    self.popup_open = false;
                }
            },
        }
    }

    /// Markers for the listings visible in `rect`
    pub fn markers(&self, rect: Rect) -> Vec<MapMarker> {
        let margin = self.settings.cluster_radius_px.max(MARKER_HIT_RADIUS);
        let visible = rect.expand(margin);
        let placed: Vec<PlacedListing> = self
            .results
            .iter()
            .map(|property| PlacedListing {
                pos: self.camera.project(property.coordinates(), rect),
                property: property.clone(),
            })
            .filter(|listing| visible.contains(listing.pos))
            .collect();

        if self.camera.zoom < self.settings.cluster_max_zoom {
            cluster_listings(placed, self.settings.cluster_radius_px)
        } else {
            placed.into_iter().map(MapMarker::Single).collect()
        }
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if response.dragged() {
            self.camera.pan(response.drag_delta());
            self.cancel_flight();
        }

        if response.hovered() {
            let (scroll, pinch) = ui.input(|i| (i.scroll_delta.y, i.zoom_delta()));
            let delta = scroll as f64 * WHEEL_ZOOM_RATE + (pinch as f64).log2();
            if delta != 0.0 {
                let anchor = response.hover_pos().unwrap_or(rect.center());
                self.camera.zoom_at(delta, anchor, rect);
                self.cancel_flight();
            }
        }
    }

    fn handle_click(&mut self, ctx: &ViewerContext, pos: Pos2, markers: &[MapMarker], rect: Rect) {
        match hit_test(markers, pos) {
            Some(MapMarker::Single(listing)) => {
                let _ = ctx.coordinator.select_property(&listing.property);
            }
            Some(MapMarker::Cluster { pos, .. }) => {
                let center = self.camera.unproject(*pos, rect);
                let zoom = (self.camera.zoom + CLUSTER_ZOOM_STEP).min(MAX_ZOOM);
                self.fly_to(center, zoom, CLUSTER_EASE_MS);
            }
            None => self.popup_open = false,
        }
    }

    fn draw_markers(&self, painter: &Painter, markers: &[MapMarker]) {
        let mut selected_marker = None;

        for marker in markers {
            match marker {
                MapMarker::Single(listing) => {
                    if self.is_selected(&listing.property) {
                        selected_marker = Some(listing);
                        continue;
                    }
                    draw_price_pin(painter, listing, style::MARKER);
                }
                MapMarker::Cluster { members, pos } => {
                    let cluster = cluster_style(members.len());
                    painter.circle(
                        *pos,
                        cluster.radius,
                        cluster.color,
                        Stroke::new(2.0, Color32::WHITE),
                    );
                    painter.text(
                        *pos,
                        Align2::CENTER_CENTER,
                        members.len().to_string(),
                        FontId::proportional(13.0),
                        Color32::WHITE,
                    );
                }
            }
        }

        // Drawn last so it stays on top
        if let Some(listing) = selected_marker {
            draw_price_pin(painter, listing, style::MARKER_SELECTED);
        }
    }

    fn is_selected(&self, property: &Property) -> bool {
        self.selected
            .as_ref()
            .map_or(false, |selected| selected.id == property.id)
    }

    fn show_popup(&mut self, ui: &Ui, rect: Rect) {
        let Some(property) = self.selected.clone() else {
            return;
        };
        if !self.popup_open {
            return;
        }
        let anchor = self.camera.project(property.coordinates(), rect);
        if !rect.contains(anchor) {
            return;
        }

        Area::new("map_popup")
            .order(Order::Foreground)
            .fixed_pos(anchor - Vec2::new(0.0, 18.0))
            .pivot(Align2::CENTER_BOTTOM)
            .show(ui.ctx(), |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(220.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&property.title).strong());
                        if ui.small_button("x").clicked() {
                            self.popup_open = false;
                        }
                    });
                    ui.label(
                        RichText::new(format_currency(property.price))
                            .strong()
                            .color(style::PRIMARY),
                    );
                    ui.label(format!(
                        "{} · {}",
                        format_rooms(property.rooms),
                        format_surface(property.surface)
                    ));
                    ui.label(RichText::new(&property.location.city).color(style::MUTED_TEXT));
                });
            });
    }

    fn show_zoom_controls(&mut self, ui: &Ui, rect: Rect) {
        let mut delta = 0.0;
        Area::new("map_zoom_controls")
            .order(Order::Foreground)
            .fixed_pos(rect.right_top() + Vec2::new(-40.0, 10.0))
            .show(ui.ctx(), |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    if ui.button("+").on_hover_text("Zoom avant").clicked() {
                        delta = 1.0;
                    }
                    if ui.button("-").on_hover_text("Zoom arrière").clicked() {
                        delta = -1.0;
                    }
                });
            });

        if delta != 0.0 {
            self.cancel_flight();
            self.camera.zoom_at(delta, rect.center(), rect);
        }
    }
}

/// Topmost marker under `pos`
pub(crate) fn hit_test(markers: &[MapMarker], pos: Pos2) -> Option<&MapMarker> {
    markers.iter().rev().find(|marker| {
        let radius = match marker {
            MapMarker::Single(_) => MARKER_HIT_RADIUS,
            MapMarker::Cluster { members, .. } => cluster_style(members.len()).radius,
        };
        marker.pos().distance(pos) <= radius
    })
}

fn draw_price_pin(painter: &Painter, listing: &PlacedListing, fill: Color32) {
    let text = compact_price(listing.property.price);
    let font = FontId::proportional(11.0);
    let width = 10.0 + 6.5 * text.chars().count() as f32;
    let pin = Rect::from_center_size(listing.pos, Vec2::new(width, 20.0));

    painter.rect(pin, Rounding::same(10.0), fill, Stroke::new(1.5, Color32::WHITE));
    painter.text(pin.center(), Align2::CENTER_CENTER, text, font, Color32::WHITE);
}

/// Short price label for map pins, e.g. `850k€` or `1,2M€`
pub fn compact_price(price: f64) -> String {
    if price >= 1_000_000.0 {
        let millions = (price / 100_000.0).round() / 10.0;
        let text = if millions.fract() == 0.0 {
            format!("{}", millions as u64)
        } else {
            format!("{:.1}", millions).replace('.', ",")
        };
        format!("{}M€", text)
    } else if price >= 1_000.0 {
        format!("{}k€", (price / 1_000.0).round() as u64)
    } else {
        format!("{}€", price.round() as u64)
    }
}

impl ListingView for MapView {
    fn kind(&self) -> ViewKind {
        ViewKind::Map
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn on_frame_update(&mut self, _ctx: &ViewerContext, dt: f32) {
        for notification in self.inbox.drain() {
            self.apply(notification);
        }

        if let Some(flight) = self.flight.as_mut() {
            self.camera = flight.advance(dt as f64);
            if flight.is_finished() {
                self.flight = None;
            }
        }
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.handle_input(ui, rect, &response);

        let painter = ui.painter_at(rect);
        basemap::draw(&painter, &self.camera, rect);

        let markers = self.markers(rect);
        self.draw_markers(&painter, &markers);

        if self.results.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Aucun bien à afficher",
                FontId::proportional(16.0),
                style::MUTED_TEXT,
            );
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_click(ctx, pos, &markers, rect);
            }
        }

        self.show_popup(ui, rect);
        self.show_zoom_controls(ui, rect);

        if self.flight.is_some() {
            ui.ctx().request_repaint();
        }
    }

    fn save_config(&self) -> Value {
        serde_json::to_value(self.camera).unwrap_or(Value::Null)
    }

    fn load_config(&mut self, config: Value) {
        if let Ok(camera) = serde_json::from_value::<Camera>(config) {
            self.camera = Camera::new(camera.center, camera.zoom);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
