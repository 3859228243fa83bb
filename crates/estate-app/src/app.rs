//! Browser window: shell, filters, list and map around one coordinator

use std::sync::Arc;

use anyhow::{Context as _, Result};
use eframe::egui::{self, Context};
use parking_lot::Mutex;
use tracing::{error, info};

use estate_core::events::events::CatalogLoaded;
use estate_core::{AppSettings, Catalog, EventBus, ViewCoordinator};
use estate_data::{BrowserConfig, CatalogConfig, CatalogLoader, LoadedCatalog};
use estate_ui::{ErrorMessage, FilterPanel, ShellAction, ShellStatus, Theme};
use estate_views::{ListView, ListingView, MapView, ViewerContext};

/// Storage key of the map camera between sessions
const MAP_STATE_KEY: &str = "map_camera";

pub struct BrowserApp {
    runtime: tokio::runtime::Runtime,
    config: BrowserConfig,
    settings: Arc<AppSettings>,

    /// Outlives catalog reloads; every coordinator publishes on it
    event_bus: Arc<EventBus>,
    status: Arc<Mutex<ShellStatus>>,

    viewer_context: ViewerContext,
    filter_panel: FilterPanel,
    list_view: ListView,
    map_view: MapView,

    errors: Vec<ErrorMessage>,
    egui_ctx: egui::Context,
}

impl BrowserApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        config: BrowserConfig,
        mut errors: Vec<ErrorMessage>,
    ) -> Self {
        estate_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let settings = Arc::new(config.settings.clone());
        let event_bus = Arc::new(EventBus::new());
        let status = Arc::new(Mutex::new(ShellStatus::default()));

        let shared_status = status.clone();
        event_bus.subscribe_fn::<CatalogLoaded, _>(move |event| {
            *shared_status.lock() = ShellStatus {
                source_name: event.source_name.clone(),
                listing_count: event.listing_count,
                rejected_count: event.rejected_count,
            };
        });

        let loaded = match load_catalog(&runtime, &config.catalog) {
            Ok(loaded) => loaded,
            Err(err) => {
                error!("Failed to load catalog: {:#}", err);
                errors.push(ErrorMessage::new(
                    "Chargement du catalogue impossible",
                    format!("{:#}", err),
                ));
                LoadedCatalog {
                    catalog: Catalog::empty(),
                    source_name: config.catalog.display_name(),
                    rejected: Vec::new(),
                }
            }
        };

        let viewer_context = viewer_context(&loaded, &settings, &event_bus);
        let (list_view, mut map_view) = build_views(&viewer_context, &cc.egui_ctx);
        if let Some(storage) = cc.storage {
            if let Some(camera) = eframe::get_value::<serde_json::Value>(storage, MAP_STATE_KEY) {
                map_view.load_config(camera);
            }
        }
        event_bus.publish(loaded.loaded_event());

        Self {
            runtime,
            filter_panel: FilterPanel::new(settings.filter_panel.clone()),
            config,
            settings,
            event_bus,
            status,
            viewer_context,
            list_view,
            map_view,
            errors,
            egui_ctx: cc.egui_ctx.clone(),
        }
    }

    /// Replace the catalog; criteria and selection start over
    fn install(&mut self, loaded: LoadedCatalog) {
        let camera = self.map_view.save_config();

        self.viewer_context = viewer_context(&loaded, &self.settings, &self.event_bus);
        let (list_view, mut map_view) = build_views(&self.viewer_context, &self.egui_ctx);
        map_view.load_config(camera);
        self.list_view = list_view;
        self.map_view = map_view;
        self.filter_panel = FilterPanel::new(self.settings.filter_panel.clone());

        self.egui_ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "Immobilier France · {}",
            loaded.source_name
        )));
        self.event_bus.publish(loaded.loaded_event());
    }

    fn open_catalog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Catalogues", &["json", "csv", "tsv"])
            .pick_file()
        else {
            return;
        };

        let catalog_config = match CatalogConfig::for_path(&path) {
            Ok(catalog_config) => CatalogConfig {
                list_separator: self.config.catalog.list_separator,
                on_invalid: self.config.catalog.on_invalid,
                ..catalog_config
            },
            Err(err) => {
                self.errors
                    .push(ErrorMessage::new("Format non pris en charge", err.to_string()));
                return;
            }
        };

        match load_catalog(&self.runtime, &catalog_config) {
            Ok(loaded) => {
                info!(path = %path.display(), "Catalog opened");
                self.config.catalog = catalog_config;
                self.install(loaded);
            }
            Err(err) => {
                error!("Failed to open catalog: {:#}", err);
                self.errors.push(ErrorMessage::new(
                    "Chargement du catalogue impossible",
                    format!("{:#}", err),
                ));
            }
        }
    }

    fn handle_action(&mut self, ctx: &Context, action: ShellAction) {
        match action {
            ShellAction::OpenCatalog => self.open_catalog(),
            ShellAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            ShellAction::ClearSelection => self.viewer_context.coordinator.clear_selection(),
            ShellAction::ClearFilters => {
                let coordinator = self.viewer_context.coordinator.clone();
                self.filter_panel.clear(&coordinator);
            }
        }
    }
}

fn load_catalog(
    runtime: &tokio::runtime::Runtime,
    config: &CatalogConfig,
) -> Result<LoadedCatalog> {
    runtime
        .block_on(CatalogLoader::load_config(config))
        .with_context(|| format!("Impossible de charger {}", config.display_name()))
}

fn viewer_context(
    loaded: &LoadedCatalog,
    settings: &Arc<AppSettings>,
    event_bus: &Arc<EventBus>,
) -> ViewerContext {
    let coordinator = ViewCoordinator::with_event_bus(
        loaded.catalog.clone(),
        settings.coordinator_options(),
        event_bus.clone(),
    );
    ViewerContext::new(Arc::new(coordinator), settings.clone())
}

fn build_views(ctx: &ViewerContext, egui_ctx: &egui::Context) -> (ListView, MapView) {
    let list_view = ListView::new(ctx);
    let map_view = MapView::new(ctx);
    list_view.inbox().set_repaint_context(egui_ctx.clone());
    map_view.inbox().set_repaint_context(egui_ctx.clone());
    (list_view, map_view)
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.viewer_context.coordinator.clear_selection();
        }

        let status = self.status.lock().clone();
        if let Some(action) = estate_ui::menu_bar(ctx, &status) {
            self.handle_action(ctx, action);
        }
        estate_ui::header(ctx);

        let viewer_context = self.viewer_context.clone();

        egui::SidePanel::left("filters_and_list")
            .resizable(true)
            .default_width(420.0)
            .min_width(320.0)
            .show(ctx, |ui| {
                self.filter_panel.ui(ui, &viewer_context.coordinator);
                ui.separator();
                self.list_view.on_frame_update(&viewer_context, dt);
                self.list_view.ui(&viewer_context, ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.map_view.on_frame_update(&viewer_context, dt);
                self.map_view.ui(&viewer_context, ui);
            });

        estate_ui::error_window(ctx, &mut self.errors);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, MAP_STATE_KEY, &self.map_view.save_config());
    }
}
