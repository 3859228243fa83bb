//! Browser settings shared by the coordinator and the views

use serde::{Deserialize, Serialize};

use crate::coordinator::CoordinatorOptions;
use crate::filter::DEFAULT_PARALLEL_THRESHOLD;
use crate::model::Coordinates;
use crate::sync::SelectionPolicy;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// What happens to a selection the filters hide
    pub selection_policy: SelectionPolicy,

    /// Catalog size from which filtering runs on the rayon pool
    pub parallel_threshold: usize,

    pub map: MapSettings,
    pub filter_panel: FilterPanelSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            map: MapSettings::default(),
            filter_panel: FilterPanelSettings::default(),
        }
    }
}

impl AppSettings {
    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            selection_policy: self.selection_policy,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Spatial view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    /// Camera center at startup (metropolitan France)
    pub initial_center: Coordinates,
    pub initial_zoom: f64,

    /// Zoom the camera flies to when a listing is selected
    pub selection_zoom: f64,
    pub fly_duration_ms: u64,

    /// Markers are clustered up to this zoom
    pub cluster_max_zoom: f64,
    pub cluster_radius_px: f32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            initial_center: Coordinates::new(2.3522, 46.6033),
            initial_zoom: 5.0,
            selection_zoom: 14.0,
            fly_duration_ms: 1500,
            cluster_max_zoom: 14.0,
            cluster_radius_px: 50.0,
        }
    }
}

/// Filter form ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPanelSettings {
    /// Top of the price slider; reaching it means "no upper bound"
    pub price_ceiling: f64,
    pub price_step: f64,

    /// Top of the surface slider; reaching it means "no upper bound"
    pub surface_ceiling: f64,
    pub surface_step: f64,

    /// Largest choice in the minimum-rooms menu, shown as "N pièces et +"
    pub max_rooms_choice: u32,
}

impl Default for FilterPanelSettings {
    fn default() -> Self {
        Self {
            price_ceiling: 1_000_000.0,
            price_step: 10_000.0,
            surface_ceiling: 200.0,
            surface_step: 5.0,
            max_rooms_choice: 5,
        }
    }
}
