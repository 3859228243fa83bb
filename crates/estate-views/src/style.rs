//! Colors shared by the views

use egui::Color32;
use estate_core::{EnergyClass, EnergyTier};

pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235);
pub const SELECTED_FILL: Color32 = Color32::from_rgb(239, 246, 255);
pub const CARD_FILL: Color32 = Color32::WHITE;
pub const CARD_BORDER: Color32 = Color32::from_rgb(229, 231, 235);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(107, 114, 128);
pub const BADGE_FILL: Color32 = Color32::from_rgb(243, 244, 246);

pub const MAP_WATER: Color32 = Color32::from_rgb(219, 234, 254);
pub const MAP_LAND: Color32 = Color32::from_rgb(248, 250, 252);
pub const MAP_BORDER: Color32 = Color32::from_rgb(148, 163, 184);
pub const MAP_GRID: Color32 = Color32::from_rgb(191, 219, 254);
pub const MARKER: Color32 = PRIMARY;
pub const MARKER_SELECTED: Color32 = Color32::from_rgb(220, 38, 38);

pub fn tier_color(tier: EnergyTier) -> Color32 {
    let [r, g, b] = tier.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn energy_color(class: EnergyClass) -> Color32 {
    tier_color(class.tier())
}

/// Readable text on top of an energy badge
pub fn energy_text_color(class: EnergyClass) -> Color32 {
    match class {
        EnergyClass::C | EnergyClass::D => Color32::from_rgb(55, 65, 81),
        _ => Color32::WHITE,
    }
}
