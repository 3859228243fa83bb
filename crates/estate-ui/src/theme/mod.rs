use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Immobilier Clair".to_string(),
            dark_mode: false,
        }
    }
}

/// Apply the application theme: light surfaces, blue accent
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    let page_bg = Color32::from_rgb(249, 250, 251);
    let panel_bg = Color32::WHITE;
    let widget_bg = Color32::from_rgb(243, 244, 246);
    let hover_color = Color32::from_rgb(229, 231, 235);
    let border = Color32::from_rgb(209, 213, 219);
    let text_color = Color32::from_rgb(17, 24, 39);

    if !theme.dark_mode {
        visuals.window_fill = panel_bg;
        visuals.panel_fill = page_bg;
        visuals.extreme_bg_color = panel_bg;
        visuals.faint_bg_color = widget_bg;

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);

        visuals.widgets.inactive.bg_fill = widget_bg;
        visuals.widgets.inactive.weak_bg_fill = widget_bg;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);

        visuals.widgets.hovered.bg_fill = hover_color;
        visuals.widgets.hovered.weak_bg_fill = hover_color;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent_color());

        visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());
    }

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(6.0);
    }

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

pub fn accent_color() -> Color32 {
    Color32::from_rgb(37, 99, 235)
}

pub fn muted_color() -> Color32 {
    Color32::from_rgb(107, 114, 128)
}

pub fn error_color() -> Color32 {
    Color32::from_rgb(220, 38, 38)
}

pub fn warning_color() -> Color32 {
    Color32::from_rgb(217, 119, 6)
}
