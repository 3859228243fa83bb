use std::time::Instant;

use egui::{Context, RichText, TopBottomPanel};

use crate::theme;

/// Something the user asked for from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    OpenCatalog,
    Quit,
    ClearSelection,
    ClearFilters,
}

/// What the shell shows about the loaded catalog
#[derive(Debug, Clone, Default)]
pub struct ShellStatus {
    pub source_name: String,
    pub listing_count: usize,
    pub rejected_count: usize,
}

/// Error message to display
#[derive(Debug, Clone)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
    pub timestamp: Instant,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            timestamp: Instant::now(),
        }
    }
}

/// Render the main menu bar
pub fn menu_bar(ctx: &Context, status: &ShellStatus) -> Option<ShellAction> {
    let mut action = None;

    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Fichier", |ui| {
                if ui.button("Ouvrir un catalogue…").clicked() {
                    action = Some(ShellAction::OpenCatalog);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quitter").clicked() {
                    action = Some(ShellAction::Quit);
                    ui.close_menu();
                }
            });

            ui.menu_button("Affichage", |ui| {
                if ui.button("Effacer la sélection").clicked() {
                    action = Some(ShellAction::ClearSelection);
                    ui.close_menu();
                }
                if ui.button("Effacer les filtres").clicked() {
                    action = Some(ShellAction::ClearFilters);
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if status.rejected_count > 0 {
                    ui.label(
                        RichText::new(format!("{} annonce(s) ignorée(s)", status.rejected_count))
                            .color(theme::warning_color()),
                    );
                    ui.separator();
                }
                ui.label(
                    RichText::new(format!(
                        "{} · {} annonces",
                        status.source_name, status.listing_count
                    ))
                    .color(theme::muted_color()),
                );
            });
        });
    });

    action
}

/// Render the application header
pub fn header(ctx: &Context) {
    TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Immobilier France")
                    .heading()
                    .strong()
                    .color(theme::accent_color()),
            );
            ui.label(RichText::new("Trouvez votre bien idéal").color(theme::muted_color()));
        });
        ui.add_space(6.0);
    });
}

/// Show pending errors in a window until dismissed
pub fn error_window(ctx: &Context, errors: &mut Vec<ErrorMessage>) {
    if errors.is_empty() {
        return;
    }

    let mut open = true;
    let mut dismissed = Vec::new();

    egui::Window::new("Erreur")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            for (i, error) in errors.iter().enumerate() {
                egui::Frame::none()
                    .fill(theme::error_color().linear_multiply(0.1))
                    .stroke(egui::Stroke::new(1.0, theme::error_color()))
                    .rounding(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&error.title).strong().color(theme::error_color()));
                        ui.label(&error.message);
                        ui.label(
                            RichText::new(format!(
                                "il y a {} s",
                                error.timestamp.elapsed().as_secs()
                            ))
                            .small()
                            .color(theme::muted_color()),
                        );
                        if ui.button("Fermer").clicked() {
                            dismissed.push(i);
                        }
                    });
            }
        });

    if !open {
        errors.clear();
        return;
    }
    for i in dismissed.into_iter().rev() {
        errors.remove(i);
    }
}
