//! Settings view - Application configuration

use egui::RichText;

use crate::config::{AppConfig, ThemeMode};
use crate::dashboard::state::{DashboardAction, SettingsViewState};
use crate::dashboard::theme::ThemeColors;

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    config: &mut AppConfig,
    database_path: &str,
    colors: &ThemeColors,
) -> Option<DashboardAction> {
    let mut action = None;

    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Configure appearance and display preferences")
            .size(14.0)
            .color(colors.text_secondary)
    );

    ui.add_space(24.0);

    // Appearance
    section_frame(ui, colors, "Appearance", |ui| {
        ui.horizontal(|ui| {
            ui.label("Theme:");
            ui.add_space(8.0);
            for mode in [ThemeMode::Light, ThemeMode::Dark] {
                let selected = config.appearance.theme == mode;
                if ui.selectable_label(selected, mode.name()).clicked() && !selected {
                    action = Some(DashboardAction::SetTheme(mode));
                }
            }
        });
    });

    ui.add_space(16.0);

    // Display
    section_frame(ui, colors, "Display", |ui| {
        ui.horizontal(|ui| {
            ui.label("List preview length:");
            ui.add_space(8.0);
            if ui.add(
                egui::Slider::new(&mut config.display.list_preview_chars, 20..=200)
                    .suffix(" chars")
            ).changed() {
                view_state.dirty = true;
            }
        });

        ui.horizontal(|ui| {
            ui.label("Recently shown history:");
            ui.add_space(8.0);
            if ui.add(egui::Slider::new(&mut config.display.history_len, 0..=50)).changed() {
                view_state.dirty = true;
            }
        });
    });

    ui.add_space(16.0);

    // Storage
    section_frame(ui, colors, "Storage", |ui| {
        ui.horizontal(|ui| {
            ui.label("Database:");
            ui.add_space(8.0);
            ui.label(RichText::new(database_path).monospace().color(colors.text_secondary));
        });

        ui.horizontal(|ui| {
            ui.label("Seed sample quotes in new databases:");
            ui.add_space(8.0);
            if ui.checkbox(&mut config.general.seed_samples, "").changed() {
                view_state.dirty = true;
            }
        });
    });

    ui.add_space(24.0);

    ui.horizontal(|ui| {
        if ui.add(
            egui::Button::new(RichText::new("Save Settings").color(egui::Color32::WHITE))
                .fill(colors.accent_primary)
                .min_size(egui::vec2(140.0, 36.0))
        ).clicked() {
            action = Some(DashboardAction::SaveSettings);
        }

        if view_state.dirty {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Unsaved changes")
                    .size(12.0)
                    .color(colors.accent_warning)
            );
        }
    });

    action
}

fn section_frame(
    ui: &mut egui::Ui,
    colors: &ThemeColors,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::none()
        .fill(colors.bg_medium)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.heading(RichText::new(title).size(16.0));
            ui.add_space(12.0);
            add_contents(ui);
        });
}
