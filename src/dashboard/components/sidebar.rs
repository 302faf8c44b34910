//! Sidebar navigation component

use egui::{Color32, RichText, Rounding, Sense, Vec2};
use crate::dashboard::state::DashboardView;
use crate::dashboard::theme::{ThemeColors, color_with_alpha};

/// Render the sidebar navigation
pub fn render_sidebar(ui: &mut egui::Ui, current_view: &mut DashboardView, colors: &ThemeColors) {
    ui.vertical(|ui| {
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Daily")
                    .size(24.0)
                    .color(colors.accent_primary)
                    .strong()
            );
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Motivational quotes")
                    .size(11.0)
                    .color(colors.text_muted)
            );
        });

        ui.add_space(24.0);
        ui.separator();
        ui.add_space(16.0);

        for view in [
            DashboardView::Today,
            DashboardView::Quotes,
            DashboardView::Settings,
        ] {
            let is_selected = *current_view == view;
            if nav_button(ui, view.icon(), view.name(), is_selected, colors) {
                *current_view = view;
            }
            ui.add_space(4.0);
        }

        // Spacer to push version to bottom
        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .color(colors.text_muted)
                );
            });
            ui.add_space(8.0);
            ui.separator();
        });
    });
}

/// Render a navigation button
fn nav_button(
    ui: &mut egui::Ui,
    icon: &str,
    label: &str,
    is_selected: bool,
    colors: &ThemeColors,
) -> bool {
    let available_width = ui.available_width();
    let desired_size = Vec2::new(available_width - 16.0, 36.0);

    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    if ui.is_rect_visible(rect) {
        let bg_color = if is_selected {
            color_with_alpha(colors.accent_primary, 51) // ~0.2 alpha
        } else if response.hovered() {
            colors.bg_hover
        } else {
            Color32::TRANSPARENT
        };

        let text_color = if is_selected {
            colors.accent_primary
        } else if response.hovered() {
            colors.text_primary
        } else {
            colors.text_secondary
        };

        ui.painter().rect_filled(
            rect.shrink2(Vec2::new(8.0, 0.0)),
            Rounding::same(6.0),
            bg_color,
        );

        // Selection indicator
        if is_selected {
            let indicator_rect = egui::Rect::from_min_size(
                rect.left_top() + Vec2::new(8.0, 6.0),
                Vec2::new(3.0, rect.height() - 12.0),
            );
            ui.painter().rect_filled(
                indicator_rect,
                Rounding::same(1.5),
                colors.accent_primary,
            );
        }

        ui.painter().text(
            rect.left_center() + Vec2::new(24.0, 0.0),
            egui::Align2::LEFT_CENTER,
            icon,
            egui::FontId::proportional(14.0),
            text_color,
        );

        ui.painter().text(
            rect.left_center() + Vec2::new(48.0, 0.0),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(14.0),
            text_color,
        );
    }

    response.clicked()
}
