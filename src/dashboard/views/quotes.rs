//! Quotes view - browse, search, edit, import and export

use egui::RichText;

use crate::dashboard::state::{DashboardAction, QuotesViewState};
use crate::dashboard::theme::{ThemeColors, color_with_alpha};
use crate::storage::quotes::truncate;
use crate::storage::Quote;

/// List row label: id, shortened text, and the author when present
pub fn format_row(quote: &Quote, preview_chars: usize) -> String {
    let text = truncate(&quote.text, preview_chars);
    match &quote.author {
        Some(author) => format!("{} — {} — {}", quote.id, text, author),
        None => format!("{} — {}", quote.id, text),
    }
}

/// Render the quotes view
pub fn render_quotes_view(
    ui: &mut egui::Ui,
    view_state: &mut QuotesViewState,
    preview_chars: usize,
    colors: &ThemeColors,
) -> Option<DashboardAction> {
    let mut action = None;

    ui.heading(RichText::new("Quotes").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Manage your quote library")
            .size(14.0)
            .color(colors.text_secondary)
    );

    ui.add_space(24.0);

    // Toolbar
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add_space(8.0);
        let response = ui.add(
            egui::TextEdit::singleline(&mut view_state.search_query)
                .hint_text("Text or author...")
                .desired_width(240.0)
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = Some(DashboardAction::Search);
        }

        if ui.button("Search").clicked() {
            action = Some(DashboardAction::Search);
        }
        if ui.button("Show all").clicked() {
            action = Some(DashboardAction::ShowAll);
        }

        ui.add_space(16.0);

        if ui.add(
            egui::Button::new(RichText::new("+ Add Quote").color(egui::Color32::WHITE))
                .fill(colors.accent_primary)
        ).clicked() {
            action = Some(DashboardAction::BeginAdd);
        }
    });

    ui.add_space(16.0);

    ui.horizontal_top(|ui| {
        // Left side: quote list
        egui::Frame::none()
            .fill(colors.bg_medium)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(420.0);
                ui.set_min_height(360.0);

                if view_state.quotes.is_empty() {
                    ui.label(
                        RichText::new("No quotes to show")
                            .size(14.0)
                            .color(colors.text_muted)
                    );
                    return;
                }

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for quote in &view_state.quotes {
                        let is_selected = view_state.selected_id == Some(quote.id);
                        let response = ui.selectable_label(
                            is_selected,
                            format_row(quote, preview_chars),
                        );
                        if response.clicked() {
                            view_state.selected_id = Some(quote.id);
                        }
                        if response.double_clicked() {
                            view_state.selected_id = Some(quote.id);
                            action = Some(DashboardAction::BeginEdit(quote.id));
                        }
                    }
                });
            });

        ui.add_space(16.0);

        // Right side: actions
        ui.vertical(|ui| {
            let has_selection = view_state.selected_id.is_some();

            ui.add_enabled_ui(has_selection, |ui| {
                if ui.add(egui::Button::new("Edit").min_size(egui::vec2(140.0, 32.0))).clicked() {
                    if let Some(id) = view_state.selected_id {
                        action = Some(DashboardAction::BeginEdit(id));
                    }
                }

                ui.add_space(6.0);

                if ui.add(
                    egui::Button::new(RichText::new("Delete").color(egui::Color32::WHITE))
                        .fill(colors.accent_error)
                        .min_size(egui::vec2(140.0, 32.0))
                ).clicked() {
                    view_state.show_delete_confirm = true;
                }
            });

            ui.add_space(24.0);

            ui.label(RichText::new("Import / Export").strong());
            ui.add_space(4.0);
            ui.add(
                egui::TextEdit::singleline(&mut view_state.transfer_path)
                    .hint_text("path/to/quotes.csv")
                    .desired_width(220.0)
            );
            ui.add_space(6.0);

            let has_path = !view_state.transfer_path.trim().is_empty();
            ui.add_enabled_ui(has_path, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Export CSV").clicked() {
                        action = Some(DashboardAction::Export);
                    }
                    if ui.button("Import CSV").clicked() {
                        action = Some(DashboardAction::Import);
                    }
                });
            });
        });
    });

    if view_state.editor.is_some() {
        if let Some(editor_action) = render_editor_dialog(ui, view_state, colors) {
            action = Some(editor_action);
        }
    }

    if view_state.show_delete_confirm {
        if let Some(delete_action) = render_delete_confirm_dialog(ui, view_state, colors) {
            action = Some(delete_action);
        }
    }

    action
}

/// Render the add/edit dialog
fn render_editor_dialog(
    ui: &mut egui::Ui,
    view_state: &mut QuotesViewState,
    colors: &ThemeColors,
) -> Option<DashboardAction> {
    let mut action = None;
    let mut close = false;

    let editor = view_state.editor.as_mut()?;
    let title = if editor.id.is_some() { "Edit Quote" } else { "Add Quote" };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ui.ctx(), |ui| {
            ui.set_min_width(480.0);

            ui.label("Quote:");
            ui.add(
                egui::TextEdit::multiline(&mut editor.text)
                    .desired_rows(6)
                    .desired_width(480.0)
            );

            ui.add_space(8.0);

            ui.label("Author:");
            ui.add(
                egui::TextEdit::singleline(&mut editor.author)
                    .hint_text("Unknown")
                    .desired_width(320.0)
            );

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }

                ui.add_space(8.0);

                if ui.add(
                    egui::Button::new(RichText::new("Save").color(egui::Color32::WHITE))
                        .fill(colors.accent_primary)
                ).clicked() {
                    action = Some(DashboardAction::SaveEditor);
                }
            });
        });

    if close {
        view_state.editor = None;
    }
    action
}

/// Render the delete confirmation dialog
fn render_delete_confirm_dialog(
    ui: &mut egui::Ui,
    view_state: &mut QuotesViewState,
    colors: &ThemeColors,
) -> Option<DashboardAction> {
    let mut action = None;

    egui::Window::new("Confirm Delete")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ui.ctx(), |ui| {
            ui.label("Do you really want to delete this quote?");
            ui.label(
                RichText::new("This action cannot be undone.")
                    .color(colors.accent_warning)
            );

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    view_state.show_delete_confirm = false;
                }

                ui.add_space(8.0);

                if ui.add(
                    egui::Button::new(RichText::new("Delete").color(egui::Color32::WHITE))
                        .fill(color_with_alpha(colors.accent_error, 230))
                ).clicked() {
                    action = Some(DashboardAction::ConfirmDelete);
                }
            });
        });

    action
}
