//! Today view - quote of the day and recently shown quotes

use egui::RichText;

use crate::config::ThemeMode;
use crate::dashboard::components::status_card::{CardStatus, StatusCard};
use crate::dashboard::state::{DashboardAction, QuoteSource, TodayViewState};
use crate::dashboard::theme::ThemeColors;
use crate::storage::Quote;

/// Render the today view
pub fn render_today_view(
    ui: &mut egui::Ui,
    view_state: &TodayViewState,
    theme: ThemeMode,
    colors: &ThemeColors,
) -> Option<DashboardAction> {
    let mut action = None;

    let heading = match view_state.source {
        QuoteSource::Daily => "Quote of the Day",
        QuoteSource::Random => "Random Quote",
    };
    ui.heading(RichText::new(heading).size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new(chrono::Local::now().format("%A, %B %-d, %Y").to_string())
            .size(14.0)
            .color(colors.text_secondary)
    );

    ui.add_space(24.0);

    // Displayed quote
    egui::Frame::none()
        .fill(colors.bg_medium)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            match &view_state.displayed {
                Some(quote) => render_quote(ui, quote, colors),
                None => {
                    let message = if view_state.total_quotes > 0 {
                        "Pick a quote with the buttons below."
                    } else {
                        "There are no quotes in the database yet."
                    };
                    ui.label(
                        RichText::new(message)
                            .size(16.0)
                            .color(colors.text_muted)
                    );
                }
            }
        });

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        if ui.add(
            egui::Button::new(RichText::new("Random quote").color(egui::Color32::WHITE))
                .fill(colors.accent_primary)
                .min_size(egui::vec2(140.0, 36.0))
        ).clicked() {
            action = Some(DashboardAction::ShowRandom);
        }

        ui.add_space(8.0);

        if ui.add(
            egui::Button::new("Quote of the day")
                .min_size(egui::vec2(140.0, 36.0))
        ).clicked() {
            action = Some(DashboardAction::ShowDaily);
        }

        ui.add_space(8.0);

        let toggle_label = format!("{} theme", theme.toggled().name());
        if ui.add(
            egui::Button::new(toggle_label)
                .min_size(egui::vec2(140.0, 36.0))
        ).clicked() {
            action = Some(DashboardAction::SetTheme(theme.toggled()));
        }
    });

    ui.add_space(24.0);

    ui.horizontal(|ui| {
        let count_status = if view_state.total_quotes > 0 {
            CardStatus::Active
        } else {
            CardStatus::Warning
        };
        StatusCard::new("Stored Quotes", view_state.total_quotes.to_string(), count_status)
            .show(ui, colors);

        ui.add_space(16.0);

        StatusCard::new("Theme", theme.name(), CardStatus::Inactive).show(ui, colors);
    });

    ui.add_space(24.0);

    ui.heading(RichText::new("Recently Shown").size(18.0));
    ui.add_space(8.0);

    if view_state.history.is_empty() {
        ui.label(
            RichText::new("Nothing shown yet")
                .size(12.0)
                .color(colors.text_muted)
        );
    } else {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for quote in &view_state.history {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(&quote.text).size(13.0));
                    ui.label(
                        RichText::new(format!("— {}", quote.author_or_unknown()))
                            .size(12.0)
                            .italics()
                            .color(colors.text_muted)
                    );
                });
                ui.add_space(4.0);
            }
        });
    }

    action
}

fn render_quote(ui: &mut egui::Ui, quote: &Quote, colors: &ThemeColors) {
    ui.label(
        RichText::new(&quote.text)
            .size(20.0)
            .color(colors.text_primary)
    );
    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("— {}", quote.author_or_unknown()))
            .size(14.0)
            .italics()
            .color(colors.text_secondary)
    );
}
