//! Dashboard application entry point

use chrono::NaiveDate;
use eframe::egui;
use egui::RichText;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::{self, AppConfig, ThemeMode};
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{
    DashboardAction, DashboardState, DashboardView, Notice, NoticeKind, QuoteEditor, QuoteSource,
};
use crate::dashboard::theme::{self, ThemeColors};
use crate::dashboard::views::{render_quotes_view, render_settings_view, render_today_view};
use crate::storage::transfer::{export_csv, import_csv};
use crate::storage::{QuoteStore, StoreError};

/// The main dashboard application
pub struct DashboardApp {
    /// Quote persistence
    store: QuoteStore,
    /// Application configuration
    config: AppConfig,
    /// Where settings are saved, if a config directory is available
    config_path: Option<PathBuf>,
    /// Dashboard-specific state
    state: DashboardState,
    /// Theme currently applied to the egui context
    applied_theme: Option<ThemeMode>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(store: QuoteStore, config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            store,
            config,
            config_path,
            state: DashboardState::default(),
            applied_theme: None,
        };
        app.refresh_list();
        app.show_daily(today());
        app
    }

    /// Create eframe options for the dashboard window
    pub fn options(config: &AppConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.appearance.window_width, config.appearance.window_height])
                .with_min_inner_size([720.0, 480.0])
                .with_title("Daily Quotes"),
            ..Default::default()
        }
    }

    /// Apply a user action to the store and refresh the affected state
    pub fn handle_action(&mut self, action: DashboardAction) {
        debug!("Handling action {:?}", action);

        match action {
            DashboardAction::ShowDaily => self.show_daily(today()),
            DashboardAction::ShowRandom => self.show_random(),
            DashboardAction::Search => self.refresh_list(),
            DashboardAction::ShowAll => {
                self.state.quotes.search_query.clear();
                self.refresh_list();
            }
            DashboardAction::BeginAdd => {
                self.state.quotes.editor = Some(QuoteEditor::default());
            }
            DashboardAction::BeginEdit(id) => self.begin_edit(id),
            DashboardAction::SaveEditor => self.save_editor(),
            DashboardAction::ConfirmDelete => self.delete_selected(),
            DashboardAction::Export => self.export(),
            DashboardAction::Import => self.import(),
            DashboardAction::SetTheme(mode) => {
                info!("Theme set to {}", mode.name());
                self.config.appearance.theme = mode;
                self.state.settings.dirty = true;
            }
            DashboardAction::SaveSettings => self.save_settings(),
            DashboardAction::DismissNotice => self.state.notice = None,
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.state.notice = Some(notice);
    }

    fn report_error(&mut self, context: &str, err: impl Display) {
        error!("{}: {}", context, err);
        self.notify(Notice::error("Error", format!("{}: {}", context, err)));
    }

    /// Re-query the quote list for the current search and the stored count
    fn refresh_list(&mut self) {
        let term = self.state.quotes.search_query.trim().to_string();

        match self.store.search(&term) {
            Ok(quotes) => {
                let selected = self.state.quotes.selected_id;
                if !quotes.iter().any(|q| Some(q.id) == selected) {
                    self.state.quotes.selected_id = None;
                }
                self.state.quotes.quotes = quotes;
            }
            Err(e) => self.report_error("Failed to load quotes", e),
        }

        match self.store.count() {
            Ok(count) => self.state.today.total_quotes = count,
            Err(e) => self.report_error("Failed to count quotes", e),
        }
    }

    fn show_daily(&mut self, date: NaiveDate) {
        match self.store.pick_daily(date) {
            Ok(quote) => {
                let history_len = self.config.display.history_len;
                self.state.today.show(quote, QuoteSource::Daily, history_len);
            }
            Err(e) => self.report_error("Failed to load the quote of the day", e),
        }
    }

    fn show_random(&mut self) {
        match self.store.pick_random() {
            Ok(Some(quote)) => {
                let history_len = self.config.display.history_len;
                self.state.today.show(Some(quote), QuoteSource::Random, history_len);
            }
            Ok(None) => self.notify(Notice::info("Empty", "There are no quotes in the database.")),
            Err(e) => self.report_error("Failed to pick a random quote", e),
        }
    }

    fn begin_edit(&mut self, id: i64) {
        match self.store.get(id) {
            Ok(Some(quote)) => {
                self.state.quotes.editor = Some(QuoteEditor {
                    id: Some(quote.id),
                    text: quote.text,
                    author: quote.author.unwrap_or_default(),
                });
            }
            Ok(None) => {
                self.notify(Notice::error("Error", "Quote not found in the database."));
                self.refresh_list();
            }
            Err(e) => self.report_error("Failed to load quote", e),
        }
    }

    fn save_editor(&mut self) {
        let Some(editor) = self.state.quotes.editor.clone() else {
            return;
        };

        let result = match editor.id {
            None => self.store.insert(&editor.text, &editor.author).map(Some),
            Some(id) => self.store.update(id, &editor.text, &editor.author).map(|_| None),
        };

        match result {
            Ok(new_id) => {
                self.state.quotes.editor = None;
                if let Some(id) = new_id {
                    self.state.quotes.selected_id = Some(id);
                }
                if let Some(id) = editor.id {
                    self.reload_displayed(id);
                }
                self.refresh_list();
                let message = if editor.id.is_some() {
                    "Quote updated."
                } else {
                    "Quote added successfully."
                };
                self.notify(Notice::info("OK", message));
            }
            Err(StoreError::Validation) => {
                self.notify(Notice::warning("Invalid", "The quote text cannot be empty."));
            }
            Err(e @ StoreError::NotFound(_)) => {
                self.state.quotes.editor = None;
                self.refresh_list();
                self.report_error("Failed to update quote", e);
            }
            Err(e) => self.report_error("Failed to save quote", e),
        }
    }

    /// Pick up edits to the quote on display
    fn reload_displayed(&mut self, id: i64) {
        if self.state.today.displayed.as_ref().map(|q| q.id) != Some(id) {
            return;
        }
        match self.store.get(id) {
            Ok(quote) => self.state.today.displayed = quote,
            Err(e) => self.report_error("Failed to reload quote", e),
        }
    }

    fn delete_selected(&mut self) {
        self.state.quotes.show_delete_confirm = false;
        let Some(id) = self.state.quotes.selected_id.take() else {
            self.notify(Notice::warning("Selection", "Select a quote to delete."));
            return;
        };

        match self.store.delete(id) {
            Ok(_) => {
                self.state.today.forget(id);
                self.refresh_list();
                if self.state.today.displayed.is_none() {
                    self.show_daily(today());
                }
                self.notify(Notice::info("OK", "Quote deleted."));
            }
            Err(e) => self.report_error("Failed to delete quote", e),
        }
    }

    fn transfer_path(&self) -> Option<PathBuf> {
        let path = self.state.quotes.transfer_path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    fn export(&mut self) {
        let Some(path) = self.transfer_path() else {
            self.notify(Notice::warning("Export", "Enter a file path first."));
            return;
        };

        match export_csv(&self.store, &path) {
            Ok(count) => self.notify(Notice::info(
                "Exported",
                format!("Exported {} quotes to {}", count, path.display()),
            )),
            Err(e) => self.report_error("Export failed", e),
        }
    }

    fn import(&mut self) {
        let Some(path) = self.transfer_path() else {
            self.notify(Notice::warning("Import", "Enter a file path first."));
            return;
        };

        match import_csv(&self.store, &path) {
            Ok(summary) => {
                self.refresh_list();
                let mut message = format!("Imported {} quotes from {}", summary.imported, path.display());
                if summary.skipped > 0 {
                    message.push_str(&format!(" ({} empty rows skipped)", summary.skipped));
                }
                self.notify(Notice::info("Imported", message));
            }
            Err(e) => {
                // Rows before the failure are already stored
                self.refresh_list();
                self.report_error("Import failed", e);
            }
        }
    }

    fn save_settings(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.notify(Notice::warning("Settings", "No configuration directory is available."));
            return;
        };

        match config::save_config(&self.config, &path) {
            Ok(()) => {
                info!("Saved configuration to {:?}", path);
                self.state.settings.dirty = false;
                self.notify(Notice::info("Settings", "Settings saved."));
            }
            Err(e) => self.report_error("Failed to save settings", e),
        }
    }

    /// Render the notice window; returns the dismiss action when closed
    fn render_notice(&self, ctx: &egui::Context, colors: &ThemeColors) -> Option<DashboardAction> {
        let notice = self.state.notice.as_ref()?;
        let mut action = None;

        let accent = match notice.kind {
            NoticeKind::Info => colors.accent_success,
            NoticeKind::Warning => colors.accent_warning,
            NoticeKind::Error => colors.accent_error,
        };

        egui::Window::new(RichText::new(&notice.title).color(accent))
            .id(egui::Id::new("notice_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.label(&notice.message);
                ui.add_space(16.0);
                if ui.button("OK").clicked() {
                    action = Some(DashboardAction::DismissNotice);
                }
            });

        action
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mode = self.config.appearance.theme;
        if self.applied_theme != Some(mode) {
            theme::apply_theme(ctx, mode);
            self.applied_theme = Some(mode);
        }
        let colors = ThemeColors::for_mode(mode);
        let blocked = self.state.notice.is_some();

        // Sidebar panel
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    render_sidebar(ui, &mut self.state.current_view, colors);
                });
            });

        let database_path = self.store.path().display().to_string();
        let preview_chars = self.config.display.list_preview_chars;

        // Main content panel
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::Frame::none()
                    .inner_margin(24.0)
                    .show(ui, |ui| {
                        ui.add_enabled_ui(!blocked, |ui| match self.state.current_view {
                            DashboardView::Today => {
                                render_today_view(ui, &self.state.today, mode, colors)
                            }
                            DashboardView::Quotes => render_quotes_view(
                                ui,
                                &mut self.state.quotes,
                                preview_chars,
                                colors,
                            ),
                            DashboardView::Settings => render_settings_view(
                                ui,
                                &mut self.state.settings,
                                &mut self.config,
                                &database_path,
                                colors,
                            ),
                        })
                        .inner
                    })
                    .inner
            })
            .inner;

        let notice_action = self.render_notice(ctx, colors);

        if let Some(action) = notice_action.or(action) {
            self.handle_action(action);
        }
    }
}

/// Run the dashboard application
pub fn run_dashboard(
    store: QuoteStore,
    config: AppConfig,
    config_path: Option<PathBuf>,
) -> Result<(), eframe::Error> {
    let options = DashboardApp::options(&config);
    let app = DashboardApp::new(store, config, config_path);
    eframe::run_native(
        "Daily Quotes",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> DashboardApp {
        let store = QuoteStore::new(dir.path().join("quotes.db"));
        store.initialize().unwrap();
        DashboardApp::new(
            store,
            AppConfig::default(),
            Some(dir.path().join("config.toml")),
        )
    }

    fn notice_kind(app: &DashboardApp) -> Option<NoticeKind> {
        app.state.notice.as_ref().map(|n| n.kind)
    }

    #[test]
    fn test_new_loads_list_and_daily_quote() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        assert_eq!(app.state.quotes.quotes.len(), 5);
        assert_eq!(app.state.today.total_quotes, 5);
        assert!(app.state.today.displayed.is_some());
        assert_eq!(app.state.today.source, QuoteSource::Daily);
        assert!(app.state.notice.is_none());
    }

    #[test]
    fn test_show_daily_matches_store() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        app.show_daily(date);

        let expected = app.store.pick_daily(date).unwrap();
        assert_eq!(app.state.today.displayed, expected);
    }

    #[test]
    fn test_add_quote() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::BeginAdd);
        let editor = app.state.quotes.editor.as_mut().unwrap();
        editor.text = "  Keep going.  ".to_string();
        editor.author = "Anon".to_string();
        app.handle_action(DashboardAction::SaveEditor);

        assert!(app.state.quotes.editor.is_none());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
        assert_eq!(app.state.quotes.quotes.len(), 6);
        assert_eq!(app.state.quotes.selected_id, Some(6));
        assert_eq!(app.state.quotes.quotes[5].text, "Keep going.");
    }

    #[test]
    fn test_add_empty_quote_warns_and_keeps_editor() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::BeginAdd);
        app.handle_action(DashboardAction::SaveEditor);

        assert_eq!(notice_kind(&app), Some(NoticeKind::Warning));
        assert!(app.state.quotes.editor.is_some());
        assert_eq!(app.store.count().unwrap(), 5);
    }

    #[test]
    fn test_edit_quote() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::BeginEdit(2));
        let editor = app.state.quotes.editor.as_mut().unwrap();
        assert_eq!(editor.id, Some(2));
        assert_eq!(editor.author, "Theodore Roosevelt");
        editor.text = "Edited".to_string();
        app.handle_action(DashboardAction::SaveEditor);

        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
        assert_eq!(app.store.get(2).unwrap().unwrap().text, "Edited");
    }

    #[test]
    fn test_edit_displayed_quote_refreshes_display() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let id = app.state.today.displayed.as_ref().unwrap().id;

        app.handle_action(DashboardAction::BeginEdit(id));
        app.state.quotes.editor.as_mut().unwrap().text = "Fresh text".to_string();
        app.handle_action(DashboardAction::SaveEditor);

        assert_eq!(app.state.today.displayed.as_ref().unwrap().text, "Fresh text");
    }

    #[test]
    fn test_edit_missing_quote() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::BeginEdit(99));

        assert!(app.state.quotes.editor.is_none());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Error));
    }

    #[test]
    fn test_save_edit_of_deleted_quote() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::BeginEdit(1));
        app.store.delete(1).unwrap();
        app.handle_action(DashboardAction::SaveEditor);

        assert!(app.state.quotes.editor.is_none());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Error));
        assert_eq!(app.state.quotes.quotes.len(), 4);
    }

    #[test]
    fn test_delete_selected() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.state.quotes.selected_id = Some(3);
        app.state.quotes.show_delete_confirm = true;
        app.handle_action(DashboardAction::ConfirmDelete);

        assert!(!app.state.quotes.show_delete_confirm);
        assert!(app.state.quotes.selected_id.is_none());
        assert!(app.store.get(3).unwrap().is_none());
        assert_eq!(app.state.today.total_quotes, 4);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
    }

    #[test]
    fn test_delete_displayed_quote_picks_another() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let shown = app.state.today.displayed.as_ref().unwrap().id;

        app.state.quotes.selected_id = Some(shown);
        app.handle_action(DashboardAction::ConfirmDelete);

        let displayed = app.state.today.displayed.as_ref().unwrap();
        assert_ne!(displayed.id, shown);
        assert_eq!(app.state.today.source, QuoteSource::Daily);
        assert!(app.state.today.history.iter().all(|q| q.id != shown));
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
    }

    #[test]
    fn test_delete_last_quote_clears_display() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        for id in 1..=5 {
            app.state.quotes.selected_id = Some(id);
            app.handle_action(DashboardAction::ConfirmDelete);
        }

        assert_eq!(app.state.today.total_quotes, 0);
        assert!(app.state.today.displayed.is_none());
    }

    #[test]
    fn test_delete_without_selection_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::ConfirmDelete);

        assert_eq!(notice_kind(&app), Some(NoticeKind::Warning));
        assert_eq!(app.store.count().unwrap(), 5);
    }

    #[test]
    fn test_search_and_show_all() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.store.insert("Keep going.", "Anon").unwrap();

        app.state.quotes.search_query = " Keep ".to_string();
        app.handle_action(DashboardAction::Search);
        assert_eq!(app.state.quotes.quotes.len(), 1);
        assert_eq!(app.state.quotes.quotes[0].id, 6);

        app.handle_action(DashboardAction::ShowAll);
        assert!(app.state.quotes.search_query.is_empty());
        assert_eq!(app.state.quotes.quotes.len(), 6);
    }

    #[test]
    fn test_search_clears_hidden_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.state.quotes.selected_id = Some(1);
        app.state.quotes.search_query = "no such quote".to_string();
        app.handle_action(DashboardAction::Search);

        assert!(app.state.quotes.quotes.is_empty());
        assert!(app.state.quotes.selected_id.is_none());
    }

    #[test]
    fn test_random_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.db")).with_seed_samples(false);
        store.initialize().unwrap();
        let mut app = DashboardApp::new(store, AppConfig::default(), None);

        assert!(app.state.today.displayed.is_none());
        app.handle_action(DashboardAction::ShowRandom);

        assert!(app.state.today.displayed.is_none());
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
    }

    #[test]
    fn test_random_records_history() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::ShowRandom);

        assert_eq!(app.state.today.source, QuoteSource::Random);
        assert!(!app.state.today.history.is_empty());
    }

    #[test]
    fn test_export_and_import_actions() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let csv = dir.path().join("quotes.csv");

        app.state.quotes.transfer_path = csv.display().to_string();
        app.handle_action(DashboardAction::Export);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
        assert!(csv.exists());

        app.handle_action(DashboardAction::DismissNotice);
        app.handle_action(DashboardAction::Import);
        assert_eq!(notice_kind(&app), Some(NoticeKind::Info));
        assert_eq!(app.state.quotes.quotes.len(), 10);
    }

    #[test]
    fn test_import_missing_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.state.quotes.transfer_path = dir.path().join("missing.csv").display().to_string();
        app.handle_action(DashboardAction::Import);

        assert_eq!(notice_kind(&app), Some(NoticeKind::Error));
        assert_eq!(app.store.count().unwrap(), 5);
    }

    #[test]
    fn test_export_without_path_warns() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::Export);

        assert_eq!(notice_kind(&app), Some(NoticeKind::Warning));
    }

    #[test]
    fn test_theme_change_and_save() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::SetTheme(ThemeMode::Light));
        assert!(app.state.settings.dirty);

        app.handle_action(DashboardAction::SaveSettings);
        assert!(!app.state.settings.dirty);

        let saved = config::load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.appearance.theme, ThemeMode::Light);
    }

    #[test]
    fn test_dismiss_notice() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_action(DashboardAction::ConfirmDelete);
        assert!(app.state.notice.is_some());

        app.handle_action(DashboardAction::DismissNotice);
        assert!(app.state.notice.is_none());
    }
}
