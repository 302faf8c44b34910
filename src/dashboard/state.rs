//! Dashboard view state management

use std::collections::VecDeque;

use crate::config::ThemeMode;
use crate::storage::Quote;

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Today,
    Quotes,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Today => "Today",
            DashboardView::Quotes => "Quotes",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Today => "T",
            DashboardView::Quotes => "Q",
            DashboardView::Settings => "S",
        }
    }
}

/// A user action produced by a view, applied by the app after rendering
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// Recompute the quote of the day
    ShowDaily,
    /// Show a random quote
    ShowRandom,
    /// Run the search in the quotes view
    Search,
    /// Clear the search and list everything
    ShowAll,
    /// Open the editor for a new quote
    BeginAdd,
    /// Open the editor for an existing quote
    BeginEdit(i64),
    /// Save the open editor
    SaveEditor,
    /// Delete the quote awaiting confirmation
    ConfirmDelete,
    /// Export all quotes to the transfer path
    Export,
    /// Import quotes from the transfer path
    Import,
    /// Switch theme
    SetTheme(ThemeMode),
    /// Write the configuration to disk
    SaveSettings,
    /// Dismiss the current notice
    DismissNotice,
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Blocking notification shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// How the displayed quote was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteSource {
    #[default]
    Daily,
    Random,
}

/// Overall dashboard state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Today view state
    pub today: TodayViewState,
    /// Quotes view state
    pub quotes: QuotesViewState,
    /// Settings view state
    pub settings: SettingsViewState,
    /// Notice awaiting dismissal
    pub notice: Option<Notice>,
}

/// Today view state
#[derive(Debug, Default)]
pub struct TodayViewState {
    /// Quote currently on display; `None` when the store is empty
    pub displayed: Option<Quote>,
    /// How `displayed` was chosen
    pub source: QuoteSource,
    /// Recently displayed quotes, newest first
    pub history: VecDeque<Quote>,
    /// Number of stored quotes
    pub total_quotes: usize,
}

impl TodayViewState {
    /// Display `quote`, recording it in the history
    pub fn show(&mut self, quote: Option<Quote>, source: QuoteSource, history_len: usize) {
        if let Some(q) = &quote {
            let repeat = self.history.front().map(|h| h.id == q.id).unwrap_or(false);
            if !repeat {
                self.history.push_front(q.clone());
            }
            self.history.truncate(history_len);
        }
        self.displayed = quote;
        self.source = source;
    }

    /// Drop history entries for a deleted quote
    pub fn forget(&mut self, id: i64) {
        self.history.retain(|q| q.id != id);
        if self.displayed.as_ref().map(|q| q.id) == Some(id) {
            self.displayed = None;
        }
    }
}

/// Add/edit dialog contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteEditor {
    /// Quote being edited; `None` when adding
    pub id: Option<i64>,
    pub text: String,
    pub author: String,
}

/// Quotes view state
#[derive(Debug, Default)]
pub struct QuotesViewState {
    /// Search box contents
    pub search_query: String,
    /// Quotes currently listed
    pub quotes: Vec<Quote>,
    /// Selected quote id
    pub selected_id: Option<i64>,
    /// Open add/edit dialog
    pub editor: Option<QuoteEditor>,
    /// Delete confirmation dialog open
    pub show_delete_confirm: bool,
    /// File path used by import and export
    pub transfer_path: String,
}

/// Settings view state
#[derive(Debug, Default)]
pub struct SettingsViewState {
    /// Configuration changed since the last save
    pub dirty: bool,
}
