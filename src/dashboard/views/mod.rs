//! Dashboard views

pub mod quotes;
pub mod settings;
pub mod today;

pub use quotes::render_quotes_view;
pub use settings::render_settings_view;
pub use today::render_today_view;
