//! Dashboard UI Module
//!
//! The quote window: today's quote, the quote library, and settings.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::run_dashboard;
