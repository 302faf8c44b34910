//! Dashboard theme and styling
//!
//! Light and dark palettes applied to egui visuals.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

use crate::config::ThemeMode;

/// Color palette for one theme mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    // Background colors
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,
    pub bg_hover: Color32,

    // Accent colors
    pub accent_primary: Color32,
    pub accent_success: Color32,
    pub accent_warning: Color32,
    pub accent_error: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    pub border: Color32,
}

impl ThemeColors {
    pub const DARK: ThemeColors = ThemeColors {
        bg_dark: Color32::from_rgb(18, 18, 24),
        bg_medium: Color32::from_rgb(28, 28, 36),
        bg_light: Color32::from_rgb(38, 38, 48),
        bg_hover: Color32::from_rgb(48, 48, 60),
        accent_primary: Color32::from_rgb(88, 166, 255),
        accent_success: Color32::from_rgb(46, 204, 113),
        accent_warning: Color32::from_rgb(255, 193, 7),
        accent_error: Color32::from_rgb(231, 76, 60),
        text_primary: Color32::from_rgb(240, 240, 245),
        text_secondary: Color32::from_rgb(160, 160, 175),
        text_muted: Color32::from_rgb(100, 100, 115),
        border: Color32::from_rgb(50, 50, 65),
    };

    pub const LIGHT: ThemeColors = ThemeColors {
        bg_dark: Color32::from_rgb(236, 238, 243),
        bg_medium: Color32::from_rgb(248, 249, 252),
        bg_light: Color32::from_rgb(226, 229, 236),
        bg_hover: Color32::from_rgb(214, 219, 229),
        accent_primary: Color32::from_rgb(37, 99, 235),
        accent_success: Color32::from_rgb(22, 163, 74),
        accent_warning: Color32::from_rgb(202, 138, 4),
        accent_error: Color32::from_rgb(220, 38, 38),
        text_primary: Color32::from_rgb(24, 24, 32),
        text_secondary: Color32::from_rgb(75, 80, 95),
        text_muted: Color32::from_rgb(130, 135, 150),
        border: Color32::from_rgb(200, 204, 214),
    };

    /// Palette for a theme mode
    pub fn for_mode(mode: ThemeMode) -> &'static ThemeColors {
        match mode {
            ThemeMode::Light => &Self::LIGHT,
            ThemeMode::Dark => &Self::DARK,
        }
    }
}

/// Apply the theme for `mode` to egui
pub fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    let colors = ThemeColors::for_mode(mode);
    let mut style = (*ctx.style()).clone();

    let mut visuals = match mode {
        ThemeMode::Light => Visuals::light(),
        ThemeMode::Dark => Visuals::dark(),
    };

    // Window and panel backgrounds
    visuals.window_fill = colors.bg_medium;
    visuals.panel_fill = colors.bg_dark;
    visuals.faint_bg_color = colors.bg_light;
    visuals.extreme_bg_color = colors.bg_medium;

    // Widget colors
    visuals.widgets.noninteractive.bg_fill = colors.bg_medium;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text_secondary);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = colors.bg_light;
    visuals.widgets.inactive.weak_bg_fill = colors.bg_light;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = colors.bg_hover;
    visuals.widgets.hovered.weak_bg_fill = colors.bg_hover;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = colors.accent_primary;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors.text_primary);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    // Selection and interaction
    visuals.selection.bg_fill = color_with_alpha(colors.accent_primary, 77); // ~0.3 alpha
    visuals.selection.stroke = Stroke::new(1.0, colors.accent_primary);
    visuals.hyperlink_color = colors.accent_primary;

    // Window appearance
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_shadow.blur = 8.0;
    visuals.window_stroke = Stroke::new(1.0, colors.border);

    style.visuals = visuals;

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(15.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
