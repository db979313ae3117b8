//! Visual theme resolution.

use crate::config::ThemeMode;
use eframe::egui;

/// Apply the configured theme preference. `System` defers to whatever the
/// window system reports, falling back to dark.
pub fn apply_theme(ctx: &egui::Context, mode: &ThemeMode) {
    let preference = match mode {
        ThemeMode::System => egui::ThemePreference::System,
        ThemeMode::Dark => egui::ThemePreference::Dark,
        ThemeMode::Light => egui::ThemePreference::Light,
    };
    ctx.set_theme(preference);
}
