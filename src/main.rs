mod api;
mod audio;
mod capture;
mod config;
mod gui;
mod language;
mod session;

use tracing_subscriber::EnvFilter;

// Window dimensions - two input columns plus the output strip.
pub const WINDOW_WIDTH: f32 = 1080.0;
pub const WINDOW_HEIGHT: f32 = 680.0;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load_config();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "PolyPrompt",
        options,
        Box::new(move |cc| {
            gui::theme::apply_theme(&cc.egui_ctx, &config.theme_mode);
            Ok(Box::new(gui::StudioApp::new(config)))
        }),
    )
}
