//! Settings popup: API key, theme, model ids.

use crate::config::{save_config, Config, ThemeMode};
use eframe::egui;

/// Render the settings window. Returns true when the user saved.
pub(crate) fn show_window(
    ctx: &egui::Context,
    open: &mut bool,
    config: &mut Config,
    show_api_key: &mut bool,
) -> bool {
    let mut saved = false;

    egui::Window::new("Settings")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Gemini API key");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut config.gemini_api_key)
                        .password(!*show_api_key)
                        .desired_width(280.0),
                );
                let toggle = if *show_api_key { "Hide" } else { "Show" };
                if ui.button(toggle).clicked() {
                    *show_api_key = !*show_api_key;
                }
            });
            ui.label(
                egui::RichText::new(
                    "GEMINI_API_KEY / GOOGLE_API_KEY from the environment override this field.",
                )
                .weak(),
            );

            ui.add_space(8.0);
            ui.label("Theme");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut config.theme_mode, ThemeMode::System, "System");
                ui.selectable_value(&mut config.theme_mode, ThemeMode::Dark, "Dark");
                ui.selectable_value(&mut config.theme_mode, ThemeMode::Light, "Light");
            });

            ui.add_space(8.0);
            ui.label("Models");
            egui::Grid::new("model_grid").num_columns(2).show(ui, |ui| {
                ui.label("Generation");
                ui.text_edit_singleline(&mut config.generation_model);
                ui.end_row();
                ui.label("Transcription");
                ui.text_edit_singleline(&mut config.transcription_model);
                ui.end_row();
                ui.label("Speech synthesis");
                ui.text_edit_singleline(&mut config.tts_model);
                ui.end_row();
                ui.label("Voice");
                ui.text_edit_singleline(&mut config.tts_voice);
                ui.end_row();
            });

            ui.add_space(10.0);
            if ui.button("Save").clicked() {
                save_config(config);
                saved = true;
            }
        });

    saved
}
