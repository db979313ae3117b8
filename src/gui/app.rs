//! The main window: input collection, the interaction cycle, output rendering.
//!
//! The UI thread owns every piece of session state. Capture and generation
//! run on worker threads and report back over an mpsc channel drained at the
//! top of each frame, so the interface keeps painting while a request is out.

use crate::api::generate::ImagePart;
use crate::api::tts::AudioClip;
use crate::api::{self, ApiError};
use crate::audio::playback;
use crate::capture::{self, CaptureOutcome};
use crate::config::{save_config, Config, ThemeMode};
use crate::gui::{settings, theme};
use crate::language::OutputLanguage;
use crate::session::{AssembledPrompt, SessionState, EMPTY_INPUT_PLACEHOLDER};
use eframe::egui;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Result of one generation worker round-trip.
struct GenerationResult {
    response: Result<String, ApiError>,
    /// None when generation failed or short-circuited to the placeholder.
    audio: Option<Result<AudioClip, ApiError>>,
}

enum WorkerEvent {
    Capture(CaptureOutcome),
    Generation(Box<GenerationResult>),
}

#[derive(PartialEq)]
enum Phase {
    Idle,
    Generating,
}

struct AttachedImage {
    /// Original encoded bytes; these go to the service, the texture is only
    /// for the preview.
    bytes: Vec<u8>,
    texture: egui::TextureHandle,
    name: String,
}

pub struct StudioApp {
    config: Config,
    session: SessionState,

    // Live controls, re-read on every cycle.
    typed_text: String,
    language: OutputLanguage,
    attached_image: Option<AttachedImage>,
    image_path_field: String,

    // Interaction cycle.
    phase: Phase,
    capturing: bool,
    worker_tx: Sender<WorkerEvent>,
    worker_rx: Receiver<WorkerEvent>,
    warning: Option<String>,
    generation_error: Option<String>,

    // Playback.
    playing: Arc<AtomicBool>,

    // Settings popup.
    show_settings: bool,
    show_api_key: bool,
    applied_theme: Option<ThemeMode>,
}

impl StudioApp {
    pub fn new(config: Config) -> Self {
        let (worker_tx, worker_rx) = channel();
        let language = config.output_language;
        StudioApp {
            config,
            session: SessionState::new(),
            typed_text: String::new(),
            language,
            attached_image: None,
            image_path_field: String::new(),
            phase: Phase::Idle,
            capturing: false,
            worker_tx,
            worker_rx,
            warning: None,
            generation_error: None,
            playing: Arc::new(AtomicBool::new(false)),
            show_settings: false,
            show_api_key: false,
            applied_theme: None,
        }
    }

    // ------------------------------------------------------------------
    // Worker plumbing
    // ------------------------------------------------------------------

    fn poll_workers(&mut self) {
        while let Ok(event) = self.worker_rx.try_recv() {
            match event {
                WorkerEvent::Capture(outcome) => {
                    self.capturing = false;
                    match outcome {
                        CaptureOutcome::Transcribed(text) => {
                            info!(chars = text.len(), "utterance transcribed");
                            self.session.append_utterance(&text);
                        }
                        CaptureOutcome::Failed(err) => {
                            warn!("speech capture failed: {err}");
                            self.warning = Some(format!("Speech capture failed: {err}"));
                        }
                    }
                }
                WorkerEvent::Generation(result) => {
                    self.phase = Phase::Idle;
                    match result.response {
                        Ok(text) => {
                            self.generation_error = None;
                            self.session.last_response = Some(text);
                            match result.audio {
                                Some(Ok(clip)) => self.session.last_audio = Some(clip),
                                Some(Err(err)) => {
                                    warn!("speech synthesis failed: {err}");
                                    self.warning =
                                        Some(format!("Speech synthesis failed: {err}"));
                                }
                                None => {}
                            }
                        }
                        Err(err) => {
                            warn!("generation failed: {err}");
                            self.generation_error = Some(err.to_string());
                        }
                    }
                }
            }
        }
    }

    fn start_capture(&mut self, ctx: &egui::Context) {
        if self.capturing {
            return;
        }
        self.capturing = true;
        self.warning = None;

        let api_key = self.config.gemini_api_key.clone();
        let model = self.config.transcription_model.clone();
        let tx = self.worker_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = capture::capture_once(&api_key, &model);
            let _ = tx.send(WorkerEvent::Capture(outcome));
            ctx.request_repaint();
        });
    }

    fn start_generation(&mut self, ctx: &egui::Context) {
        if self.phase == Phase::Generating {
            return;
        }

        // The prompt is rebuilt from the live controls on every cycle;
        // nothing assembled here survives past the worker round-trip.
        let prompt = AssembledPrompt::assemble(
            &self.typed_text,
            self.language,
            &self.session.spoken_text_buffer,
        );
        if prompt.is_blank() && self.attached_image.is_none() {
            self.warning =
                Some("Please enter text or speak before generating a response.".to_string());
            return;
        }

        self.warning = None;
        self.generation_error = None;
        self.phase = Phase::Generating;

        let api_key = self.config.gemini_api_key.clone();
        let model = self.config.generation_model.clone();
        let tts_model = self.config.tts_model.clone();
        let tts_voice = self.config.tts_voice.clone();
        let image = self
            .attached_image
            .as_ref()
            .map(|a| ImagePart::new(a.bytes.clone()));
        let tx = self.worker_tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let response = api::generate::respond(&api_key, &model, &prompt, image.as_ref());
            let audio = match &response {
                Ok(text) if text != EMPTY_INPUT_PLACEHOLDER => {
                    Some(api::tts::synthesize(&api_key, &tts_model, &tts_voice, text))
                }
                _ => None,
            };
            let _ = tx.send(WorkerEvent::Generation(Box::new(GenerationResult {
                response,
                audio,
            })));
            ctx.request_repaint();
        });
    }

    fn play_last_audio(&mut self) {
        let Some(clip) = &self.session.last_audio else {
            return;
        };
        if self.playing.swap(true, Ordering::SeqCst) {
            return;
        }
        let clip = clip.clone();
        let playing = self.playing.clone();
        std::thread::spawn(move || {
            playback::play_clip(&clip);
            playing.store(false, Ordering::SeqCst);
        });
    }

    // ------------------------------------------------------------------
    // Attachments
    // ------------------------------------------------------------------

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.attach_image_from_path(&path, ctx);
            } else if let Some(bytes) = file.bytes {
                let name = file.name.clone();
                self.attach_image_bytes(bytes.to_vec(), name, ctx);
            }
        }
    }

    fn attach_image_from_path(&mut self, path: &Path, ctx: &egui::Context) {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.attach_image_bytes(bytes, name, ctx);
            }
            Err(e) => {
                self.warning = Some(format!("Could not read {}: {e}", path.display()));
            }
        }
    }

    fn attach_image_bytes(&mut self, bytes: Vec<u8>, name: String, ctx: &egui::Context) {
        match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                let texture =
                    ctx.load_texture("attached-image", color_image, egui::TextureOptions::LINEAR);
                self.attached_image = Some(AttachedImage {
                    bytes,
                    texture,
                    name,
                });
                self.warning = None;
            }
            Err(e) => {
                self.warning = Some(format!("Could not decode image: {e}"));
            }
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn sync_theme(&mut self, ctx: &egui::Context) {
        if self.applied_theme.as_ref() != Some(&self.config.theme_mode) {
            theme::apply_theme(ctx, &self.config.theme_mode);
            self.applied_theme = Some(self.config.theme_mode.clone());
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("PolyPrompt");
                ui.label(egui::RichText::new("text · speech · image").weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
            });
        });
    }

    fn render_input_column(&mut self, ui: &mut egui::Ui) {
        ui.heading("Prompt");
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::multiline(&mut self.typed_text)
                .hint_text("Type your prompt here...")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        ui.heading("Speech to text");
        ui.horizontal(|ui| {
            let listen =
                ui.add_enabled(!self.capturing, egui::Button::new("🎤 Start speaking"));
            if listen.clicked() {
                self.start_capture(ui.ctx());
            }
            if self.capturing {
                ui.spinner();
                ui.label("Listening...");
            } else if !self.session.spoken_text_buffer.is_empty()
                && ui.button("Clear transcript").clicked()
            {
                self.session.clear_transcript();
            }
        });

        ui.add_space(4.0);
        let mut transcript = self.session.spoken_text_buffer.trim_start().to_string();
        ui.add_enabled(
            false,
            egui::TextEdit::multiline(&mut transcript)
                .hint_text("Recognized speech appears here")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        ui.heading("Output language");
        egui::ComboBox::from_id_salt("output_language")
            .selected_text(self.language.name())
            .show_ui(ui, |ui| {
                for lang in OutputLanguage::ALL {
                    ui.selectable_value(&mut self.language, lang, lang.name());
                }
            });
    }

    fn render_image_column(&mut self, ui: &mut egui::Ui) {
        ui.heading("Image");
        ui.add_space(4.0);
        ui.label("Drop an image onto the window, or load one from a path:");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.image_path_field)
                    .hint_text("/path/to/image.png")
                    .desired_width(260.0),
            );
            if ui.button("Load").clicked() {
                let path = std::path::PathBuf::from(self.image_path_field.trim());
                self.attach_image_from_path(&path, ui.ctx());
            }
        });

        let mut remove = false;
        if let Some(image) = &self.attached_image {
            ui.add_space(6.0);
            ui.add(egui::Image::new(&image.texture).max_size(egui::vec2(420.0, 300.0)));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&image.name).weak());
                if ui.button("Remove").clicked() {
                    remove = true;
                }
            });
        }
        if remove {
            self.attached_image = None;
        }
    }

    fn render_output_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let generating = self.phase == Phase::Generating;
            let generate =
                ui.add_enabled(!generating, egui::Button::new("➤ Generate response"));
            if generate.clicked() {
                self.start_generation(ui.ctx());
            }
            if generating {
                ui.spinner();
                ui.label("Generating response...");
            }
        });

        if let Some(warning) = &self.warning {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().warn_fg_color, warning);
        }

        let mut retry = false;
        if let Some(error) = &self.generation_error {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.colored_label(ui.visuals().error_fg_color, error);
                if ui.button("Retry").clicked() {
                    retry = true;
                }
            });
        }
        if retry {
            self.start_generation(ui.ctx());
        }

        if let Some(response) = &self.session.last_response {
            ui.add_space(8.0);
            ui.heading("Response");
            egui::ScrollArea::vertical()
                .max_height(180.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.label(response);
                });
        }

        let duration = self
            .session
            .last_audio
            .as_ref()
            .map(|clip| clip.duration_secs());
        if let Some(duration) = duration {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let playing = self.playing.load(Ordering::SeqCst);
                let play =
                    ui.add_enabled(!playing, egui::Button::new("▶ Play response audio"));
                if play.clicked() {
                    self.play_last_audio();
                }
                if playing {
                    ui.spinner();
                    ui.label("Playing...");
                } else {
                    ui.label(format!("{duration:.1}s"));
                }
            });
        }
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = self.show_settings;
        let saved =
            settings::show_window(ctx, &mut open, &mut self.config, &mut self.show_api_key);
        self.show_settings = open;
        if saved {
            // Re-resolve the theme on the next frame.
            self.applied_theme = None;
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_theme(ctx);
        self.poll_workers();
        self.handle_dropped_files(ctx);

        self.render_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.render_input_column(&mut columns[0]);
                self.render_image_column(&mut columns[1]);
            });
            ui.add_space(8.0);
            ui.separator();
            self.render_output_section(ui);
        });

        self.render_settings(ctx);

        if self.capturing || self.phase == Phase::Generating || self.playing.load(Ordering::SeqCst)
        {
            // Keep the busy indicators moving while a worker is out.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.output_language = self.language;
        save_config(&self.config);
    }
}
