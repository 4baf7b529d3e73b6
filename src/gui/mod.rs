//! GUI module for the application.
//!
//! Provides a graphical interface using egui/eframe: plan upload, analysis
//! results and the assistant chat.

pub mod render;
pub mod state;

use std::path::PathBuf;

use eframe::egui::{self, TextureHandle, Vec2};

use crate::analysis::export::export_points_to_json;
use crate::config::get_config;
use crate::ocr::Tesseract;
use crate::session::AnalysisOutcome;
use crate::upload::UploadedFile;

use state::{GuiState, StatusBanner};

/// Main GUI application struct.
pub struct GuiApp {
    /// Application state.
    state: GuiState,
    /// Preview of the uploaded plan (PNG/JPEG only).
    preview: Option<TextureHandle>,
}

impl GuiApp {
    /// Create a new GUI application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: GuiState::default(),
            preview: None,
        }
    }

    /// Put a new plan into the session and refresh the preview.
    fn accept_upload(&mut self, ctx: &egui::Context, file: UploadedFile) {
        self.preview = None;
        if file.kind.is_image() {
            match image::load_from_memory(&file.bytes) {
                Ok(image) => {
                    let rgba = image.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let pixels = rgba.into_raw();
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                    self.preview = Some(ctx.load_texture(
                        "plan_preview",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                Err(e) => {
                    crate::log(&format!("GUI: Could not build preview for {}: {}", file.name, e));
                }
            }
        }

        self.state.status = StatusBanner::Info(format!("Plano cargado: {}", file.name));
        self.state.session.upload(file);
    }

    /// Handle load button click.
    fn handle_load_path(&mut self, ctx: &egui::Context) {
        let input = self.state.path_input.trim().trim_matches('"').to_string();
        if input.is_empty() {
            return;
        }

        match UploadedFile::from_path(&PathBuf::from(&input)) {
            Ok(file) => self.accept_upload(ctx, file),
            Err(e) => {
                crate::log(&format!("GUI: Failed to load {}: {}", input, e));
                self.state.status = StatusBanner::Error(e.to_string());
            }
        }
    }

    /// Accept files dropped onto the window. Only the first one is used.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(dropped) = dropped.into_iter().next() else {
            return;
        };

        let result = match (&dropped.bytes, &dropped.path) {
            (Some(bytes), _) => UploadedFile::new(dropped.name.clone(), bytes.to_vec()),
            (None, Some(path)) => {
                self.state.path_input = path.display().to_string();
                UploadedFile::from_path(path)
            }
            (None, None) => return,
        };

        match result {
            Ok(file) => self.accept_upload(ctx, file),
            Err(e) => {
                crate::log(&format!("GUI: Rejected dropped file: {}", e));
                self.state.status = StatusBanner::Error(e.to_string());
            }
        }
    }

    /// Handle remove button click.
    fn handle_remove(&mut self) {
        self.state.session.remove_file();
        self.preview = None;
        self.state.status = StatusBanner::Idle;
    }

    /// Handle analyze button click. Blocks until OCR returns.
    fn handle_analyze(&mut self) {
        let config = get_config();

        let recognizer = match Tesseract::locate(&config.ocr) {
            Ok(recognizer) => recognizer,
            Err(e) => {
                crate::log(&format!("GUI: OCR unavailable: {:#}", e));
                self.state.status = StatusBanner::Error(format!("{:#}", e));
                return;
            }
        };

        self.state.status = match self.state.session.analyze(config, &recognizer) {
            Ok(AnalysisOutcome::Detected { count }) => {
                crate::log(&format!("GUI: Analysis found {} points", count));
                StatusBanner::Success(format!("Se detectaron {} puntos importantes!", count))
            }
            Ok(AnalysisOutcome::NothingDetected) => {
                crate::log("GUI: Analysis found no points");
                StatusBanner::Warning("No se detectaron puntos importantes en el plano.".to_string())
            }
            Err(e) => {
                crate::log(&format!("GUI: Analysis failed: {:#}", e));
                StatusBanner::Error(format!("{:#}", e))
            }
        };
    }

    /// Handle save script button click.
    fn handle_save_script(&mut self) {
        let Some(analysis) = self.state.session.analysis() else {
            return;
        };
        let config = get_config();

        self.state.status = match crate::script::write_script(
            &analysis.script,
            &crate::paths::get_output_dir(),
            &config.output.script_file_name,
        ) {
            Ok(path) => StatusBanner::Info(format!("Script guardado en {}", path.display())),
            Err(e) => {
                crate::log(&format!("GUI: Failed to save script: {:#}", e));
                StatusBanner::Error(format!("{:#}", e))
            }
        };
    }

    /// Handle copy button click.
    fn handle_copy_script(&mut self, ctx: &egui::Context) {
        if let Some(analysis) = self.state.session.analysis() {
            ctx.copy_text(analysis.script.clone());
            self.state.status = StatusBanner::Info("Script copiado al portapapeles".to_string());
        }
    }

    /// Handle export button click.
    fn handle_export_points(&mut self) {
        let Some(analysis) = self.state.session.analysis() else {
            return;
        };
        let path = crate::paths::get_output_dir().join(&get_config().output.points_file_name);

        self.state.status = match export_points_to_json(&analysis.points, &path) {
            Ok(()) => {
                crate::log(&format!("GUI: Points exported: {}", path.display()));
                StatusBanner::Info(format!("Puntos exportados a {}", path.display()))
            }
            Err(e) => {
                crate::log(&format!("GUI: Failed to export points: {:#}", e));
                StatusBanner::Error(format!("{:#}", e))
            }
        };
    }

    /// Handle chat submission.
    fn handle_chat(&mut self) {
        let text = std::mem::take(&mut self.state.chat_input);
        self.state.session.submit_chat(&text);
    }

    /// Handle new session button click.
    fn handle_reset(&mut self) {
        self.state.session.reset();
        self.state.path_input.clear();
        self.state.chat_input.clear();
        self.state.status = StatusBanner::Idle;
        self.preview = None;
        crate::log("GUI: Session reset");
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🏗️ ArquitectoBot - Asistente para Planos Arquitectónicos");
                if ui.small_button("Nueva sesión").clicked() {
                    self.handle_reset();
                }
            });
            ui.add_space(16.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                // Upload section
                let (load_clicked, remove_clicked) = render::render_upload(ui, &mut self.state);
                if load_clicked {
                    self.handle_load_path(ctx);
                }
                if remove_clicked {
                    self.handle_remove();
                }

                render::render_preview(ui, self.preview.as_ref());

                // Analyze button and status
                if render::render_analyze(ui, &self.state) {
                    self.handle_analyze();
                }

                // Results section
                let (save_clicked, copy_clicked, export_clicked) =
                    match self.state.session.analysis() {
                        Some(analysis) => render::render_results(ui, analysis),
                        None => (false, false, false),
                    };
                if save_clicked {
                    self.handle_save_script();
                }
                if copy_clicked {
                    self.handle_copy_script(ctx);
                }
                if export_clicked {
                    self.handle_export_points();
                }

                // Chat section
                if render::render_chat(ui, &mut self.state) {
                    self.handle_chat();
                }
            });
        });
    }
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui() -> eframe::Result<()> {
    crate::log("GUI: Creating native options...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(800.0, 700.0))
            .with_min_inner_size(Vec2::new(500.0, 400.0))
            .with_title("ArquitectoBot")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "ArquitectoBot",
        options,
        Box::new(|cc| {
            crate::log("GUI: Creating GuiApp instance...");
            Ok(Box::new(GuiApp::new(cc)))
        }),
    )
}
