//! GUI rendering functions.
//!
//! Contains UI layout and component rendering logic.

use eframe::egui::{self, Color32, RichText, TextureHandle, Vec2};

use super::state::{GuiState, StatusBanner};
use crate::analysis::Analysis;
use crate::session::{Role, SessionPhase};

/// Render the upload field.
/// Returns (load_clicked, remove_clicked).
pub fn render_upload(ui: &mut egui::Ui, state: &mut GuiState) -> (bool, bool) {
    let mut load_clicked = false;
    let mut remove_clicked = false;

    ui.label(RichText::new("Cargar plano arquitectónico (PDF o imagen)").strong());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.path_input)
                .hint_text("Ruta del archivo (.pdf, .png, .jpg, .jpeg)")
                .desired_width(ui.available_width() - 80.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Cargar").clicked() || enter {
            load_clicked = true;
        }
    });
    ui.label(
        RichText::new("También puedes arrastrar el archivo a la ventana.")
            .small()
            .color(Color32::GRAY),
    );

    if let Some(file) = state.session.current_file() {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(format!("📄 {} ({} KB)", file.name, file.bytes.len() / 1024));
            if matches!(state.session.phase(), SessionPhase::Analyzed { .. }) {
                ui.label(RichText::new("analizado").small().color(Color32::GRAY));
            }
            if ui.small_button("✖ Quitar").clicked() {
                remove_clicked = true;
            }
        });
    }

    (load_clicked, remove_clicked)
}

/// Render the uploaded plan scaled to the panel width.
pub fn render_preview(ui: &mut egui::Ui, preview: Option<&TextureHandle>) {
    let Some(texture) = preview else {
        return;
    };

    ui.add_space(8.0);
    let [w, h] = texture.size();
    let width = ui.available_width().min(w as f32);
    let height = width * h as f32 / w.max(1) as f32;
    ui.image((texture.id(), Vec2::new(width, height)));
    ui.label(RichText::new("Plano cargado").small().color(Color32::GRAY));
}

/// Render the analyze button and the status banner.
/// Returns true when analyze was clicked.
pub fn render_analyze(ui: &mut egui::Ui, state: &GuiState) -> bool {
    let mut analyze_clicked = false;

    ui.add_space(8.0);
    ui.add_enabled_ui(state.session.current_file().is_some(), |ui| {
        if ui.button(RichText::new("🔍 Analizar plano").size(16.0)).clicked() {
            analyze_clicked = true;
        }
    });

    let color = match &state.status {
        StatusBanner::Idle => None,
        StatusBanner::Info(_) => Some(Color32::GRAY),
        StatusBanner::Success(_) => Some(Color32::from_rgb(0, 150, 0)),
        StatusBanner::Warning(_) => Some(Color32::from_rgb(200, 150, 0)),
        StatusBanner::Error(_) => Some(Color32::from_rgb(200, 0, 0)),
    };
    if let Some(color) = color {
        ui.add_space(4.0);
        ui.label(RichText::new(state.status.status_text()).color(color));
    }

    analyze_clicked
}

/// Render the detected points, the script and its actions.
/// Returns (save_clicked, copy_clicked, export_clicked).
pub fn render_results(ui: &mut egui::Ui, analysis: &Analysis) -> (bool, bool, bool) {
    let mut save_clicked = false;
    let mut copy_clicked = false;
    let mut export_clicked = false;

    if analysis.points.is_empty() {
        return (false, false, false);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    egui::Grid::new("points_table")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            ui.label(RichText::new("#").strong());
            ui.label(RichText::new("x").strong());
            ui.label(RichText::new("y").strong());
            ui.label(RichText::new("Tipo").strong());
            ui.label(RichText::new("Descripción").strong());
            ui.end_row();

            for (i, point) in analysis.points.iter().enumerate() {
                ui.label((i + 1).to_string());
                ui.label(format!("{:.1}", point.x));
                ui.label(format!("{:.1}", point.y));
                ui.label(point.kind.display_name());
                ui.label(&point.label);
                ui.end_row();
            }
        });

    if !analysis.skipped_lines.is_empty() {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "{} líneas de texto con coordenadas ilegibles fueron omitidas.",
                analysis.skipped_lines.len()
            ))
            .color(Color32::from_rgb(200, 150, 0)),
        );
    }

    ui.add_space(8.0);
    ui.heading("Código Python para Dynamo");
    let mut script = analysis.script.as_str();
    ui.add(
        egui::TextEdit::multiline(&mut script)
            .code_editor()
            .desired_width(f32::INFINITY),
    );

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui.button("💾 Descargar script Python").clicked() {
            save_clicked = true;
        }
        if ui.button("📋 Copiar").clicked() {
            copy_clicked = true;
        }
        if ui.button("📊 Exportar puntos (JSON)").clicked() {
            export_clicked = true;
        }
    });

    (save_clicked, copy_clicked, export_clicked)
}

/// Render the chat history and input.
/// Returns true when a message was submitted.
pub fn render_chat(ui: &mut egui::Ui, state: &mut GuiState) -> bool {
    let mut send_clicked = false;

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    for message in state.session.messages() {
        let color = match message.role {
            Role::User => Color32::from_rgb(0, 120, 200),
            Role::Assistant => Color32::from_rgb(0, 150, 0),
        };
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(format!("{}:", message.role.display_name())).strong().color(color));
            ui.label(&message.content);
        });
        ui.add_space(4.0);
    }

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.chat_input)
                .hint_text("Hazme preguntas sobre el plano...")
                .desired_width(ui.available_width() - 80.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Enviar").clicked() || enter {
            send_clicked = true;
        }
    });

    send_clicked
}
