use eframe::egui::{self, Color32, RichText, TextEdit, Ui};

use crate::state::AppState;

const FIELD_WIDTH: f32 = 64.0;

// ---------------------------------------------------------------------------
// Left side panel – selection and window controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Segment");
    ui.separator();

    if state.table.is_none() {
        ui.label("Choose a file to start (File → Open…).");
        return;
    }

    // ---- Index column selector ----
    ui.strong("Index column");
    let current_index = state.index_column.clone().unwrap_or_default();
    let mut picked_index = None;
    egui::ComboBox::from_id_salt("index_column")
        .selected_text(&current_index)
        .show_ui(ui, |ui: &mut Ui| {
            for col in state.index_choices() {
                if ui.selectable_label(current_index == *col, col).clicked() {
                    picked_index = Some(col.clone());
                }
            }
        });
    if let Some(col) = picked_index {
        state.select_index_column(&col);
    }

    // ---- Label selector ----
    ui.strong("Label");
    let current_label = state.label.clone().unwrap_or_default();
    let mut picked_label = None;
    egui::ComboBox::from_id_salt("label")
        .selected_text(&current_label)
        .show_ui(ui, |ui: &mut Ui| {
            for label in &state.label_choices {
                if ui.selectable_label(current_label == *label, label).clicked() {
                    picked_label = Some(label.clone());
                }
            }
        });
    if let Some(label) = picked_label {
        state.select_label(&label);
    }
    ui.separator();

    // ---- Window ----
    ui.strong("Window");
    match state.slider_range() {
        Some(range) => {
            let mut pos = state.slider_pos;
            let slider = egui::Slider::new(&mut pos, range).show_value(false);
            if ui.add(slider).changed() {
                if let Err(e) = state.move_slider(pos) {
                    log::debug!("slider render failed: {e}");
                }
            }
        }
        None => {
            ui.label(RichText::new("No data for this label.").italics());
        }
    }

    egui::Grid::new("window_fields")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Start:");
            let start = ui.add(TextEdit::singleline(&mut state.start_text).desired_width(FIELD_WIDTH));
            ui.end_row();

            ui.label("Length:");
            let length = ui.add(TextEdit::singleline(&mut state.length_text).desired_width(FIELD_WIDTH));
            ui.end_row();

            ui.label("End:");
            let mut end = state.end_text.clone();
            ui.add(
                TextEdit::singleline(&mut end)
                    .desired_width(FIELD_WIDTH)
                    .interactive(false),
            );
            ui.end_row();

            if start.changed() || length.changed() {
                state.refresh_end();
            }
        });
    ui.separator();

    // ---- Render triggers ----
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Plot Data").clicked() {
            if let Err(e) = state.plot() {
                log::debug!("plot failed: {e}");
            }
        }
        if ui.button("Switch Plot Mode").clicked() {
            if let Err(e) = state.toggle_mode() {
                log::debug!("plot after mode switch failed: {e}");
            }
        }
    });
    ui.label(format!("Mode: {}", state.plot_mode.name()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(path)) = (&state.table, &state.source_path) {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{file}: {} rows", table.len()));
            if let Some(chart) = &state.chart {
                ui.label(format!("{} plotted", chart.len()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Blocking notice
// ---------------------------------------------------------------------------

/// Show the pending warning, if any, until the user acknowledges it.
pub fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.notice.clone() else {
        return;
    };
    let mut acknowledged = false;
    egui::Window::new("Invalid Input")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });
    if acknowledged {
        state.dismiss_notice();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open IMU table")
        .add_filter("Supported files", &["csv", "txt", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
