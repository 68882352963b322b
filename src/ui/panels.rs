use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::curves::{extra_curves, standard_curves, CurveOrder};
use crate::report::format_resolution;
use crate::state::{AppState, PlotView};

// ---------------------------------------------------------------------------
// Left side panel – results and curve toggles
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Resolution");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    let crossing_text = |value: Option<f64>| match value {
        Some(r) => RichText::new(format!("{} Å", format_resolution(r))).strong(),
        None => RichText::new("not found").italics(),
    };

    egui::Grid::new("crossings").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("FSC = 0.143");
        ui.label(crossing_text(dataset.crossings.fsc_0143));
        ui.end_row();
        ui.label("FSC = 0.5");
        ui.label(crossing_text(dataset.crossings.fsc_05));
        ui.end_row();
    });

    ui.add_space(4.0);
    ui.label(format!("{} rows from {}", dataset.table.len(), dataset.source));
    if dataset.rejected > 0 {
        ui.label(RichText::new(format!("{} malformed rows dropped", dataset.rejected)).weak());
    }
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let mut curves = standard_curves(dataset, CurveOrder::Main);
    curves.extend(extra_curves(dataset));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Curves");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for curve in &curves {
                let mut text = RichText::new(&curve.label);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(&curve.column));
                }

                let mut checked = state.visible.contains(&curve.column);
                if ui
                    .checkbox(&mut checked, text)
                    .on_hover_text(&curve.column)
                    .changed()
                {
                    state.toggle_curve(&curve.column);
                }
            }
        });
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
            let has_data = state.dataset.is_some();
            if ui.add_enabled(has_data, egui::Button::new("Export CSV…")).clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui.add_enabled(has_data, egui::Button::new("Save figure…")).clicked() {
                save_figure_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for view in PlotView::ALL {
            if ui.selectable_label(state.view == view, view.label()).clicked() {
                state.view = view;
            }
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Table").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open RELION postprocess file")
        .add_filter("STAR files", &["star"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

fn default_name(state: &AppState, name: &str) -> PathBuf {
    let stem = state
        .dataset
        .as_ref()
        .map(|ds| ds.source.trim_end_matches(".star").to_string())
        .unwrap_or_default();
    if stem.is_empty() {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{stem}_{name}"))
    }
}

pub fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export FSC table")
        .set_file_name(default_name(state, "fsc_for_prism.csv").to_string_lossy())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}

pub fn save_figure_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_file_name(default_name(state, state.view.file_name()).to_string_lossy())
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = file {
        state.pending_screenshot = Some(path);
    }
}
