use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::model::Channel;
use crate::state::AppState;

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

        if ui.button("Process").clicked() {
            state.process_current_file();
        }

        ui.separator();

        if let Some(wf) = state.store.get(Channel::A) {
            let (rows, cols) = wf.dim();
            ui.label(format!("{rows} frames × {cols} samples"));
        } else if state.file_path.is_some() {
            ui.label("File selected — press Process");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – attributes and slice controls
// ---------------------------------------------------------------------------

/// Render the left panel: channel dataset names, the acquisition
/// attribute table, and the slice index controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Channels");
            ui.separator();
            egui::Grid::new("channel_names").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("Channel A");
                ui.text_edit_singleline(&mut state.dataset_a);
                ui.end_row();
                ui.label("Channel B");
                ui.text_edit_singleline(&mut state.dataset_b);
                ui.end_row();
            });
            ui.add_space(8.0);

            ui.heading("Attributes");
            ui.separator();
            attribute_table(ui, state);
            ui.add_space(8.0);

            ui.heading("Slices");
            ui.separator();

            ui.strong("Waterfall");
            slice_controls(ui, "wf_slice", &mut state.wf_slice.row, &mut state.wf_slice.col);

            ui.add_space(4.0);
            ui.strong("Spectrum");
            slice_controls(
                ui,
                "psd_slice",
                &mut state.psd_slice.row,
                &mut state.psd_slice.col,
            );

            ui.add_space(8.0);
            ui.checkbox(&mut state.show_variance, "Variance vs distance");
        });
}

/// Attribute table: file path first, then the container's root
/// attributes in listed order, values untouched by any formatting.
fn attribute_table(ui: &mut Ui, state: &AppState) {
    let Some(attrs) = &state.attributes else {
        ui.label("No file selected.");
        return;
    };

    egui::Grid::new("attribute_table")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("File path").strong());
            let path = state
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            ui.label(path);
            ui.end_row();

            for (key, value) in attrs.iter() {
                ui.label(RichText::new(key).strong());
                ui.label(value.to_string());
                ui.end_row();
            }
        });
}

/// A row/column index pair. Values are unclamped here; the slice layer
/// saturates them, so scrubbing past either end stays harmless.
fn slice_controls(ui: &mut Ui, id: &str, row: &mut i64, col: &mut i64) {
    egui::Grid::new(id).num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Row");
        ui.add(DragValue::new(row).speed(1.0));
        ui.end_row();
        ui.label("Column");
        ui.add(DragValue::new(col).speed(1.0));
        ui.end_row();
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open DAS recording")
        .add_filter("HDF5", &["h5", "hdf5"])
        .pick_file();

    if let Some(path) = file {
        state.open_container(path);
    }
}
