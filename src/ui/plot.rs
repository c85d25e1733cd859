use eframe::egui::{Color32, Context, TextureHandle, TextureOptions, Ui, Vec2};
use egui_plot::{Line, Plot, PlotImage, PlotPoint, PlotPoints};
use ndarray::Array1;

use crate::color;
use crate::data::model::Channel;
use crate::data::view;
use crate::state::AppState;

const MAGENTA: Color32 = Color32::from_rgb(220, 70, 220);

// ---------------------------------------------------------------------------
// Central panel – waterfalls, slices, variance
// ---------------------------------------------------------------------------

/// Render every derived view of the current recording.
pub fn derived_views(ui: &mut Ui, state: &mut AppState) {
    if state.store.get(Channel::A).is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a recording and press Process  (File → Open…)");
        });
        return;
    }

    ensure_textures(ui.ctx(), state);

    let n_rows = if state.show_variance { 4.0 } else { 3.0 };
    let plot_height = (ui.available_height() / n_rows - 8.0).max(120.0);

    // ---- Waterfall and PSD images ----
    ui.columns(2, |columns: &mut [Ui]| {
        if let (Some(tex), Some(wf)) = (&state.wf_texture, state.store.get(Channel::A)) {
            image_plot(
                &mut columns[0],
                "wf_image",
                tex,
                wf.dim(),
                "distance bin",
                "time frame",
                plot_height,
            );
        }
        if let (Some(tex), Some(views)) = (&state.psd_texture, &state.views) {
            image_plot(
                &mut columns[1],
                "psd_image",
                tex,
                views.psd.dim(),
                "distance bin",
                "frequency bin",
                plot_height,
            );
        }
    });

    // ---- Raw waterfall slices ----
    ui.columns(2, |columns: &mut [Ui]| {
        if let Some(row) = state.waterfall_row() {
            let mut lines = vec![(row, "Ch A", Color32::YELLOW)];
            if let Some(b_row) = state.raw_trace_b() {
                lines.push((b_row, "Ch B", Color32::LIGHT_BLUE));
            }
            multi_line_plot(&mut columns[0], "wf_row", "distance bin", plot_height, lines);
        }
        if let Some(col) = state.waterfall_col() {
            line_plot(
                &mut columns[1],
                "wf_col",
                "time frame",
                plot_height,
                &col,
                Color32::LIGHT_BLUE,
            );
        }
    });

    // ---- Spectrum slices ----
    ui.columns(2, |columns: &mut [Ui]| {
        if let Some(row) = state.psd_row() {
            line_plot(
                &mut columns[0],
                "psd_row",
                "distance bin",
                plot_height,
                &row,
                Color32::YELLOW,
            );
        }
        if let Some(col) = state.psd_col() {
            line_plot(
                &mut columns[1],
                "psd_col",
                "frequency bin",
                plot_height,
                &col,
                Color32::LIGHT_BLUE,
            );
        }
    });

    // ---- Variance trace ----
    if state.show_variance {
        if let Some(variance) = state.variance() {
            line_plot(ui, "variance", "distance bin", plot_height, variance, MAGENTA);
        }
    }
}

// ---------------------------------------------------------------------------
// Texture cache
// ---------------------------------------------------------------------------

/// Rebuild the display textures when the underlying arrays changed.
/// Both are rasterised from the row-mirrored display view, never from
/// the arrays the slice controls index into.
fn ensure_textures(ctx: &Context, state: &mut AppState) {
    if !state.textures_dirty && state.wf_texture.is_some() {
        return;
    }

    if let Some(wf) = state.store.get(Channel::A) {
        let image = color::colorize(&view::flip_rows(wf));
        state.wf_texture = Some(ctx.load_texture("waterfall", image, TextureOptions::LINEAR));
    }
    if let Some(views) = &state.views {
        let image = color::colorize(&view::flip_rows(&views.psd));
        state.psd_texture =
            Some(ctx.load_texture("psd_waterfall", image, TextureOptions::LINEAR));
    }

    state.textures_dirty = false;
}

// ---------------------------------------------------------------------------
// Plot helpers
// ---------------------------------------------------------------------------

fn image_plot(
    ui: &mut Ui,
    id: &str,
    texture: &TextureHandle,
    dim: (usize, usize),
    x_label: &str,
    y_label: &str,
    height: f32,
) {
    let (rows, cols) = dim;
    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .height(height)
        .show(ui, |plot_ui| {
            let center = PlotPoint::new(cols as f64 / 2.0, rows as f64 / 2.0);
            let size = Vec2::new(cols as f32, rows as f32);
            plot_ui.image(PlotImage::new(texture.id(), center, size));
        });
}

fn line_plot(ui: &mut Ui, id: &str, x_label: &str, height: f32, data: &Array1<f32>, color: Color32) {
    Plot::new(id)
        .x_axis_label(x_label)
        .height(height)
        .show(ui, |plot_ui| {
            plot_ui.line(trace_line(data, id, color));
        });
}

fn multi_line_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    height: f32,
    lines: Vec<(Array1<f32>, &str, Color32)>,
) {
    Plot::new(id)
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_label)
        .height(height)
        .show(ui, |plot_ui| {
            for (data, name, color) in &lines {
                plot_ui.line(trace_line(data, name, *color));
            }
        });
}

fn trace_line(data: &Array1<f32>, name: &str, color: Color32) -> Line<'static> {
    let points: PlotPoints = data
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v as f64])
        .collect();
    Line::new(points).name(name).color(color).width(1.5)
}
