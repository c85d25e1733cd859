use eframe::egui::{Color32, ColorImage};
use ndarray::Array2;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Intensity colour scale
// ---------------------------------------------------------------------------

/// Keep textures below common GPU size limits; larger arrays are
/// decimated by striding before upload.
const MAX_TEXTURE_DIM: usize = 4096;

/// Map a normalised intensity in `[0, 1]` onto a blue → red hue sweep.
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hue = 240.0 * (1.0 - t);
    let hsl = Hsl::new(hue, 0.85, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Array rasterisation
// ---------------------------------------------------------------------------

/// Rasterise a display-oriented 2-D array into an image, auto-levelled
/// to the array's own min/max (non-finite values render as the floor).
pub fn colorize(display: &Array2<f32>) -> ColorImage {
    let (rows, cols) = display.dim();

    let row_step = rows.div_ceil(MAX_TEXTURE_DIM).max(1);
    let col_step = cols.div_ceil(MAX_TEXTURE_DIM).max(1);
    let height = rows.div_ceil(row_step);
    let width = cols.div_ceil(col_step);

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in display.iter() {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    let range = (max - min).max(f32::MIN_POSITIVE);

    let mut image = ColorImage::new([width, height], Color32::BLACK);
    for y in 0..height {
        for x in 0..width {
            let v = display[[y * row_step, x * col_step]];
            let t = if v.is_finite() { (v - min) / range } else { 0.0 };
            image[(x, y)] = heat_color(t);
        }
    }

    image
}
