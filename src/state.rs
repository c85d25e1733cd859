use std::path::PathBuf;

use eframe::egui::TextureHandle;
use ndarray::Array1;

use crate::data::loader::ContainerReader;
use crate::data::model::{Channel, ChannelStore, DerivedViews, RootAttributes};
use crate::data::{spectral, stats, view};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The most recently requested row/column pair for a slice view.
#[derive(Debug, Clone, Copy)]
pub struct SliceRequest {
    pub row: i64,
    pub col: i64,
}

impl Default for SliceRequest {
    fn default() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Selected container file (None until the user picks one).
    pub file_path: Option<PathBuf>,

    /// Root attributes of the selected file.
    pub attributes: Option<RootAttributes>,

    /// Raw channel waterfalls of the current file.
    pub store: ChannelStore,

    /// PSD waterfall and variance trace derived from channel A.
    pub views: Option<DerivedViews>,

    /// Dataset names to load for channels A and B.
    pub dataset_a: String,
    pub dataset_b: String,

    /// Slice indices for the raw waterfall and the PSD waterfall.
    pub wf_slice: SliceRequest,
    pub psd_slice: SliceRequest,

    /// Whether the variance trace plot is shown.
    pub show_variance: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Display textures, rebuilt when `textures_dirty` is set.
    pub wf_texture: Option<TextureHandle>,
    pub psd_texture: Option<TextureHandle>,
    pub textures_dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            file_path: None,
            attributes: None,
            store: ChannelStore::default(),
            views: None,
            dataset_a: "Ch_A".to_string(),
            dataset_b: "Ch_B".to_string(),
            wf_slice: SliceRequest::default(),
            psd_slice: SliceRequest::default(),
            show_variance: false,
            status_message: None,
            wf_texture: None,
            psd_texture: None,
            textures_dirty: false,
        }
    }
}

impl AppState {
    /// Select a container file and read its root attributes. The channel
    /// store keeps its previous content until the next Process request.
    pub fn open_container(&mut self, path: PathBuf) {
        let reader = ContainerReader::new(&path);
        match reader.read_root_attributes() {
            Ok(attrs) => {
                log::info!(
                    "Selected {} with {} root attributes",
                    path.display(),
                    attrs.len()
                );
                self.attributes = Some(attrs);
                self.file_path = Some(path);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to read attributes: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load the channel datasets from the selected file and recompute
    /// every derived view. A no-op with a status message when no file
    /// has been selected yet.
    pub fn process_current_file(&mut self) {
        let Some(path) = &self.file_path else {
            self.status_message = Some("No file selected".to_string());
            return;
        };

        let reader = ContainerReader::new(path);

        let channel_a = match reader.read_dataset(&self.dataset_a) {
            Ok(Some(a)) => a,
            Ok(None) => {
                log::warn!("dataset '{}' not found", self.dataset_a);
                self.status_message = Some(format!("Dataset '{}' not found", self.dataset_a));
                return;
            }
            Err(e) => {
                log::error!("Failed to load '{}': {e:#}", self.dataset_a);
                self.status_message = Some(format!("Error: {e:#}"));
                return;
            }
        };

        // Channel B is optional; its absence never blocks channel A.
        let channel_b = match reader.read_dataset(&self.dataset_b) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Failed to load '{}': {e:#}", self.dataset_b);
                None
            }
        };

        let (rows, cols) = channel_a.dim();
        log::info!(
            "Loaded '{}' ({rows} frames x {cols} samples), channel B {}",
            self.dataset_a,
            if channel_b.is_some() { "present" } else { "absent" },
        );

        self.store.set_channels(channel_a, channel_b);
        self.derive_views();
    }

    /// Recompute the PSD waterfall and variance trace from channel A.
    /// On failure the previously derived views stay in place.
    fn derive_views(&mut self) {
        let Some(waterfall) = self.store.get(Channel::A) else {
            return;
        };

        let psd = match spectral::compute_psd(waterfall) {
            Ok(psd) => psd,
            Err(e) => {
                log::error!("PSD derivation failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };
        let variance = match stats::variance_trace(waterfall) {
            Ok(v) => v,
            Err(e) => {
                log::error!("Variance derivation failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };

        self.views = Some(DerivedViews { psd, variance });
        self.textures_dirty = true;
        self.status_message = None;
    }

    // -- Slice accessors ----------------------------------------------------
    //
    // All of these return None while the source array is unset, which is
    // distinct from a valid slice that happens to be short. Indices are
    // clamped into bounds, so any scrub position yields a slice.

    pub fn waterfall_row(&self) -> Option<Array1<f32>> {
        let wf = self.store.get(Channel::A)?;
        Some(view::row_slice(wf.view(), self.wf_slice.row))
    }

    pub fn waterfall_col(&self) -> Option<Array1<f32>> {
        let wf = self.store.get(Channel::A)?;
        Some(view::col_slice(wf.view(), self.wf_slice.col))
    }

    /// Channel B at the same row index as the channel A row slice.
    pub fn raw_trace_b(&self) -> Option<Array1<f32>> {
        let wf = self.store.get(Channel::B)?;
        Some(view::row_slice(wf.view(), self.wf_slice.row))
    }

    pub fn psd_row(&self) -> Option<Array1<f32>> {
        let psd = &self.views.as_ref()?.psd;
        Some(view::row_slice(psd.view(), self.psd_slice.row))
    }

    pub fn psd_col(&self) -> Option<Array1<f32>> {
        let psd = &self.views.as_ref()?.psd;
        Some(view::col_slice(psd.view(), self.psd_slice.col))
    }

    pub fn variance(&self) -> Option<&Array1<f32>> {
        self.views.as_ref().map(|v| &v.variance)
    }
}
