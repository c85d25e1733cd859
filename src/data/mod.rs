/// Data layer: core types, container loading, and derivations.
///
/// Architecture:
/// ```text
///     .h5 container
///          │
///          ▼
///    ┌───────────┐
///    │  loader    │  read named 2-D datasets + root attributes
///    └───────────┘
///          │
///          ▼
///    ┌──────────────┐
///    │ ChannelStore  │  raw waterfalls (channels A / B)
///    └──────────────┘
///        │        │
///        ▼        ▼
///   ┌─────────┐ ┌───────┐
///   │ spectral │ │ stats  │  PSD waterfall / variance trace
///   └─────────┘ └───────┘
///        │        │
///        ▼        ▼
///    ┌───────────┐
///    │   view     │  display orientation, clamped row/col slices
///    └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod spectral;
pub mod stats;
pub mod view;

use thiserror::Error;

/// Failure of a single derivation call. The channel store and any
/// previously derived views are left untouched by the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    #[error("input array is empty ({rows}x{cols})")]
    EmptyInput { rows: usize, cols: usize },
}
