//! Shader Pro is the composition core of an interactive visual-composition
//! editor: one image mounted in a styled frame, geometric transforms,
//! layered shadows under a simulated global light source, and batch
//! snapshot export.
//!
//! # Pipeline overview
//!
//! 1. **State**: [`CompositionState`] is the single serializable style
//!    value, owned by [`Studio`] and mutated only by whole-value
//!    replacement.
//! 2. **Derive**: [`resolve_style`] turns one state snapshot into the
//!    presentation values a renderer consumes (screen-space shadows
//!    counter-rotated into object-local offsets, mode-resolved container
//!    styling, screen-fixed lighting direction).
//! 3. **Display**: [`Viewport`] computes the display-only fit/zoom/pan
//!    transform; it never affects exported pixels.
//! 4. **Export**: the pipeline behind [`Studio::export`] drives a
//!    [`SnapshotRenderer`] once per item, strictly serialized, and packs
//!    batch results through an [`ArchiveWriter`].
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure derivations**: resize, shadow transform and fit scale are
//!   pure functions of one state snapshot; no prior snapshot is retained.
//! - **Capabilities at the seams**: the concrete raster renderer and
//!   archive encoder are consumed behind [`SnapshotRenderer`] and
//!   [`ArchiveWriter`], not reimplemented here.
#![forbid(unsafe_code)]

mod assets;
mod composition;
mod export;
mod foundation;
mod studio;
mod viewport;

pub use assets::ingest::{ImageCollection, IngestReport, ItemId, UploadedItem};
pub use composition::light::{
    LIGHT_MULTIPLIER, LightDrag, ResolvedBorder, ResolvedLighting, ResolvedShadow, ResolvedStyle,
    ShadowKind, effective_gradient_direction, handle_display_scale, light_drag_target,
    local_shadow_offset, resolve_style, screen_light_pos,
};
pub use composition::model::{
    AspectRatio, BorderConfig, CompositionMode, CompositionState, LightingConfig, ShadowLayer,
    StylePreset,
};
pub use composition::resize::resize_for_ratio;
pub use export::pipeline::{BATCH_ARCHIVE_PREFIX, ExportProgress, export};
pub use export::snapshot::{
    ArchiveWriter, CaptureSpec, EXPORT_SUFFIX, ExportArtifact, SETTLE_INTERVAL, Scene,
    SnapshotRenderer,
};
pub use foundation::core::{FrameSize, Point, Rgb, Rgba, Size, Vec2};
pub use foundation::error::{StudioError, StudioResult};
pub use studio::Studio;
pub use viewport::{FIT_PADDING, Viewport, fit_scale};
