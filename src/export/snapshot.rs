use std::time::Duration;

use crate::{
    assets::ingest::UploadedItem,
    composition::{
        light::{ResolvedStyle, resolve_style},
        model::CompositionState,
    },
    foundation::error::StudioResult,
};

/// Fixed settle interval used by the default [`SnapshotRenderer::settle`].
///
/// Empirically long enough for image decode and layout to complete after a
/// selection change. Renderers that can observe a layout-complete signal
/// should override `settle` and block on that signal instead.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(350);

/// Suffix stamped on every exported image file name.
pub const EXPORT_SUFFIX: &str = "shaderpro";

/// What a snapshot renderer draws: one composition snapshot plus the
/// currently selected item (if any).
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub state: &'a CompositionState,
    pub image: Option<&'a UploadedItem>,
}

impl Scene<'_> {
    /// Derived presentation values for this snapshot.
    pub fn resolved(&self) -> ResolvedStyle {
        resolve_style(self.state)
    }
}

/// Parameters for one capture.
///
/// `width`/`height` are the frame's native pixel dimensions; exported
/// pixels must not be affected by any display-only fit/zoom transform.
#[derive(Clone, Debug)]
pub struct CaptureSpec {
    pub width: u32,
    pub height: u32,
    pub pixel_density: f64,
    /// Skip elements marked as interactive editor chrome (e.g. the
    /// light-source handle).
    pub exclude_editor_chrome: bool,
    /// Render at 1:1, ignoring the outer viewport transform.
    pub neutralize_view_transform: bool,
    /// One-time export preamble (font resource text); may be empty.
    pub font_preamble: String,
}

impl CaptureSpec {
    pub fn for_export(state: &CompositionState, font_preamble: String) -> Self {
        Self {
            width: state.frame.width,
            height: state.frame.height,
            pixel_density: 1.0,
            exclude_editor_chrome: true,
            neutralize_view_transform: true,
            font_preamble,
        }
    }
}

/// A renderer that can snapshot the current visual state to encoded image
/// bytes.
///
/// The export pipeline drives this capability strictly sequentially: for
/// each item it mutates the shared selection, calls [`settle`], then
/// [`capture`]; implementations never see overlapping captures.
///
/// [`settle`]: SnapshotRenderer::settle
/// [`capture`]: SnapshotRenderer::capture
pub trait SnapshotRenderer {
    /// Render `scene` at exactly `spec.width x spec.height` and return
    /// encoded image bytes.
    fn capture(&mut self, scene: &Scene<'_>, spec: &CaptureSpec) -> StudioResult<Vec<u8>>;

    /// Block until the rendering surface has observed the latest state
    /// mutation (the settle barrier).
    ///
    /// The default is a fixed-delay approximation; override when a real
    /// completion signal exists.
    fn settle(&mut self) {
        std::thread::sleep(SETTLE_INTERVAL);
    }

    /// One-time export preamble, fetched before the first capture of an
    /// export. Failures are absorbed by the pipeline (the export proceeds
    /// without a preamble).
    fn font_preamble(&mut self) -> StudioResult<String> {
        Ok(String::new())
    }

    /// Extension of the encoded capture format, without the dot.
    fn format_extension(&self) -> &'static str {
        "png"
    }
}

/// Packs named binary entries into a single downloadable archive.
pub trait ArchiveWriter {
    fn add_entry(&mut self, name: &str, bytes: &[u8]) -> StudioResult<()>;

    /// Consume everything added so far and return the archive blob.
    fn finalize(&mut self) -> StudioResult<Vec<u8>>;
}

/// The single downloadable result of an export.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
