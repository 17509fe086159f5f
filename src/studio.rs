use crate::{
    assets::ingest::{ImageCollection, IngestReport, ItemId},
    composition::{
        light::light_drag_target,
        model::{AspectRatio, CompositionState, StylePreset},
        resize::resize_for_ratio,
    },
    export::{
        pipeline::{self, ExportProgress},
        snapshot::{ArchiveWriter, ExportArtifact, Scene, SnapshotRenderer},
    },
    foundation::{
        core::{Size, Vec2},
        error::{StudioError, StudioResult},
    },
    viewport::Viewport,
};

/// Scale applied to a freshly uploaded image so it sits well inside the
/// frame.
const UPLOAD_SCALE: f64 = 0.45;

/// Top-level editor session: the single owner of the composition state and
/// the image collection (the only shared mutable resources the export
/// pipeline touches).
///
/// The composition state is replaced wholesale on every mutation; partial
/// in-place field writes are never visible outside this type.
#[derive(Default)]
pub struct Studio {
    pub(crate) state: CompositionState,
    pub(crate) images: ImageCollection,
    pub(crate) viewport: Viewport,
    /// Measured size of the preview container, once known.
    pub(crate) viewport_size: Option<Size>,
    pub(crate) exporting: bool,
    pub(crate) export_progress: Option<ExportProgress>,
}

impl Studio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    pub fn images(&self) -> &ImageCollection {
        &self.images
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// In-flight batch progress; `None` outside a batch export.
    pub fn export_progress(&self) -> Option<ExportProgress> {
        self.export_progress
    }

    /// The snapshot the rendering surface draws from.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            state: &self.state,
            image: self.images.active_item(),
        }
    }

    /// Replace the whole composition state after validating it.
    pub fn replace_state(&mut self, next: CompositionState) -> StudioResult<()> {
        next.validate()?;
        self.state = next;
        self.refit_viewport();
        Ok(())
    }

    /// Ingest a batch of uploads. The first new item becomes active and the
    /// image transform is reset so it sits well contained in the frame.
    pub fn upload<I, B>(&mut self, files: I) -> IngestReport
    where
        I: IntoIterator<Item = (String, B)>,
        B: AsRef<[u8]>,
    {
        let report = self.images.ingest_batch(files);
        if let Some(first) = report.added.first() {
            let _ = self.images.set_active(*first);
            self.state = CompositionState {
                scale: UPLOAD_SCALE,
                rotate: 0.0,
                ..self.state.clone()
            };
        }
        report
    }

    pub fn select_image(&mut self, id: ItemId) -> StudioResult<()> {
        self.images.set_active(id)
    }

    pub fn remove_image(&mut self, id: ItemId) -> bool {
        self.images.remove(id)
    }

    /// Apply a ratio preset to the frame, preserving the larger edge, and
    /// record the tag. `Custom` only records the tag.
    pub fn set_aspect_ratio(&mut self, preset: AspectRatio) {
        let frame = match preset.ratio() {
            Some((ratio_w, ratio_h)) => resize_for_ratio(self.state.frame, ratio_w, ratio_h),
            None => self.state.frame,
        };
        self.state = CompositionState {
            frame,
            aspect_ratio: preset,
            ..self.state.clone()
        };
        self.refit_viewport();
    }

    /// Direct width edit; always clears the preset tag to `Custom`.
    pub fn set_frame_width(&mut self, width: u32) -> StudioResult<()> {
        if width == 0 {
            return Err(StudioError::validation("frame width must be > 0"));
        }
        let mut frame = self.state.frame;
        frame.width = width;
        self.state = CompositionState {
            frame,
            aspect_ratio: AspectRatio::Custom,
            ..self.state.clone()
        };
        self.refit_viewport();
        Ok(())
    }

    /// Direct height edit; always clears the preset tag to `Custom`.
    pub fn set_frame_height(&mut self, height: u32) -> StudioResult<()> {
        if height == 0 {
            return Err(StudioError::validation("frame height must be > 0"));
        }
        let mut frame = self.state.frame;
        frame.height = height;
        self.state = CompositionState {
            frame,
            aspect_ratio: AspectRatio::Custom,
            ..self.state.clone()
        };
        self.refit_viewport();
        Ok(())
    }

    pub fn apply_style_preset(&mut self, preset: StylePreset) {
        self.state = self.state.with_style_preset(preset);
    }

    /// Drag the light handle to a new screen position, updating shadow
    /// layer 1 and the synchronized gradient direction together.
    pub fn drag_light(&mut self, screen: Vec2) {
        let drag = light_drag_target(&self.state, screen);
        let mut lighting = self.state.lighting;
        lighting.direction = drag.direction;
        let mut shadow1 = self.state.shadow1;
        shadow1.x = drag.shadow_offset.x;
        shadow1.y = drag.shadow_offset.y;
        self.state = CompositionState {
            shadow1,
            lighting,
            ..self.state.clone()
        };
    }

    /// Report a new measured size of the preview container. Re-fits while
    /// auto-fit is active.
    pub fn viewport_resized(&mut self, measured: Size) {
        self.viewport_size = Some(measured);
        self.refit_viewport();
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Re-enable fit-to-screen using the last measured container size.
    pub fn fit_to_screen(&mut self) {
        if let Some(size) = self.viewport_size {
            self.viewport.fit_to_screen(self.state.frame, size);
        }
    }

    /// Export the current composition: one image for zero or one uploads,
    /// one archive entry per item for more.
    pub fn export(
        &mut self,
        renderer: &mut dyn SnapshotRenderer,
        archive: &mut dyn ArchiveWriter,
        on_progress: &mut dyn FnMut(ExportProgress),
    ) -> StudioResult<ExportArtifact> {
        pipeline::export(self, renderer, archive, on_progress)
    }

    fn refit_viewport(&mut self) {
        if let Some(size) = self.viewport_size {
            self.viewport.refit(self.state.frame, size);
        }
    }
}
