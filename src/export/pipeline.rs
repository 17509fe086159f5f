use crate::{
    assets::ingest::ItemId,
    export::snapshot::{
        ArchiveWriter, CaptureSpec, EXPORT_SUFFIX, ExportArtifact, SnapshotRenderer,
    },
    foundation::error::{StudioError, StudioResult},
    studio::Studio,
};

/// File-name prefix of the batch archive artifact.
pub const BATCH_ARCHIVE_PREFIX: &str = "shader-pro-batch";

/// Transient batch progress: exists only while a batch export is in
/// flight. `current` is monotonically non-decreasing and reaches `total`
/// exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportProgress {
    pub current: usize,
    pub total: usize,
}

/// Export the studio's items with its current style.
///
/// Zero or one uploads take the single-capture path; more take the batch
/// path, producing one archive with one entry per item in input order. A
/// second export cannot start while one is in flight. The in-flight
/// markers (`exporting`, `export_progress`) are cleared on every exit
/// path, success or failure.
#[tracing::instrument(skip_all)]
pub fn export(
    studio: &mut Studio,
    renderer: &mut dyn SnapshotRenderer,
    archive: &mut dyn ArchiveWriter,
    on_progress: &mut dyn FnMut(ExportProgress),
) -> StudioResult<ExportArtifact> {
    if studio.exporting {
        return Err(StudioError::validation("an export is already in progress"));
    }
    studio.exporting = true;

    let result = if studio.images.len() > 1 {
        run_batch(studio, renderer, archive, on_progress)
    } else {
        run_single(studio, renderer)
    };

    studio.exporting = false;
    studio.export_progress = None;
    result
}

fn run_single(
    studio: &mut Studio,
    renderer: &mut dyn SnapshotRenderer,
) -> StudioResult<ExportArtifact> {
    let font_preamble = fetch_font_preamble(renderer);
    renderer.settle();

    let spec = CaptureSpec::for_export(&studio.state, font_preamble);
    let bytes = renderer.capture(&studio.scene(), &spec)?;

    let stem = match studio.images.active_item() {
        Some(item) => item.name.clone(),
        None => unix_millis().to_string(),
    };
    Ok(ExportArtifact {
        file_name: format!("{stem}-{EXPORT_SUFFIX}.{}", renderer.format_extension()),
        bytes,
    })
}

fn run_batch(
    studio: &mut Studio,
    renderer: &mut dyn SnapshotRenderer,
    archive: &mut dyn ArchiveWriter,
    on_progress: &mut dyn FnMut(ExportProgress),
) -> StudioResult<ExportArtifact> {
    let total = studio.images.len();
    studio.export_progress = Some(ExportProgress { current: 0, total });

    let font_preamble = fetch_font_preamble(renderer);
    let original_selection = studio.images.active_id();
    let manifest: Vec<(ItemId, String)> = studio
        .images
        .items()
        .iter()
        .map(|item| (item.id, item.name.clone()))
        .collect();

    for (idx, (id, name)) in manifest.iter().enumerate() {
        // The renderer draws from the shared selection, so each item is
        // strictly sequenced: select, settle, capture, then the next
        // item's selection. A failed capture aborts the whole batch; no
        // partial archive is delivered.
        studio.images.set_active(*id)?;
        renderer.settle();

        let spec = CaptureSpec::for_export(&studio.state, font_preamble.clone());
        let bytes = renderer.capture(&studio.scene(), &spec)?;
        archive.add_entry(
            &format!("{name}-{EXPORT_SUFFIX}.{}", renderer.format_extension()),
            &bytes,
        )?;

        let progress = ExportProgress {
            current: idx + 1,
            total,
        };
        studio.export_progress = Some(progress);
        on_progress(progress);
        tracing::debug!(item = %name, current = progress.current, total, "captured batch item");
    }

    studio.images.restore_active(original_selection);

    let bytes = archive.finalize()?;
    Ok(ExportArtifact {
        file_name: format!("{BATCH_ARCHIVE_PREFIX}-{}.zip", unix_millis()),
        bytes,
    })
}

fn fetch_font_preamble(renderer: &mut dyn SnapshotRenderer) -> String {
    match renderer.font_preamble() {
        Ok(preamble) => preamble,
        Err(err) => {
            tracing::warn!(error = %err, "font preamble unavailable, exporting without it");
            String::new()
        }
    }
}

fn unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
