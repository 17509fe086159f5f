use shaderpro::{
    ArchiveWriter, AspectRatio, CaptureSpec, ExportProgress, Scene, SnapshotRenderer, Studio,
    StudioError, StudioResult,
};

/// Renderer double that records the exact order of pipeline events.
#[derive(Default)]
struct LogRenderer {
    log: Vec<String>,
    captures: usize,
    fail_on_capture: Option<usize>,
    preamble_error: bool,
    seen_specs: Vec<(u32, u32, String)>,
}

impl SnapshotRenderer for LogRenderer {
    fn capture(&mut self, scene: &Scene<'_>, spec: &CaptureSpec) -> StudioResult<Vec<u8>> {
        self.captures += 1;
        let name = scene
            .image
            .map(|item| item.name.clone())
            .unwrap_or_else(|| "none".to_owned());
        self.log.push(format!("capture:{name}"));
        self.seen_specs
            .push((spec.width, spec.height, spec.font_preamble.clone()));
        if self.fail_on_capture == Some(self.captures) {
            return Err(StudioError::capture("surface failed"));
        }
        Ok(format!("pixels:{name}").into_bytes())
    }

    fn settle(&mut self) {
        self.log.push("settle".to_owned());
    }

    fn font_preamble(&mut self) -> StudioResult<String> {
        self.log.push("preamble".to_owned());
        if self.preamble_error {
            return Err(StudioError::capture("font endpoint unreachable"));
        }
        Ok("@font-face {}".to_owned())
    }
}

#[derive(Default)]
struct MemoryArchive {
    entries: Vec<(String, Vec<u8>)>,
    finalized: bool,
    fail_finalize: bool,
}

impl ArchiveWriter for MemoryArchive {
    fn add_entry(&mut self, name: &str, bytes: &[u8]) -> StudioResult<()> {
        self.entries.push((name.to_owned(), bytes.to_vec()));
        Ok(())
    }

    fn finalize(&mut self) -> StudioResult<Vec<u8>> {
        if self.fail_finalize {
            return Err(StudioError::archive("archive stream closed"));
        }
        self.finalized = true;
        let mut blob = Vec::new();
        for (name, bytes) in &self.entries {
            blob.extend_from_slice(name.as_bytes());
            blob.extend_from_slice(bytes);
        }
        Ok(blob)
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([9, 9, 9, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn studio_with_uploads(names: &[&str]) -> Studio {
    let mut studio = Studio::new();
    let report = studio.upload(
        names
            .iter()
            .map(|name| (format!("{name}.png"), png_bytes(4, 4))),
    );
    assert_eq!(report.added.len(), names.len());
    assert!(report.failures.is_empty());
    studio
}

fn run_export(
    studio: &mut Studio,
    renderer: &mut LogRenderer,
    archive: &mut MemoryArchive,
) -> (StudioResult<shaderpro::ExportArtifact>, Vec<(usize, usize)>) {
    let mut progresses = Vec::new();
    let result = studio.export(renderer, archive, &mut |p: ExportProgress| {
        progresses.push((p.current, p.total))
    });
    (result, progresses)
}

#[test]
fn single_export_captures_native_frame_and_names_by_item() {
    let mut studio = studio_with_uploads(&["hero"]);
    let mut renderer = LogRenderer::default();
    let mut archive = MemoryArchive::default();

    let (result, progresses) = run_export(&mut studio, &mut renderer, &mut archive);
    let artifact = result.unwrap();

    assert_eq!(artifact.file_name, "hero-shaderpro.png");
    assert_eq!(artifact.bytes, b"pixels:hero");
    assert_eq!(renderer.log, ["preamble", "settle", "capture:hero"]);
    assert_eq!(
        renderer.seen_specs,
        [(1080, 1080, "@font-face {}".to_owned())]
    );
    // Single path never touches the archive and publishes no progress.
    assert!(archive.entries.is_empty());
    assert!(progresses.is_empty());
    assert!(!studio.is_exporting());
    assert!(studio.export_progress().is_none());
}

#[test]
fn single_export_without_items_uses_a_timestamp_stem() {
    let mut studio = Studio::new();
    let mut renderer = LogRenderer::default();
    let mut archive = MemoryArchive::default();

    let (result, _) = run_export(&mut studio, &mut renderer, &mut archive);
    let artifact = result.unwrap();

    let stem = artifact.file_name.strip_suffix("-shaderpro.png").unwrap();
    stem.parse::<u128>().expect("timestamp stem");
    assert_eq!(renderer.log, ["preamble", "settle", "capture:none"]);
}

#[test]
fn batch_export_serializes_items_and_restores_selection() {
    let mut studio = studio_with_uploads(&["alpha", "beta", "gamma"]);
    let beta = studio.images().items()[1].id;
    studio.select_image(beta).unwrap();

    let mut renderer = LogRenderer::default();
    let mut archive = MemoryArchive::default();
    let (result, progresses) = run_export(&mut studio, &mut renderer, &mut archive);
    let artifact = result.unwrap();

    // Strict select -> settle -> capture sequencing, one item at a time.
    assert_eq!(
        renderer.log,
        [
            "preamble",
            "settle",
            "capture:alpha",
            "settle",
            "capture:beta",
            "settle",
            "capture:gamma",
        ]
    );
    // Progress advances once per item, including the first, never skipping.
    assert_eq!(progresses, [(1, 3), (2, 3), (3, 3)]);
    // One entry per item, in input order.
    let names: Vec<&str> = archive.entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        [
            "alpha-shaderpro.png",
            "beta-shaderpro.png",
            "gamma-shaderpro.png",
        ]
    );
    assert!(archive.finalized);
    assert!(artifact.file_name.starts_with("shader-pro-batch-"));
    assert!(artifact.file_name.ends_with(".zip"));

    // The user's selection is untouched after the run.
    assert_eq!(studio.images().active_id(), Some(beta));
    assert!(studio.export_progress().is_none());
    assert!(!studio.is_exporting());
}

#[test]
fn batch_capture_failure_fails_fast_with_no_partial_archive() {
    let mut studio = studio_with_uploads(&["alpha", "beta", "gamma"]);
    let mut renderer = LogRenderer {
        fail_on_capture: Some(2),
        ..LogRenderer::default()
    };
    let mut archive = MemoryArchive::default();

    let (result, progresses) = run_export(&mut studio, &mut renderer, &mut archive);
    assert!(matches!(result, Err(StudioError::Capture(_))));

    // Aborted before item 3's selection mutation.
    assert_eq!(
        renderer.log,
        [
            "preamble",
            "settle",
            "capture:alpha",
            "settle",
            "capture:beta",
        ]
    );
    assert_eq!(progresses, [(1, 3)]);
    // No archive artifact was finalized or delivered.
    assert!(!archive.finalized);
    assert_eq!(archive.entries.len(), 1);
    // In-flight markers are cleared even on failure.
    assert!(studio.export_progress().is_none());
    assert!(!studio.is_exporting());
    // The selection is left where the failure happened (no restore on the
    // error path).
    let beta = studio.images().items()[1].id;
    assert_eq!(studio.images().active_id(), Some(beta));
}

#[test]
fn archive_finalize_failure_aborts_the_batch() {
    let mut studio = studio_with_uploads(&["alpha", "beta"]);
    let mut renderer = LogRenderer::default();
    let mut archive = MemoryArchive {
        fail_finalize: true,
        ..MemoryArchive::default()
    };

    let (result, progresses) = run_export(&mut studio, &mut renderer, &mut archive);
    assert!(matches!(result, Err(StudioError::Archive(_))));
    assert_eq!(progresses, [(1, 2), (2, 2)]);
    assert!(studio.export_progress().is_none());
    assert!(!studio.is_exporting());
}

#[test]
fn font_preamble_failure_degrades_to_empty() {
    let mut studio = studio_with_uploads(&["hero"]);
    let mut renderer = LogRenderer {
        preamble_error: true,
        ..LogRenderer::default()
    };
    let mut archive = MemoryArchive::default();

    let (result, _) = run_export(&mut studio, &mut renderer, &mut archive);
    assert!(result.is_ok());
    assert_eq!(renderer.seen_specs, [(1080, 1080, String::new())]);
}

#[test]
fn batch_captures_use_the_shared_style_snapshot() {
    let mut studio = studio_with_uploads(&["alpha", "beta"]);
    studio.set_aspect_ratio(AspectRatio::SixteenNine);

    let mut renderer = LogRenderer::default();
    let mut archive = MemoryArchive::default();
    let (result, _) = run_export(&mut studio, &mut renderer, &mut archive);
    result.unwrap();

    assert_eq!(renderer.seen_specs.len(), 2);
    for (width, height, _) in &renderer.seen_specs {
        assert_eq!((*width, *height), (1080, 608));
    }
}
