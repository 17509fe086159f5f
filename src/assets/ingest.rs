use std::sync::Arc;

use crate::foundation::error::{StudioError, StudioResult};

/// Opaque identity of an uploaded item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

/// A decoded upload owned by the [`ImageCollection`].
#[derive(Clone, Debug)]
pub struct UploadedItem {
    pub id: ItemId,
    /// Display name: the uploaded file name with its extension stripped.
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8 pixels, tightly packed, row-major.
    pub rgba8: Arc<Vec<u8>>,
}

/// Outcome of a batch upload. Per-file decode failures are isolated: they
/// are reported here and do not block the other files.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<ItemId>,
    pub failures: Vec<(String, StudioError)>,
}

/// Ordered collection of uploaded items plus the single nullable active
/// selection the rendering surface draws from.
#[derive(Debug, Default)]
pub struct ImageCollection {
    items: Vec<UploadedItem>,
    active: Option<ItemId>,
    next_id: u64,
}

impl ImageCollection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[UploadedItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&UploadedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn active_id(&self) -> Option<ItemId> {
        self.active
    }

    pub fn active_item(&self) -> Option<&UploadedItem> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn set_active(&mut self, id: ItemId) -> StudioResult<()> {
        if self.get(id).is_none() {
            return Err(StudioError::validation("unknown item id"));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Restore a previously captured selection. Ids that no longer exist
    /// collapse to no selection.
    pub fn restore_active(&mut self, id: Option<ItemId>) {
        self.active = id.filter(|id| self.get(*id).is_some());
    }

    /// Decode one upload and append it. Does not change the selection.
    pub fn ingest(&mut self, file_name: &str, bytes: &[u8]) -> StudioResult<ItemId> {
        let (width, height, rgba8) = decode_rgba8(bytes)?;
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(UploadedItem {
            id,
            name: display_name(file_name),
            width,
            height,
            rgba8: Arc::new(rgba8),
        });
        Ok(id)
    }

    /// Ingest a batch of uploads, isolating per-file failures.
    pub fn ingest_batch<I, B>(&mut self, files: I) -> IngestReport
    where
        I: IntoIterator<Item = (String, B)>,
        B: AsRef<[u8]>,
    {
        let mut report = IngestReport::default();
        for (file_name, bytes) in files {
            match self.ingest(&file_name, bytes.as_ref()) {
                Ok(id) => report.added.push(id),
                Err(err) => {
                    tracing::warn!(file = %file_name, error = %err, "skipping undecodable upload");
                    report.failures.push((file_name, err));
                }
            }
        }
        report
    }

    /// Remove an item. If it was active, the next remaining item (falling
    /// back to the new last, then none) becomes active.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(idx) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        self.items.remove(idx);
        if self.active == Some(id) {
            self.active = self
                .items
                .get(idx)
                .or_else(|| self.items.last())
                .map(|item| item.id);
        }
        true
    }
}

/// Decode encoded image bytes and probe dimensions.
fn decode_rgba8(bytes: &[u8]) -> StudioResult<(u32, u32, Vec<u8>)> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::ingest(format!("failed to decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(StudioError::ingest("image has zero dimensions"));
    }
    Ok((width, height, rgba.into_raw()))
}

fn display_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => file_name.to_owned(),
    }
}
