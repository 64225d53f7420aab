//! Per-slot upload queue

use crate::config::UploadLimits;
use crate::error::{Error, Result};
use crate::types::FileHandle;
use crate::upload::{RemoteRef, UploadId, UploadItem, UploadKind, UploadStatus};
use tracing::debug;

/// Ordered queue of uploads for one slot
///
/// Oversize files never enter the queue. Failed uploads are removed as soon
/// as they fail, so the queue only ever holds staged, uploading or complete
/// items.
#[derive(Debug, Clone)]
pub struct UploadQueue {
    kind: UploadKind,
    limit_bytes: u64,
    items: Vec<UploadItem>,
    next_id: u64,
}

impl UploadQueue {
    /// Empty queue for a slot, using the configured size ceiling
    pub const fn new(kind: UploadKind, limits: &UploadLimits) -> Self {
        Self::with_limit(kind, limits.limit_for(kind))
    }

    /// Empty queue with an explicit size ceiling
    pub const fn with_limit(kind: UploadKind, limit_bytes: u64) -> Self {
        Self {
            kind,
            limit_bytes,
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Slot this queue serves
    pub const fn kind(&self) -> UploadKind {
        self.kind
    }

    /// Size ceiling in bytes
    pub const fn limit_bytes(&self) -> u64 {
        self.limit_bytes
    }

    /// Stage a selected file
    ///
    /// Single-file slots drop whatever they held before.
    pub fn stage(&mut self, file: FileHandle) -> Result<UploadId> {
        if file.size_bytes > self.limit_bytes {
            return Err(Error::UploadTooLarge {
                kind: self.kind,
                file: file.name,
                limit_bytes: self.limit_bytes,
            });
        }

        if self.kind.is_single() {
            self.items.clear();
        }

        let id = UploadId(self.next_id);
        self.next_id += 1;

        debug!(kind = %self.kind, %id, file = %file.name, "staged upload");
        self.items.push(UploadItem {
            id,
            preview: format!("blob:{}/{}", self.kind.slug(), id.0),
            source: file,
            status: UploadStatus::Staged,
            remote: None,
        });
        Ok(id)
    }

    /// Move a staged item to `uploading`
    pub fn start(&mut self, id: UploadId) -> Result<()> {
        let item = self.transition(id, UploadStatus::Staged, UploadStatus::Uploading)?;
        item.status = UploadStatus::Uploading;
        Ok(())
    }

    /// Mark an uploading item complete
    pub fn complete(&mut self, id: UploadId, remote: RemoteRef) -> Result<()> {
        let item = self.transition(id, UploadStatus::Uploading, UploadStatus::Complete)?;
        item.status = UploadStatus::Complete;
        item.remote = Some(remote);
        Ok(())
    }

    /// Mark an uploading item failed and drop it from the queue
    pub fn fail(&mut self, id: UploadId) -> Result<UploadItem> {
        self.transition(id, UploadStatus::Uploading, UploadStatus::Failed)?;
        let mut item = self.take(id)?;
        item.status = UploadStatus::Failed;
        Ok(item)
    }

    /// Remove an item at the user's request, whatever its status
    pub fn remove(&mut self, id: UploadId) -> Result<UploadItem> {
        self.take(id)
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up an item
    pub fn get(&self, id: UploadId) -> Option<&UploadItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in selection order
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any item has not finished uploading
    pub fn has_pending(&self) -> bool {
        self.items
            .iter()
            .any(|i| i.status != UploadStatus::Complete)
    }

    /// Number of completed items
    pub fn completed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status == UploadStatus::Complete)
            .count()
    }

    /// Remote references of completed items, in selection order
    pub fn completed_refs(&self) -> Vec<RemoteRef> {
        self.items
            .iter()
            .filter_map(|i| i.remote.clone())
            .collect()
    }

    fn transition(
        &mut self,
        id: UploadId,
        from: UploadStatus,
        to: UploadStatus,
    ) -> Result<&mut UploadItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::UploadNotFound(id))?;

        if item.status != from {
            return Err(Error::UploadTransition {
                id,
                from: item.status,
                to,
            });
        }

        debug!(%id, %from, %to, "upload transition");
        Ok(item)
    }

    fn take(&mut self, id: UploadId) -> Result<UploadItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::UploadNotFound(id))?;
        Ok(self.items.remove(pos))
    }
}
