//! Upload a batch of selected files through a queue

use crate::error::{Error, Result};
use crate::submit::Feedback;
use crate::types::FileHandle;
use crate::upload::{UploadId, UploadQueue, UploadService};
use futures::future::join_all;
use tracing::{debug, warn};

/// Outcome of one file selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Items that reached `complete`
    pub completed: Vec<UploadId>,
    /// Files the upload service rejected (removed from the queue)
    pub failed: Vec<String>,
    /// Files refused before staging because they were too large
    pub rejected: Vec<String>,
}

impl UploadReport {
    /// Whether every selected file ended up complete
    pub fn all_completed(&self) -> bool {
        self.failed.is_empty() && self.rejected.is_empty()
    }
}

/// Stage, start and upload every selected file
///
/// Oversize files are refused with an alert and skipped. The remaining
/// uploads run concurrently and settle in whatever order the service
/// resolves them; a failed upload is removed from the queue with an alert
/// and does not affect the others.
pub async fn upload_files(
    queue: &mut UploadQueue,
    files: Vec<FileHandle>,
    service: &dyn UploadService,
    feedback: &dyn Feedback,
) -> Result<UploadReport> {
    let mut report = UploadReport::default();
    let mut started = Vec::new();

    for file in files {
        match queue.stage(file.clone()) {
            Ok(id) => {
                queue.start(id)?;
                if let Some(item) = queue.get(id) {
                    feedback.on_upload(queue.kind(), item).await;
                }
                started.push((id, file));
            }
            Err(e @ Error::UploadTooLarge { .. }) => {
                warn!(file = %file.name, "refused oversize upload");
                feedback.on_alert(&e.to_string()).await;
                report.rejected.push(file.name);
            }
            Err(e) => return Err(e),
        }
    }

    let results = join_all(started.iter().map(|(id, file)| async move {
        (*id, file, service.upload(file).await)
    }))
    .await;

    for (id, file, result) in results {
        if queue.get(id).is_none() {
            debug!(%id, file = %file.name, "upload finished after item was removed");
            continue;
        }

        match result {
            Ok(remote) => {
                queue.complete(id, remote)?;
                if let Some(item) = queue.get(id) {
                    feedback.on_upload(queue.kind(), item).await;
                }
                report.completed.push(id);
            }
            Err(e) => {
                warn!(%id, file = %file.name, error = %e, "upload failed");
                let item = queue.fail(id)?;
                feedback.on_upload(queue.kind(), &item).await;
                feedback
                    .on_alert(&Error::UploadFailed(file.name.clone()).to_string())
                    .await;
                report.failed.push(file.name.clone());
            }
        }
    }

    Ok(report)
}
