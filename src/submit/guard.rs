//! Pre-submission guards on upload state

use crate::upload::UploadQueue;
use std::fmt;

/// Reason a submission was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    /// A required upload slot has no completed file
    NoUploads,
    /// At least one file is still staged or uploading
    UploadsPending,
}

impl fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoUploads => "Please upload at least one product image",
            Self::UploadsPending => "Please wait for all images to finish uploading",
        };
        f.write_str(s)
    }
}

/// Check that a queue is ready for submission
///
/// With `require_one`, an empty queue blocks too.
pub fn check_uploads(queue: &UploadQueue, require_one: bool) -> Option<GuardViolation> {
    if require_one && queue.is_empty() {
        return Some(GuardViolation::NoUploads);
    }
    if queue.has_pending() {
        return Some(GuardViolation::UploadsPending);
    }
    if require_one && queue.completed_count() == 0 {
        return Some(GuardViolation::NoUploads);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadLimits;
    use crate::types::FileHandle;
    use crate::upload::{RemoteRef, UploadKind};

    fn queue() -> UploadQueue {
        UploadQueue::new(UploadKind::ProductImage, &UploadLimits::default())
    }

    #[test]
    fn test_empty_queue() {
        assert_eq!(check_uploads(&queue(), true), Some(GuardViolation::NoUploads));
        assert_eq!(check_uploads(&queue(), false), None);
    }

    #[test]
    fn test_pending_blocks_even_when_optional() {
        let mut q = queue();
        let id = q.stage(FileHandle::new("a.jpg", 1)).unwrap();
        q.start(id).unwrap();

        assert_eq!(check_uploads(&q, false), Some(GuardViolation::UploadsPending));
        assert_eq!(check_uploads(&q, true), Some(GuardViolation::UploadsPending));

        q.complete(
            id,
            RemoteRef {
                url: "mock://a".into(),
                public_id: "a".into(),
            },
        )
        .unwrap();
        assert_eq!(check_uploads(&q, true), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            GuardViolation::NoUploads.to_string(),
            "Please upload at least one product image"
        );
        assert_eq!(
            GuardViolation::UploadsPending.to_string(),
            "Please wait for all images to finish uploading"
        );
    }
}
