//! Staged upload queue
//!
//! Tracks files selected for the store logo, store background and product
//! images through `staged → uploading → complete | failed`, independent of
//! the form they belong to.

mod batch;
mod queue;
mod service;

pub use batch::{UploadReport, upload_files};
pub use queue::UploadQueue;
pub use service::{SimulatedUploadService, UploadService};

use crate::types::FileHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upload slot a file was selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadKind {
    /// Store logo (single file)
    StoreLogo,
    /// Store background image (single file)
    StoreBackground,
    /// Product gallery image (any number)
    ProductImage,
}

impl UploadKind {
    /// Whether a new selection replaces the previous file
    pub const fn is_single(self) -> bool {
        !matches!(self, Self::ProductImage)
    }

    /// User-facing rejection message for an oversize file
    #[allow(clippy::trivially_copy_pass_by_ref)] // called from the error Display impl
    pub fn too_large_message(&self, file: &str, limit_bytes: &u64) -> String {
        let limit = size_label(*limit_bytes);
        match self {
            Self::StoreLogo => format!("Logo file size must be less than {limit}"),
            Self::StoreBackground => {
                format!("Background image file size must be less than {limit}")
            }
            Self::ProductImage => {
                format!("File {file} is too large. Maximum size is {limit}.")
            }
        }
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::StoreLogo => "logo",
            Self::StoreBackground => "background",
            Self::ProductImage => "image",
        }
    }
}

/// `5MB`, `1.5MB`, `512KB` or `900 bytes`
#[allow(clippy::cast_precision_loss)] // display only
fn size_label(bytes: u64) -> String {
    for (unit, scale) in [("MB", 1024 * 1024), ("KB", 1024)] {
        if bytes >= scale {
            return if bytes % scale == 0 {
                format!("{}{unit}", bytes / scale)
            } else {
                format!("{:.1}{unit}", bytes as f64 / scale as f64)
            };
        }
    }
    format!("{bytes} bytes")
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StoreLogo => "store logo",
            Self::StoreBackground => "store background",
            Self::ProductImage => "product image",
        };
        f.write_str(s)
    }
}

/// Queue-local identifier of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UploadId(pub u64);

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upload lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Selected, not yet sent
    Staged,
    /// Sent, waiting for the upload service
    Uploading,
    /// Stored remotely
    Complete,
    /// Rejected by the upload service
    Failed,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Staged => "staged",
            Self::Uploading => "uploading",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Where the upload service stored a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRef {
    /// Public URL
    pub url: String,
    /// Provider-side identifier
    pub public_id: String,
}

/// One file in an upload queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Queue-local id
    pub id: UploadId,
    /// The selected file
    pub source: FileHandle,
    /// Local-only display reference
    pub preview: String,
    /// Current status
    pub status: UploadStatus,
    /// Set once the upload completes
    pub remote: Option<RemoteRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label() {
        assert_eq!(size_label(5 * 1024 * 1024), "5MB");
        assert_eq!(size_label(1536 * 1024), "1.5MB");
        assert_eq!(size_label(512 * 1024), "512KB");
        assert_eq!(size_label(1024), "1KB");
        assert_eq!(size_label(900), "900 bytes");
    }

    #[test]
    fn test_sub_megabyte_limits_stay_readable() {
        assert_eq!(
            UploadKind::StoreLogo.too_large_message("crest.png", &(512 * 1024)),
            "Logo file size must be less than 512KB"
        );
        assert_eq!(
            UploadKind::ProductImage.too_large_message("front.jpg", &(5 * 1024 * 1024)),
            "File front.jpg is too large. Maximum size is 5MB."
        );
    }
}
