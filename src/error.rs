//! Error types for cart-royal

use crate::submit::GuardViolation;
use crate::upload::{UploadId, UploadKind, UploadStatus};
use crate::validate::ValidationErrors;
use thiserror::Error;

/// Errors raised by the dashboard workflows
#[derive(Debug, Error)]
pub enum Error {
    /// One or more fields failed their schema rules
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A schema definition is malformed
    #[error("invalid schema: {0}")]
    Schema(String),

    /// Selected file exceeds the size ceiling for its upload kind
    #[error("{}", .kind.too_large_message(.file, .limit_bytes))]
    UploadTooLarge {
        /// Which upload slot the file was selected for
        kind: UploadKind,
        /// File name as selected
        file: String,
        /// Maximum accepted size in bytes
        limit_bytes: u64,
    },

    /// The upload service rejected a file
    #[error("Failed to upload {0}")]
    UploadFailed(String),

    /// No queued upload with this id
    #[error("upload {0} not found")]
    UploadNotFound(UploadId),

    /// Upload status change not allowed by the state machine
    #[error("upload {id} cannot move from {from} to {to}")]
    UploadTransition {
        /// Upload being moved
        id: UploadId,
        /// Current status
        from: UploadStatus,
        /// Requested status
        to: UploadStatus,
    },

    /// Submission guard refused to start the submission
    #[error("{0}")]
    SubmissionBlocked(GuardViolation),

    /// Another submission of the same form is still pending
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// The form already reached its terminal success state
    #[error("form was already submitted")]
    AlreadySubmitted,

    /// Removing the only remaining variant
    #[error("At least one variant is required")]
    LastVariant,

    /// Variant position out of range
    #[error("variant {index} does not exist (have {len})")]
    VariantIndex {
        /// Requested position
        index: usize,
        /// Current list length
        len: usize,
    },

    /// Bank account id not on file
    #[error("bank account not found: {0}")]
    BankAccountNotFound(String),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
