//! Mock submission
//!
//! Handles the last step of every dashboard form:
//! 1. Guard - refuse to submit while uploads are unsettled
//! 2. Pipeline - send the validated payload through a simulated delay
//! 3. Feedback - report state changes, alerts and navigation

mod feedback;
mod guard;
mod pipeline;

pub use feedback::{Feedback, Navigator, NoopFeedback};
pub use guard::{GuardViolation, check_uploads};
pub use pipeline::{Receipt, SubmissionPipeline, SubmitState};
