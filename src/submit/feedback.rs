//! Feedback and navigation traits for interface-agnostic updates
//!
//! Pages report progress, alerts and field errors through [`Feedback`] and
//! leave the page through a [`Navigator`], so the same workflow can drive a
//! terminal, a test recorder or a real UI.

use crate::submit::SubmitState;
use crate::types::Route;
use crate::upload::{UploadItem, UploadKind};
use crate::validate::ValidationErrors;
use async_trait::async_trait;

/// User-visible feedback sink
#[async_trait]
pub trait Feedback: Send + Sync {
    /// Called when a form's submission state changes
    async fn on_state(&self, form: &str, state: SubmitState);

    /// Called when an upload changes status
    async fn on_upload(&self, kind: UploadKind, item: &UploadItem);

    /// Called with the inline errors of a failed validation
    async fn on_field_errors(&self, form: &str, errors: &ValidationErrors);

    /// Called with a blocking alert message
    async fn on_alert(&self, message: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op feedback for tests or headless use
pub struct NoopFeedback;

#[async_trait]
impl Feedback for NoopFeedback {
    async fn on_state(&self, _form: &str, _state: SubmitState) {}
    async fn on_upload(&self, _kind: UploadKind, _item: &UploadItem) {}
    async fn on_field_errors(&self, _form: &str, _errors: &ValidationErrors) {}
    async fn on_alert(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}

/// Routing service invoked after a successful submission
pub trait Navigator: Send + Sync {
    /// Leave the current page for `route`
    fn navigate(&self, route: Route);
}
