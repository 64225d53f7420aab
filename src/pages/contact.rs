//! Support contact page

use crate::error::Result;
use crate::pages::{Services, validate_form};
use crate::submit::{Feedback, Receipt, SubmissionPipeline};
use crate::validate::{Form, FormState, FormValues, Schema};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::info;

const FORM: &str = "contact";

/// Shown after a message is sent
pub const MESSAGE_SENT: &str =
    "Message Sent Successfully! We've received your message and will respond within 24 hours.";

/// Support categories as `(value, label)`
pub const CONTACT_CATEGORIES: &[(&str, &str)] = &[
    ("account", "Account Issues"),
    ("products", "Product Listings"),
    ("payments", "Payments & Withdrawals"),
    ("orders", "Order Management"),
    ("technical", "Technical Support"),
    ("policy", "Policy Questions"),
    ("feedback", "Feedback & Suggestions"),
    ("other", "Other"),
];

/// Priority levels as `(value, label)`
pub const PRIORITY_LEVELS: &[(&str, &str)] = &[
    ("low", "Low - General inquiry"),
    ("medium", "Medium - Need assistance"),
    ("high", "High - Urgent issue"),
    ("critical", "Critical - Account suspended"),
];

static CONTACT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder(FORM)
        .text("name")
        .min_length(2, "Name must be at least 2 characters")
        .text("email")
        .email("Please enter a valid email address")
        .text("subject")
        .min_length(1, "Please select a subject")
        .text("category")
        .min_length(1, "Please select a category")
        .text("message")
        .min_length(10, "Message must be at least 10 characters")
        .text("priority")
        .min_length(1, "Please select a priority level")
        .build()
        .expect("contact schema is well-formed")
});

/// A validated support message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Subject line
    pub subject: String,
    /// One of [`CONTACT_CATEGORIES`]
    pub category: String,
    /// Message body
    pub message: String,
    /// One of [`PRIORITY_LEVELS`]
    pub priority: String,
}

impl Form for ContactForm {
    fn schema() -> &'static Schema {
        &CONTACT
    }
}

/// The contact page
pub struct ContactPage {
    form: FormState,
    pipeline: SubmissionPipeline,
    sent: bool,
}

impl ContactPage {
    /// Blank contact page
    pub fn new(services: &Services) -> Self {
        Self {
            form: FormState::new(),
            pipeline: services.pipeline(FORM, services.settings.delays.form()),
            sent: false,
        }
    }

    /// Set one field
    pub fn set(&mut self, field: &str, value: impl Into<serde_json::Value>) {
        self.form.set(field, value);
    }

    /// Replace every field
    pub fn fill(&mut self, values: FormValues) {
        self.form.fill(values);
    }

    /// Form values and errors
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Whether the last message went through
    pub const fn sent(&self) -> bool {
        self.sent
    }

    /// Hide the confirmation banner
    pub fn dismiss(&mut self) {
        self.sent = false;
    }

    /// Validate and send the message; the page stays open for another one
    pub async fn submit(&mut self, feedback: &dyn Feedback) -> Result<Receipt> {
        let message: ContactForm = validate_form(&mut self.form, FORM, feedback).await?;
        let receipt = self.pipeline.submit(&message, feedback).await?;
        info!(category = %message.category, priority = %message.priority, "support message sent");

        self.sent = true;
        self.form.reset();
        self.pipeline.reset();
        feedback.on_message(MESSAGE_SENT).await;

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::InstantClock;
    use crate::config::Settings;
    use crate::submit::{NoopFeedback, SubmitState};
    use crate::validate::validate;
    use std::sync::Arc;

    fn values() -> FormValues {
        FormValues::new()
            .with("name", "Ada")
            .with("email", "ada@shop.ng")
            .with("subject", "Payout delay")
            .with("category", "payments")
            .with("message", "My withdrawal has been processing for a week.")
            .with("priority", "high")
    }

    #[test]
    fn test_short_message() {
        let errors = validate::<ContactForm>(&values().with("message", "help")).unwrap_err();
        assert_eq!(
            errors.get("message"),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn test_missing_selects() {
        let errors = validate::<ContactForm>(&values().with("category", "").with("priority", ""))
            .unwrap_err();
        assert_eq!(errors.get("category"), Some("Please select a category"));
        assert_eq!(errors.get("priority"), Some("Please select a priority level"));
    }

    #[tokio::test]
    async fn test_sent_and_ready_again() {
        let clock = Arc::new(InstantClock::new());
        let services = Services::simulated(clock.clone(), Settings::default());
        let mut page = ContactPage::new(&services);
        page.fill(values());

        page.submit(&NoopFeedback).await.unwrap();

        assert!(page.sent());
        assert!(page.form().values().is_empty());
        assert_eq!(page.pipeline.state(), SubmitState::Idle);
        assert_eq!(clock.slept(), vec![std::time::Duration::from_millis(2000)]);
    }
}
