//! Seller registration

use crate::error::{Error, Result};
use crate::pages::{Services, StoreBranding, validate_form};
use crate::submit::{Feedback, Navigator, Receipt, SubmissionPipeline};
use crate::types::{FileHandle, Route};
use crate::upload::UploadReport;
use crate::validate::{Form, FormState, FormValues, Schema, blank_as_none};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::info;

const FORM: &str = "register";

/// Shown once the registration request resolves
pub const REGISTERED: &str = "Registration successful! Please check your email for verification.";

static REGISTER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder(FORM)
        .text("email")
        .email("Please enter a valid email address")
        .text("password")
        .min_length(8, "Password must be at least 8 characters")
        .text("confirmPassword")
        .text("storeName")
        .min_length(2, "Store name must be at least 2 characters")
        .optional_text("cac")
        .text("address")
        .min_length(10, "Please provide a complete address")
        .text("phone")
        .min_length(10, "Please enter a valid phone number")
        .equal("password", "confirmPassword", "Passwords don't match")
        .build()
        .expect("register schema is well-formed")
});

/// A validated registration
///
/// Passwords are accepted for validation but never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// Login email
    pub email: String,
    /// Chosen password
    #[serde(skip_serializing)]
    pub password: String,
    /// Repeated password
    #[serde(skip_serializing)]
    pub confirm_password: String,
    /// Store display name
    pub store_name: String,
    /// CAC registration number
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cac: Option<String>,
    /// Business address
    pub address: String,
    /// Contact phone
    pub phone: String,
}

impl Form for RegisterForm {
    fn schema() -> &'static Schema {
        &REGISTER
    }
}

/// What the registration request carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    /// Seller details
    #[serde(flatten)]
    pub seller: RegisterForm,
    /// Uploaded store logo
    pub store_logo_url: Option<String>,
    /// Uploaded store background
    pub store_background_url: Option<String>,
}

/// The registration page
pub struct RegisterPage {
    services: Services,
    form: FormState,
    branding: StoreBranding,
    pipeline: SubmissionPipeline,
}

impl RegisterPage {
    /// Blank registration page
    pub fn new(services: Services) -> Self {
        let branding = StoreBranding::new(&services.settings.limits);
        let pipeline = services.pipeline(FORM, services.settings.delays.registration());
        Self {
            services,
            form: FormState::new(),
            branding,
            pipeline,
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

    /// Logo and background slots
    pub const fn branding(&self) -> &StoreBranding {
        &self.branding
    }

    /// Submission pipeline
    pub const fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }

    /// Select and upload the store logo
    pub async fn select_logo(
        &mut self,
        file: FileHandle,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        self.branding
            .select_logo(file, self.services.uploads.as_ref(), feedback)
            .await
    }

    /// Select and upload the store background
    pub async fn select_background(
        &mut self,
        file: FileHandle,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        self.branding
            .select_background(file, self.services.uploads.as_ref(), feedback)
            .await
    }

    /// Drop the store logo
    pub fn remove_logo(&mut self) {
        self.branding.remove_logo();
    }

    /// Drop the store background
    pub fn remove_background(&mut self) {
        self.branding.remove_background();
    }

    /// Validate, submit and leave for the login page
    pub async fn submit(
        &mut self,
        feedback: &dyn Feedback,
        navigator: &dyn Navigator,
    ) -> Result<Receipt> {
        let seller: RegisterForm = validate_form(&mut self.form, FORM, feedback).await?;

        if let Some(violation) = self.branding.check() {
            feedback.on_alert(&violation.to_string()).await;
            return Err(Error::SubmissionBlocked(violation));
        }

        let payload = RegistrationPayload {
            seller,
            store_logo_url: self.branding.logo_url(),
            store_background_url: self.branding.background_url(),
        };
        let receipt = self.pipeline.submit(&payload, feedback).await?;
        info!(email = %payload.seller.email, "seller registered");

        feedback.on_alert(REGISTERED).await;
        self.form.reset();
        self.branding.clear();
        navigator.navigate(Route::Login);

        Ok(receipt)
    }
}
