//! Account settings page

use crate::error::{Error, Result};
use crate::pages::{Services, StoreBranding, validate_form};
use crate::submit::{Feedback, Navigator, Receipt, SubmissionPipeline};
use crate::types::{FileHandle, Route, Seller};
use crate::upload::UploadReport;
use crate::validate::{Form, FormState, FormValues, Schema, blank_as_none};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use tracing::info;

/// Shown once the account details are saved
pub const ACCOUNT_UPDATED: &str = "Account updated successfully!";

/// Shown once the password is changed
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";

static ACCOUNT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("account")
        .text("email")
        .email("Please enter a valid email address")
        .text("phone")
        .min_length(10, "Please enter a valid phone number")
        .text("storeName")
        .min_length(2, "Store name must be at least 2 characters")
        .optional_text("cac")
        .text("address")
        .min_length(10, "Please provide a complete address")
        .build()
        .expect("account schema is well-formed")
});

static PASSWORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("password")
        .text("currentPassword")
        .min_length(1, "Current password is required")
        .text("newPassword")
        .min_length(8, "New password must be at least 8 characters")
        .text("confirmPassword")
        .equal("newPassword", "confirmPassword", "Passwords don't match")
        .build()
        .expect("password schema is well-formed")
});

/// Validated account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Store display name
    pub store_name: String,
    /// CAC registration number
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cac: Option<String>,
    /// Business address
    pub address: String,
}

impl Form for AccountForm {
    fn schema() -> &'static Schema {
        &ACCOUNT
    }
}

/// A validated password change; never serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    /// Password in use
    #[serde(skip_serializing)]
    pub current_password: String,
    /// Replacement password
    #[serde(skip_serializing)]
    pub new_password: String,
    /// Replacement repeated
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

impl Form for PasswordForm {
    fn schema() -> &'static Schema {
        &PASSWORD
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountUpdate<'a> {
    #[serde(flatten)]
    account: &'a AccountForm,
    store_logo_url: Option<String>,
    store_background_url: Option<String>,
}

/// The settings page
pub struct SettingsPage {
    services: Services,
    account_form: FormState,
    password_form: FormState,
    branding: StoreBranding,
    account_pipeline: SubmissionPipeline,
    password_pipeline: SubmissionPipeline,
    delete_pipeline: SubmissionPipeline,
}

impl SettingsPage {
    /// Settings page pre-filled from the seller
    pub fn new(services: Services, seller: &Seller) -> Self {
        let delay = services.settings.delays.form();
        Self {
            account_form: FormState::with_values(account_values(seller)),
            password_form: FormState::new(),
            branding: StoreBranding::new(&services.settings.limits),
            account_pipeline: services.pipeline("account", delay),
            password_pipeline: services.pipeline("password", delay),
            delete_pipeline: services.pipeline("delete account", delay),
            services,
        }
    }

    /// Account form
    pub const fn account_form(&self) -> &FormState {
        &self.account_form
    }

    /// Password form
    pub const fn password_form(&self) -> &FormState {
        &self.password_form
    }

    /// Logo and background slots
    pub const fn branding(&self) -> &StoreBranding {
        &self.branding
    }

    /// Set one account field
    pub fn set_account(&mut self, field: &str, value: impl Into<serde_json::Value>) {
        self.account_form.set(field, value);
    }

    /// Replace the account fields
    pub fn fill_account(&mut self, values: FormValues) {
        self.account_form.fill(values);
    }

    /// Replace the password fields
    pub fn fill_password(&mut self, values: FormValues) {
        self.password_form.fill(values);
    }

    /// Select and upload a new store logo
    pub async fn select_logo(
        &mut self,
        file: FileHandle,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        self.branding
            .select_logo(file, self.services.uploads.as_ref(), feedback)
            .await
    }

    /// Select and upload a new store background
    pub async fn select_background(
        &mut self,
        file: FileHandle,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        self.branding
            .select_background(file, self.services.uploads.as_ref(), feedback)
            .await
    }

    /// Validate and save the account details into `seller`
    ///
    /// Newly uploaded branding replaces the seller's; untouched slots keep
    /// the current URLs.
    pub async fn update_account(
        &mut self,
        seller: &mut Seller,
        feedback: &dyn Feedback,
    ) -> Result<Receipt> {
        let account: AccountForm = validate_form(&mut self.account_form, "account", feedback).await?;

        if let Some(violation) = self.branding.check() {
            feedback.on_alert(&violation.to_string()).await;
            return Err(Error::SubmissionBlocked(violation));
        }

        let update = AccountUpdate {
            account: &account,
            store_logo_url: self.branding.logo_url(),
            store_background_url: self.branding.background_url(),
        };
        let receipt = self.account_pipeline.submit(&update, feedback).await?;

        if let Some(url) = update.store_logo_url {
            seller.store_logo_url = Some(url);
        }
        if let Some(url) = update.store_background_url {
            seller.store_background_url = Some(url);
        }
        seller.email = account.email;
        seller.phone = account.phone;
        seller.store_name = account.store_name;
        seller.cac = account.cac;
        seller.address = account.address;
        info!(seller = %seller.id, "account updated");

        self.account_form = FormState::with_values(account_values(seller));
        self.branding.clear();
        self.account_pipeline.reset();
        feedback.on_alert(ACCOUNT_UPDATED).await;

        Ok(receipt)
    }

    /// Validate and change the password
    pub async fn change_password(&mut self, feedback: &dyn Feedback) -> Result<Receipt> {
        let change: PasswordForm =
            validate_form(&mut self.password_form, "password", feedback).await?;
        let receipt = self.password_pipeline.submit(&change, feedback).await?;
        info!("password changed");

        self.password_form.reset();
        self.password_pipeline.reset();
        feedback.on_alert(PASSWORD_CHANGED).await;

        Ok(receipt)
    }

    /// Delete the seller's account and leave for the login page
    pub async fn delete_account(
        &mut self,
        seller: &Seller,
        feedback: &dyn Feedback,
        navigator: &dyn Navigator,
    ) -> Result<Receipt> {
        let receipt = self
            .delete_pipeline
            .submit(&json!({ "id": seller.id }), feedback)
            .await?;
        info!(seller = %seller.id, "account deleted");

        navigator.navigate(Route::Login);
        Ok(receipt)
    }
}

fn account_values(seller: &Seller) -> FormValues {
    FormValues::new()
        .with("email", seller.email.as_str())
        .with("phone", seller.phone.as_str())
        .with("storeName", seller.store_name.as_str())
        .with("cac", seller.cac.clone().unwrap_or_default())
        .with("address", seller.address.as_str())
}
