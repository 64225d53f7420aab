//! Add-product page

use crate::error::{Error, Result};
use crate::pages::Services;
use crate::product::{ProductForm, VariantList, VariantRecord};
use crate::submit::{
    Feedback, GuardViolation, Navigator, Receipt, SubmissionPipeline, check_uploads,
};
use crate::types::{FileHandle, ProductStatus, Route};
use crate::upload::{UploadId, UploadItem, UploadKind, UploadQueue, UploadReport, upload_files};
use crate::validate::{FormState, FormValues, ValidationErrors};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

const FORM: &str = "product";

/// Shown once the product request resolves
pub const PRODUCT_ADDED: &str = "Product added successfully!";

/// What the add-product request carries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    /// Validated product fields and variants
    #[serde(flatten)]
    pub product: ProductForm,
    /// Uploaded image URLs, in selection order
    pub images: Vec<String>,
    /// Always `draft` for a new listing
    pub status: ProductStatus,
    /// When the listing was created
    pub created_at: DateTime<Utc>,
}

/// The add-product page
pub struct AddProductPage {
    services: Services,
    fields: FormState,
    variants: VariantList,
    images: UploadQueue,
    blocked: Option<GuardViolation>,
    pipeline: SubmissionPipeline,
}

impl AddProductPage {
    /// Blank page with one empty variant row
    pub fn new(services: Services) -> Self {
        let images = UploadQueue::new(UploadKind::ProductImage, &services.settings.limits);
        let pipeline = services.pipeline(FORM, services.settings.delays.product());
        Self {
            services,
            fields: FormState::with_values(blank_fields()),
            variants: VariantList::new(),
            images,
            blocked: None,
            pipeline,
        }
    }

    /// Set a product field (`name`, `description`, `productType`, `categories`)
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.set(field, value);
    }

    /// Select or deselect a category; returns whether it is now selected
    pub fn toggle_category(&mut self, category: &str) -> bool {
        let mut selected = self.fields.values().text_list("categories");
        let now_selected = if let Some(pos) = selected.iter().position(|c| c == category) {
            selected.remove(pos);
            false
        } else {
            selected.push(category.to_string());
            true
        };
        self.fields.set("categories", selected);
        now_selected
    }

    /// Currently selected categories
    pub fn categories(&self) -> Vec<String> {
        self.fields.values().text_list("categories")
    }

    /// Variant rows
    pub const fn variants(&self) -> &VariantList {
        &self.variants
    }

    /// Append an empty variant row
    pub fn add_variant(&mut self) -> usize {
        self.variants.add()
    }

    /// Edit the variant row at `index`
    pub fn variant_mut(&mut self, index: usize) -> Result<&mut VariantRecord> {
        self.variants.get_mut(index)
    }

    /// Delete the variant row at `index`; the last row cannot be deleted
    pub fn remove_variant(&mut self, index: usize) -> Result<VariantRecord> {
        self.variants.remove(index)
    }

    /// Suggest a SKU for the variant row at `index` from the product name
    pub fn generate_sku<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Result<Option<String>> {
        let name = self.fields.values().text("name").unwrap_or_default().to_string();
        self.variants.generate_sku(index, &name, rng)
    }

    /// Select and upload product images
    pub async fn select_images(
        &mut self,
        files: Vec<FileHandle>,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        upload_files(&mut self.images, files, self.services.uploads.as_ref(), feedback).await
    }

    /// Remove an image, whatever its upload status
    pub fn remove_image(&mut self, id: UploadId) -> Result<UploadItem> {
        self.images.remove(id)
    }

    /// Product image queue
    pub const fn images(&self) -> &UploadQueue {
        &self.images
    }

    /// Field errors from the last submit attempt
    pub const fn errors(&self) -> &ValidationErrors {
        self.fields.errors()
    }

    /// Upload guard that blocked the last submit attempt
    pub const fn blocked(&self) -> Option<GuardViolation> {
        self.blocked
    }

    /// Submission pipeline
    pub const fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }

    /// Product fields merged with the variant rows
    pub fn values(&self) -> Result<FormValues> {
        let variants = serde_json::to_value(self.variants.records())?;
        Ok(self.fields.values().clone().with("variants", variants))
    }

    /// Validate, check images, submit and leave for the product list
    ///
    /// Field errors and the image guard are evaluated together so both are
    /// reported from one attempt.
    pub async fn submit(
        &mut self,
        feedback: &dyn Feedback,
        navigator: &dyn Navigator,
    ) -> Result<Receipt> {
        let values = self.values()?;
        let validated = self.fields.validate_values::<ProductForm>(&values);
        self.blocked = check_uploads(&self.images, true);

        if let Err(errors) = &validated {
            feedback.on_field_errors(FORM, errors).await;
        }
        if let Some(violation) = self.blocked {
            feedback.on_alert(&violation.to_string()).await;
        }

        let product = match (validated, self.blocked) {
            (Err(errors), _) => return Err(Error::Validation(errors)),
            (Ok(_), Some(violation)) => return Err(Error::SubmissionBlocked(violation)),
            (Ok(product), None) => product,
        };

        let submission = ProductSubmission {
            product,
            images: self
                .images
                .completed_refs()
                .into_iter()
                .map(|r| r.url)
                .collect(),
            status: ProductStatus::Draft,
            created_at: self.services.clock.now(),
        };
        let receipt = self.pipeline.submit(&submission, feedback).await?;
        info!(
            name = %submission.product.name,
            variants = submission.product.variants.len(),
            images = submission.images.len(),
            "product added"
        );

        feedback.on_alert(PRODUCT_ADDED).await;
        self.reset();
        navigator.navigate(Route::Products);

        Ok(receipt)
    }

    /// Back to a blank page
    pub fn reset(&mut self) {
        self.fields = FormState::with_values(blank_fields());
        self.variants.reset();
        self.images.clear();
        self.blocked = None;
    }
}

fn blank_fields() -> FormValues {
    FormValues::new()
        .with("name", "")
        .with("description", "")
        .with("productType", "")
        .with("categories", json!([]))
}
