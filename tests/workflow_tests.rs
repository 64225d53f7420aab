//! Page workflows driven end to end through mock collaborators

mod common;

use cart_royal::clock::InstantClock;
use cart_royal::error::Error;
use cart_royal::pages::{AddProductPage, ContactPage, RegisterPage, SettingsPage};
use cart_royal::submit::{GuardViolation, SubmitState};
use cart_royal::types::{FileHandle, Route, Seller};
use cart_royal::upload::UploadStatus;
use cart_royal::validate::FormValues;
use common::fixtures::{contact_values, product_fields, register_values, services, variant};
use common::mock_services::{MockUploadService, RecordingFeedback, RecordingNavigator};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const MB: u64 = 1024 * 1024;

struct Harness {
    clock: Arc<InstantClock>,
    uploads: Arc<MockUploadService>,
    feedback: RecordingFeedback,
    navigator: RecordingNavigator,
}

impl Harness {
    fn new() -> Self {
        Self {
            clock: Arc::new(InstantClock::new()),
            uploads: Arc::new(MockUploadService::new()),
            feedback: RecordingFeedback::new(),
            navigator: RecordingNavigator::new(),
        }
    }

    fn services(&self) -> cart_royal::pages::Services {
        services(self.clock.clone(), self.uploads.clone())
    }

    fn product_page(&self) -> AddProductPage {
        let mut page = AddProductPage::new(self.services());
        for field in ["name", "description", "productType", "categories"] {
            page.set(field, product_fields().get(field).unwrap().clone());
        }
        page
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_happy_path_navigates_to_login() {
    let h = Harness::new();
    let mut page = RegisterPage::new(h.services());
    page.fill(register_values());

    let receipt = page.submit(&h.feedback, &h.navigator).await.unwrap();

    assert_eq!(h.navigator.routes(), vec![Route::Login]);
    assert_eq!(
        h.feedback.alerts(),
        vec!["Registration successful! Please check your email for verification.".to_string()]
    );
    assert_eq!(
        h.feedback.states("register"),
        vec![SubmitState::Submitting, SubmitState::Success]
    );
    assert_eq!(h.clock.slept(), vec![Duration::from_millis(3000)]);
    assert_eq!(receipt.body["email"], "user@test.com");
    assert!(receipt.body.get("password").is_none());
    assert!(page.form().values().is_empty());
}

#[tokio::test]
async fn test_register_second_submit_after_success_is_refused() {
    let h = Harness::new();
    let mut page = RegisterPage::new(h.services());
    page.fill(register_values());
    page.submit(&h.feedback, &h.navigator).await.unwrap();

    page.fill(register_values());
    assert!(matches!(
        page.submit(&h.feedback, &h.navigator).await,
        Err(Error::AlreadySubmitted)
    ));
    assert_eq!(h.navigator.routes().len(), 1);
}

#[tokio::test]
async fn test_register_password_mismatch_stays_idle() {
    let h = Harness::new();
    let mut page = RegisterPage::new(h.services());
    page.fill(register_values().with("confirmPassword", "password124"));

    let err = page.submit(&h.feedback, &h.navigator).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(page.form().error("confirmPassword"), Some("Passwords don't match"));
    assert_eq!(page.pipeline().state(), SubmitState::Idle);
    assert!(!h.feedback.submitted());
    assert!(h.navigator.routes().is_empty());
    assert!(h.feedback.alerts().is_empty());
}

#[tokio::test]
async fn test_register_missing_fields_report_required() {
    let h = Harness::new();
    let mut page = RegisterPage::new(h.services());
    page.set("email", "user@test.com");

    page.submit(&h.feedback, &h.navigator).await.unwrap_err();

    let errors = h.feedback.field_errors("register").unwrap();
    for field in ["password", "confirmPassword", "storeName", "address", "phone"] {
        assert_eq!(errors.all(field), vec!["Required"], "{field}");
    }
    assert!(!errors.contains("cac"));
    assert_eq!(errors.len(), 5);
}

#[tokio::test]
async fn test_register_carries_uploaded_branding() {
    let h = Harness::new();
    let mut page = RegisterPage::new(h.services());
    page.fill(register_values());

    page.select_logo(FileHandle::new("logo.png", MB), &h.feedback)
        .await
        .unwrap();
    let report = page
        .select_background(FileHandle::new("banner.jpg", 12 * MB), &h.feedback)
        .await
        .unwrap();
    assert_eq!(report.rejected, vec!["banner.jpg".to_string()]);

    let receipt = page.submit(&h.feedback, &h.navigator).await.unwrap();

    assert_eq!(receipt.body["storeLogoUrl"], "https://cdn.test/1/logo.png");
    assert!(receipt.body["storeBackgroundUrl"].is_null());
    assert_eq!(
        h.feedback.alerts()[0],
        "Background image file size must be less than 10MB"
    );
    assert_eq!(h.uploads.get_upload_calls(), vec!["logo.png".to_string()]);
}

// =============================================================================
// Add product
// =============================================================================

#[tokio::test]
async fn test_blank_variant_and_no_images_report_together() {
    let h = Harness::new();
    let mut page = h.product_page();
    *page.variant_mut(0).unwrap() = variant("", "", 0.0, 0);

    let err = page.submit(&h.feedback, &h.navigator).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(page.errors().get("variants.0.color"), Some("Color is required"));
    assert_eq!(
        page.errors().get("variants.0.price"),
        Some("Price must be greater than 0")
    );
    assert!(!page.errors().contains("variants.0.stock"));
    assert_eq!(page.blocked(), Some(GuardViolation::NoUploads));
    assert_eq!(
        h.feedback.alerts(),
        vec!["Please upload at least one product image".to_string()]
    );
    assert!(!h.feedback.submitted());
}

#[tokio::test]
async fn test_remove_first_of_two_variants() {
    let h = Harness::new();
    let mut page = h.product_page();
    *page.variant_mut(0).unwrap() = variant("Red", "40", 1000.0, 2);
    let second = page.add_variant();
    *page.variant_mut(second).unwrap() = variant("Blue", "42", 2000.0, 3);

    page.remove_variant(0).unwrap();

    assert_eq!(page.variants().len(), 1);
    assert_eq!(page.variants().get(0), Some(&variant("Blue", "42", 2000.0, 3)));
    assert!(matches!(page.remove_variant(0), Err(Error::LastVariant)));
}

#[tokio::test]
async fn test_add_product_happy_path() {
    let h = Harness::new();
    let mut page = h.product_page();
    *page.variant_mut(0).unwrap() = variant("Black", "42", 85000.0, 25);
    let i = page.add_variant();
    *page.variant_mut(i).unwrap() = variant("White", "", 90000.0, 5);

    page.select_images(
        vec![FileHandle::new("front.jpg", MB), FileHandle::new("side.jpg", MB)],
        &h.feedback,
    )
    .await
    .unwrap();

    let receipt = page.submit(&h.feedback, &h.navigator).await.unwrap();

    assert_eq!(h.navigator.routes(), vec![Route::Products]);
    assert_eq!(h.feedback.alerts(), vec!["Product added successfully!".to_string()]);
    assert_eq!(receipt.body["status"], "draft");
    assert_eq!(receipt.body["productType"], "Shoes");
    assert_eq!(
        receipt.body["images"],
        json!(["https://cdn.test/1/front.jpg", "https://cdn.test/2/side.jpg"])
    );
    assert_eq!(receipt.body["variants"][1]["size"], json!(null));
    assert!(receipt.body.get("createdAt").is_some());

    // Page is blank again
    assert_eq!(page.variants().len(), 1);
    assert!(page.images().is_empty());
    assert!(page.categories().is_empty());
}

#[tokio::test]
async fn test_failed_upload_is_removed_and_others_continue() {
    let h = Harness::new();
    h.uploads.fail_file("broken.jpg");
    let mut page = h.product_page();

    let report = page
        .select_images(
            vec![
                FileHandle::new("a.jpg", 10),
                FileHandle::new("broken.jpg", 10),
                FileHandle::new("c.jpg", 10),
            ],
            &h.feedback,
        )
        .await
        .unwrap();

    assert_eq!(report.failed, vec!["broken.jpg".to_string()]);
    assert_eq!(report.completed.len(), 2);
    assert_eq!(page.images().len(), 2);
    assert!(!page.images().has_pending());
    assert_eq!(
        h.feedback.upload_statuses("broken.jpg"),
        vec![UploadStatus::Uploading, UploadStatus::Failed]
    );
    assert_eq!(h.feedback.alerts(), vec!["Failed to upload broken.jpg".to_string()]);
    assert_eq!(h.uploads.get_upload_calls().len(), 3);
}

#[tokio::test]
async fn test_uploads_complete_out_of_order() {
    let h = Harness::new();
    h.uploads.delay_file("slow.jpg", 5);
    let mut page = h.product_page();

    page.select_images(
        vec![FileHandle::new("slow.jpg", 10), FileHandle::new("fast.jpg", 10)],
        &h.feedback,
    )
    .await
    .unwrap();

    assert_eq!(
        h.uploads.get_completed(),
        vec!["fast.jpg".to_string(), "slow.jpg".to_string()]
    );
    let names: Vec<&str> = page
        .images()
        .items()
        .iter()
        .map(|i| i.source.name.as_str())
        .collect();
    assert_eq!(names, vec!["slow.jpg", "fast.jpg"]);
    assert!(page
        .images()
        .items()
        .iter()
        .all(|i| i.status == UploadStatus::Complete));
}

#[tokio::test]
async fn test_oversize_image_never_enters_queue() {
    let h = Harness::new();
    let mut page = h.product_page();

    let report = page
        .select_images(vec![FileHandle::new("huge.png", 6 * MB)], &h.feedback)
        .await
        .unwrap();

    assert_eq!(report.rejected, vec!["huge.png".to_string()]);
    assert!(page.images().is_empty());
    assert!(h.uploads.get_upload_calls().is_empty());
    assert_eq!(
        h.feedback.alerts(),
        vec!["File huge.png is too large. Maximum size is 5MB.".to_string()]
    );
}

#[tokio::test]
async fn test_abandoned_selection_blocks_submission() {
    let h = Harness::new();
    h.uploads.hold();
    let mut page = h.product_page();
    *page.variant_mut(0).unwrap() = variant("Black", "42", 85000.0, 25);

    {
        let selection = page.select_images(vec![FileHandle::new("a.jpg", 10)], &h.feedback);
        tokio::pin!(selection);
        assert!(futures::poll!(selection.as_mut()).is_pending());
    }
    assert!(page.images().has_pending());

    let err = page.submit(&h.feedback, &h.navigator).await.unwrap_err();

    assert!(matches!(
        err,
        Error::SubmissionBlocked(GuardViolation::UploadsPending)
    ));
    assert!(page.errors().is_empty());
    assert!(!h.feedback.submitted());

    // Removing the stuck image leaves nothing pending, but one image is required
    let stuck = page.images().items()[0].id;
    page.remove_image(stuck).unwrap();
    assert!(matches!(
        page.submit(&h.feedback, &h.navigator).await,
        Err(Error::SubmissionBlocked(GuardViolation::NoUploads))
    ));
}

// =============================================================================
// Contact and settings
// =============================================================================

#[tokio::test]
async fn test_contact_can_send_twice() {
    let h = Harness::new();
    let mut page = ContactPage::new(&h.services());

    page.fill(contact_values());
    page.submit(&h.feedback).await.unwrap();
    page.dismiss();
    page.fill(contact_values().with("priority", "critical"));
    page.submit(&h.feedback).await.unwrap();

    assert!(page.sent());
    assert_eq!(h.feedback.messages().len(), 2);
    assert_eq!(
        h.feedback.states("contact"),
        vec![
            SubmitState::Submitting,
            SubmitState::Success,
            SubmitState::Submitting,
            SubmitState::Success
        ]
    );
}

#[tokio::test]
async fn test_password_change_requires_matching_confirmation() {
    let h = Harness::new();
    let seller = Seller::demo();
    let mut page = SettingsPage::new(h.services(), &seller);
    let values = FormValues::new()
        .with("currentPassword", "old-password")
        .with("newPassword", "new-password")
        .with("confirmPassword", "new-passw0rd");

    page.fill_password(values.clone());
    page.change_password(&h.feedback).await.unwrap_err();
    assert_eq!(
        page.password_form().error("confirmPassword"),
        Some("Passwords don't match")
    );

    page.fill_password(values.with("confirmPassword", "new-password"));
    page.change_password(&h.feedback).await.unwrap();
    assert_eq!(
        h.feedback.alerts(),
        vec!["Password changed successfully!".to_string()]
    );
    assert!(page.password_form().values().is_empty());
}

#[tokio::test]
async fn test_delete_account_navigates_to_login() {
    let h = Harness::new();
    let seller = Seller::demo();
    let mut page = SettingsPage::new(h.services(), &seller);

    let receipt = page
        .delete_account(&seller, &h.feedback, &h.navigator)
        .await
        .unwrap();

    assert_eq!(receipt.body, json!({"id": "1"}));
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
    assert_eq!(h.clock.slept(), vec![Duration::from_millis(2000)]);
}
