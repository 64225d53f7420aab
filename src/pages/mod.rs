//! Dashboard pages
//!
//! Each page owns its form state, upload queues and submission pipeline and
//! wires them together:
//! 1. Validate - check the form values against the form's schema
//! 2. Guard - refuse to submit while uploads are unsettled
//! 3. Submit - send the payload through the mock pipeline
//! 4. Settle - alert, reset and navigate

mod add_product;
mod branding;
mod contact;
mod finance;
mod register;
mod settings;
mod statistics;

pub use add_product::{AddProductPage, ProductSubmission};
pub use branding::StoreBranding;
pub use contact::{CONTACT_CATEGORIES, ContactForm, ContactPage, PRIORITY_LEVELS};
pub use finance::{
    BankAccount, BankAccountForm, FinancePage, FinanceSummary, MonthlyEarnings, Transaction,
    TransactionKind, TransactionStatus, WithdrawalForm,
};
pub use register::{RegisterForm, RegisterPage, RegistrationPayload};
pub use settings::{AccountForm, PasswordForm, SettingsPage};
pub use statistics::{
    Activity, CategorySales, DashboardOverview, MonthlySales, StatisticsSummary, TopProduct,
};

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::submit::{Feedback, SubmissionPipeline};
use crate::upload::{SimulatedUploadService, UploadService};
use crate::validate::{Form, FormState};
use std::sync::Arc;
use std::time::Duration;

/// Collaborators shared by every page
#[derive(Clone)]
pub struct Services {
    /// Clock driving every simulated delay
    pub clock: Arc<dyn Clock>,
    /// Where selected files are uploaded
    pub uploads: Arc<dyn UploadService>,
    /// Limits and delays
    pub settings: Settings,
}

impl Services {
    /// Services with an explicit upload service
    pub fn new(clock: Arc<dyn Clock>, uploads: Arc<dyn UploadService>, settings: Settings) -> Self {
        Self {
            clock,
            uploads,
            settings,
        }
    }

    /// Services backed by the simulated upload service
    pub fn simulated(clock: Arc<dyn Clock>, settings: Settings) -> Self {
        let uploads = Arc::new(SimulatedUploadService::new(
            clock.clone(),
            settings.delays.upload(),
        ));
        Self::new(clock, uploads, settings)
    }

    fn pipeline(&self, form: &'static str, delay: Duration) -> SubmissionPipeline {
        SubmissionPipeline::new(form, self.clock.clone(), delay)
    }
}

/// Validate a page's form and report field errors on failure
async fn validate_form<F: Form>(
    state: &mut FormState,
    form: &str,
    feedback: &dyn Feedback,
) -> Result<F> {
    match state.validate::<F>() {
        Ok(valid) => Ok(valid),
        Err(errors) => {
            feedback.on_field_errors(form, &errors).await;
            Err(Error::Validation(errors))
        }
    }
}
