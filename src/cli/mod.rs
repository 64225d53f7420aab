//! CLI commands
//!
//! Command implementations for the `royal` binary. Each command drives one
//! dashboard page from JSON input files.

mod contact;
mod feedback;
mod finance;
mod product;
mod register;
mod seller;
mod settings;
mod stats;
mod style;

pub use contact::run_contact;
pub use finance::{run_add_account, run_finance_summary, run_withdraw};
pub use product::{run_product_add, run_product_list, run_product_sku};
pub use register::run_register;
pub use seller::run_seller;
pub use settings::{run_change_password, run_delete_account, run_update_account};
pub use stats::{run_overview, run_stats};

use cart_royal::clock::{Clock, InstantClock, TokioClock};
use cart_royal::config::Settings;
use cart_royal::error::Result;
use cart_royal::pages::Services;
use cart_royal::types::FileHandle;
use cart_royal::validate::FormValues;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Shared state of one CLI invocation
pub struct Context {
    services: Services,
}

impl Context {
    /// Load settings and pick the clock
    ///
    /// With `instant`, simulated delays are skipped.
    pub fn new(config: Option<&Path>, instant: bool) -> Result<Self> {
        let settings = Settings::load_or_default(config)?;
        let clock: Arc<dyn Clock> = if instant {
            Arc::new(InstantClock::new())
        } else {
            Arc::new(TokioClock)
        };
        debug!(?settings, instant, "loaded settings");
        Ok(Self {
            services: Services::simulated(clock, settings),
        })
    }

    fn services(&self) -> Services {
        self.services.clone()
    }
}

/// Read a JSON object of form values
fn read_values(path: &Path) -> Result<FormValues> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// File handles for files on disk
fn file_handles(paths: &[PathBuf]) -> Result<Vec<FileHandle>> {
    paths.iter().map(|p| FileHandle::from_path(p)).collect()
}

/// Format a naira amount with thousands separators
fn naira(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)] // display only
    let whole = amount.abs().round() as i64;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}₦{grouped}")
}
