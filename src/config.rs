//! Dashboard settings
//!
//! Upload size ceilings and simulated delays. Every field has a default, so a
//! settings file only needs the values it overrides.

use crate::error::{Error, Result};
use crate::upload::UploadKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MB: u64 = 1024 * 1024;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upload size ceilings
    pub limits: UploadLimits,
    /// Simulated latencies
    pub delays: Delays,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid settings in {}: {e}", path.display())))
    }

    /// Load settings from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Maximum accepted file size per upload kind, in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Store logo ceiling
    pub store_logo_bytes: u64,
    /// Store background ceiling
    pub store_background_bytes: u64,
    /// Per product image ceiling
    pub product_image_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            store_logo_bytes: 5 * MB,
            store_background_bytes: 10 * MB,
            product_image_bytes: 5 * MB,
        }
    }
}

impl UploadLimits {
    /// Ceiling for the given upload kind
    pub const fn limit_for(&self, kind: UploadKind) -> u64 {
        match kind {
            UploadKind::StoreLogo => self.store_logo_bytes,
            UploadKind::StoreBackground => self.store_background_bytes,
            UploadKind::ProductImage => self.product_image_bytes,
        }
    }
}

/// Simulated latencies, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    /// Mock upload service
    pub upload_ms: u64,
    /// Seller registration
    pub registration_ms: u64,
    /// Product creation
    pub product_ms: u64,
    /// Every other form (contact, finance, settings)
    pub form_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            upload_ms: 1000,
            registration_ms: 3000,
            product_ms: 2000,
            form_ms: 2000,
        }
    }
}

impl Delays {
    /// Mock upload delay
    pub const fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    /// Registration submission delay
    pub const fn registration(&self) -> Duration {
        Duration::from_millis(self.registration_ms)
    }

    /// Product submission delay
    pub const fn product(&self) -> Duration {
        Duration::from_millis(self.product_ms)
    }

    /// Generic form submission delay
    pub const fn form(&self) -> Duration {
        Duration::from_millis(self.form_ms)
    }
}
