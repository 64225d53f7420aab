//! Core types for cart-royal

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The signed-in seller
///
/// Pages that read or update the seller take it as an explicit argument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Seller ID
    pub id: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Store display name
    pub store_name: String,
    /// Corporate Affairs Commission registration number
    pub cac: Option<String>,
    /// Business address
    pub address: String,
    /// Remote URL of the store logo
    pub store_logo_url: Option<String>,
    /// Remote URL of the store background image
    pub store_background_url: Option<String>,
    /// Whether the marketplace verified this seller
    pub is_verified: bool,
    /// Date the seller joined
    pub joined_date: NaiveDate,
    /// Number of listed products
    pub total_products: u32,
    /// Number of completed sales
    pub total_sales: u32,
    /// Average customer rating (0-5)
    pub rating: f32,
}

impl Seller {
    /// The mocked seller used by the dashboard shell
    pub fn demo() -> Self {
        Self {
            id: "1".to_string(),
            email: "seller@example.com".to_string(),
            phone: "+234 801 234 5678".to_string(),
            store_name: "My Amazing Store".to_string(),
            cac: Some("RC123456789".to_string()),
            address: "123 Business Street, Victoria Island, Lagos, Nigeria".to_string(),
            store_logo_url: None,
            store_background_url: None,
            is_verified: true,
            joined_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            total_products: 24,
            total_sales: 156,
            rating: 4.8,
        }
    }
}

/// Navigation target handed to a `Navigator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Dashboard home
    Home,
    /// Login view
    Login,
    /// Product listings
    Products,
}

impl Route {
    /// Path for this route
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Products => "/products",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A user-selected file, as returned by a file picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// File name including extension
    pub name: String,
    /// Size in bytes
    pub size_bytes: u64,
}

impl FileHandle {
    /// Create a handle from name and size
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Create a handle for a file on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(name, meta.len()))
    }
}

/// Review status of a product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Live on the marketplace
    Approved,
    /// Awaiting review
    Pending,
    /// Rejected by review
    Rejected,
    /// Saved but not yet sent for review
    Draft,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Draft => "draft",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            "draft" => Ok(Self::Draft),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}
