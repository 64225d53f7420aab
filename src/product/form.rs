//! Product listing form

use crate::validate::{Form, Schema, blank_as_none};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VARIANT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("variant")
        .text("color")
        .min_length(1, "Color is required")
        .optional_text("size")
        .number("price")
        .min(1.0, "Price must be greater than 0")
        .number("stock")
        .min(0.0, "Stock cannot be negative")
        .whole_number("Stock must be a whole number")
        .optional_text("sku")
        .build()
        .expect("variant schema is well-formed")
});

static PRODUCT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("product")
        .text("name")
        .min_length(2, "Product name must be at least 2 characters")
        .text("description")
        .min_length(10, "Description must be at least 10 characters")
        .text("productType")
        .min_length(1, "Please select a product type")
        .text_list("categories")
        .min_items(1, "Please select at least one category")
        .records("variants", VARIANT.clone())
        .min_items(1, "At least one variant is required")
        .build()
        .expect("product schema is well-formed")
});

/// A validated variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Color name
    pub color: String,
    /// Size label
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size: Option<String>,
    /// Unit price in naira
    pub price: f64,
    /// Units in stock
    pub stock: u64,
    /// Stock keeping unit
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sku: Option<String>,
}

/// A validated product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    /// Product name
    pub name: String,
    /// Long description
    pub description: String,
    /// One of [`PRODUCT_TYPES`](crate::product::PRODUCT_TYPES)
    pub product_type: String,
    /// Selected marketplace categories
    pub categories: Vec<String>,
    /// At least one variant
    pub variants: Vec<Variant>,
}

impl Form for ProductForm {
    fn schema() -> &'static Schema {
        &PRODUCT
    }
}

impl ProductForm {
    /// Units in stock across every variant
    pub fn total_stock(&self) -> u64 {
        self.variants.iter().map(|v| v.stock).sum()
    }

    /// Lowest and highest variant price
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.variants.iter().map(|v| v.price).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}
