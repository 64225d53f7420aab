//! Form value factories
//!
//! Valid inputs for each dashboard form plus service wiring on an instant
//! clock. Tests override single fields with `FormValues::with`.

#![allow(dead_code)]

use cart_royal::clock::InstantClock;
use cart_royal::config::Settings;
use cart_royal::pages::Services;
use cart_royal::product::VariantRecord;
use cart_royal::upload::UploadService;
use cart_royal::validate::FormValues;
use serde_json::json;
use std::sync::Arc;

/// Registration values from the happy-path scenario
pub fn register_values() -> FormValues {
    FormValues::new()
        .with("email", "user@test.com")
        .with("password", "password123")
        .with("confirmPassword", "password123")
        .with("storeName", "My Store")
        .with("address", "123 Long Enough Address")
        .with("phone", "08012345678")
}

/// Valid contact message
pub fn contact_values() -> FormValues {
    FormValues::new()
        .with("name", "Ada Obi")
        .with("email", "ada@shop.ng")
        .with("subject", "Listing stuck in review")
        .with("category", "products")
        .with("message", "My product has been pending for three days.")
        .with("priority", "medium")
}

/// Valid product fields, without variants
pub fn product_fields() -> FormValues {
    FormValues::new()
        .with("name", "Nike Air Max 270")
        .with("description", "Lightweight running shoes with Air cushioning")
        .with("productType", "Shoes")
        .with("categories", json!(["Men", "Sport & Outdoor"]))
}

/// A filled variant row
pub fn variant(color: &str, size: &str, price: f64, stock: i64) -> VariantRecord {
    VariantRecord {
        color: color.to_string(),
        size: size.to_string(),
        price: price.into(),
        stock: stock.into(),
        sku: String::new(),
    }
}

/// Services on an instant clock with default settings
pub fn services(clock: Arc<InstantClock>, uploads: Arc<dyn UploadService>) -> Services {
    Services::new(clock, uploads, Settings::default())
}
