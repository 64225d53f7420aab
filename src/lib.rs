//! cart-royal - Seller dashboard core for the Cart Royal marketplace
//!
//! Form validation, product variants, staged uploads and a mock submission
//! pipeline, wired together per dashboard page. All data lives in memory.

pub mod clock;
pub mod config;
pub mod error;
pub mod pages;
pub mod product;
pub mod submit;
pub mod types;
pub mod upload;
pub mod validate;
