//! Products: listing form, variant rows and the seller's catalog

mod catalog;
mod form;
mod variants;

pub use catalog::{Catalog, CatalogStats, ProductFilter, ProductListing};
pub use form::{ProductForm, Variant};
pub use variants::{VariantList, VariantRecord, generate_sku};

/// Marketplace categories a product can be listed under
pub const CATEGORIES: &[&str] = &[
    "Men",
    "Women",
    "Kids & Mom",
    "Health & Beauty",
    "Phones & Tablets",
    "Toys & Games",
    "Sport & Outdoor",
    "Electronics",
    "Accessories",
    "Vehicles",
    "Office & Stationaries",
];

/// Product types offered in the add-product form
pub const PRODUCT_TYPES: &[&str] = &[
    "Shoes",
    "Clothing",
    "Laptop",
    "Washing Machine",
    "Phone",
    "Tablet",
    "Watch",
    "Bag",
    "Jewelry",
    "Book",
    "Toy",
    "Game",
    "Sports Equipment",
    "Car",
    "Motorcycle",
    "Office Supplies",
    "Furniture",
    "Electronics",
    "Beauty Products",
    "Health Products",
];
