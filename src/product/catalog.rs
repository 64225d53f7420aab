//! Seller product listings

use crate::types::ProductStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One listing as shown in the products table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    /// Listing ID
    pub id: String,
    /// Product name
    pub name: String,
    /// Product type
    pub product_type: String,
    /// Marketplace categories
    pub categories: Vec<String>,
    /// Review status
    pub status: ProductStatus,
    /// Lowest variant price in naira
    pub price: f64,
    /// Units in stock across variants
    pub stock: u64,
    /// Page views
    pub views: u64,
    /// Revenue to date in naira
    pub earnings: f64,
    /// Image URLs
    pub images: Vec<String>,
    /// Creation date
    pub created_at: NaiveDate,
    /// Last update date
    pub updated_at: NaiveDate,
}

/// Filters applied to the products table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive match on name or product type
    pub search: Option<String>,
    /// Only listings with this status
    pub status: Option<ProductStatus>,
    /// Only listings in this category
    pub category: Option<String>,
}

impl ProductFilter {
    /// Whether a listing passes every active filter
    pub fn matches(&self, listing: &ProductListing) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            listing.name.to_lowercase().contains(&term)
                || listing.product_type.to_lowercase().contains(&term)
        });
        let status_ok = self.status.is_none_or(|s| listing.status == s);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| listing.categories.iter().any(|lc| lc == c));

        search_ok && status_ok && category_ok
    }
}

/// Listing counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Every listing
    pub total: usize,
    /// Live listings
    pub approved: usize,
    /// Awaiting review
    pub pending: usize,
    /// Rejected by review
    pub rejected: usize,
}

/// The seller's product listings
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<ProductListing>,
}

impl Catalog {
    /// Catalog from listings
    pub const fn new(listings: Vec<ProductListing>) -> Self {
        Self { listings }
    }

    /// The mocked listings of the demo seller
    pub fn demo() -> Self {
        let rows: [(&str, &str, &str, &[&str], ProductStatus, f64, u64, u64, f64, u32); 6] = [
            ("1", "Nike Air Max 270 Running Shoes", "Shoes", &["Men", "Sport & Outdoor"], ProductStatus::Approved, 85_000.0, 25, 145, 255_000.0, 15),
            ("2", "iPhone 15 Pro Max 256GB", "Phone", &["Electronics", "Phones & Tablets"], ProductStatus::Pending, 1_200_000.0, 10, 89, 0.0, 14),
            ("3", "Samsung Galaxy Watch 6", "Watch", &["Electronics", "Accessories"], ProductStatus::Approved, 320_000.0, 15, 67, 960_000.0, 13),
            ("4", "MacBook Pro M3 14-inch", "Laptop", &["Electronics", "Office & Stationaries"], ProductStatus::Rejected, 2_500_000.0, 5, 34, 0.0, 12),
            ("5", "Adidas Ultraboost 22", "Shoes", &["Men", "Women", "Sport & Outdoor"], ProductStatus::Approved, 95_000.0, 30, 78, 190_000.0, 11),
            ("6", "Sony WH-1000XM5 Headphones", "Electronics", &["Electronics", "Accessories"], ProductStatus::Pending, 450_000.0, 12, 56, 0.0, 10),
        ];

        let listings = rows
            .into_iter()
            .map(|(id, name, product_type, categories, status, price, stock, views, earnings, day)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default();
                ProductListing {
                    id: id.to_string(),
                    name: name.to_string(),
                    product_type: product_type.to_string(),
                    categories: categories.iter().map(ToString::to_string).collect(),
                    status,
                    price,
                    stock,
                    views,
                    earnings,
                    images: vec![format!("https://example.com/image{id}.jpg")],
                    created_at: date,
                    updated_at: date,
                }
            })
            .collect();

        Self { listings }
    }

    /// Every listing
    pub fn listings(&self) -> &[ProductListing] {
        &self.listings
    }

    /// Listings passing `filter`, in catalog order
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&ProductListing> {
        self.listings.iter().filter(|l| filter.matches(l)).collect()
    }

    /// Newest listings first, at most `limit`
    pub fn recent(&self, limit: usize) -> Vec<&ProductListing> {
        let mut recent: Vec<&ProductListing> = self.listings.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        recent
    }

    /// Counts by status
    pub fn stats(&self) -> CatalogStats {
        let count = |status| self.listings.iter().filter(|l| l.status == status).count();
        CatalogStats {
            total: self.listings.len(),
            approved: count(ProductStatus::Approved),
            pending: count(ProductStatus::Pending),
            rejected: count(ProductStatus::Rejected),
        }
    }

    /// Delete a listing by id
    pub fn remove(&mut self, id: &str) -> Option<ProductListing> {
        let pos = self.listings.iter().position(|l| l.id == id)?;
        Some(self.listings.remove(pos))
    }
}
