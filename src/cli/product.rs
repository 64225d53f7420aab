//! Product commands - add a listing, browse the catalog, suggest SKUs

use crate::cli::feedback::{CliFeedback, CliNavigator};
use crate::cli::style::{Stylize, check};
use crate::cli::{Context, file_handles, naira, read_values};
use anstream::println;
use cart_royal::error::Result;
use cart_royal::pages::AddProductPage;
use cart_royal::product::{Catalog, ProductFilter, VariantRecord, generate_sku};
use cart_royal::types::ProductStatus;
use std::path::{Path, PathBuf};

const FIELDS: [&str; 4] = ["name", "description", "productType", "categories"];

/// Run the product add command
///
/// Variant rows without a SKU get a suggested one.
pub async fn run_product_add(ctx: &Context, input: &Path, images: &[PathBuf]) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut page = AddProductPage::new(ctx.services());
    let values = read_values(input)?;

    for field in FIELDS {
        if let Some(value) = values.get(field) {
            page.set(field, value.clone());
        }
    }

    let records: Vec<VariantRecord> = match values.get("variants") {
        Some(raw) => serde_json::from_value(raw.clone())?,
        None => Vec::new(),
    };
    load_variants(&mut page, records)?;

    if !images.is_empty() {
        page.select_images(file_handles(images)?, &feedback).await?;
    }

    let receipt = page.submit(&feedback, &CliNavigator).await?;
    println!("{}", serde_json::to_string_pretty(&receipt.body)?);
    Ok(())
}

fn load_variants(page: &mut AddProductPage, records: Vec<VariantRecord>) -> Result<()> {
    let mut rng = rand::thread_rng();
    for (index, record) in records.into_iter().enumerate() {
        if index > 0 {
            page.add_variant();
        }
        let needs_sku = record.sku.trim().is_empty();
        *page.variant_mut(index)? = record;
        if !needs_sku {
            continue;
        }
        if let Some(sku) = page.generate_sku(index, &mut rng)? {
            println!("  Suggested SKU {} for variant {}", sku.accent(), index + 1);
        }
    }
    Ok(())
}

/// Run the product list command
pub fn run_product_list(
    search: Option<String>,
    status: Option<ProductStatus>,
    category: Option<String>,
) {
    let catalog = Catalog::demo();
    let filter = ProductFilter {
        search,
        status,
        category,
    };

    for listing in catalog.filter(&filter) {
        let status = match listing.status {
            ProductStatus::Approved => listing.status.success().to_string(),
            ProductStatus::Pending => listing.status.warn().for_stdout().to_string(),
            ProductStatus::Rejected => listing.status.error().for_stdout().to_string(),
            ProductStatus::Draft => listing.status.muted().to_string(),
        };
        println!(
            "{} {} {} {} {}",
            listing.id.muted(),
            listing.name.emphasis(),
            naira(listing.price).accent(),
            status,
            format!("stock {}, {} views", listing.stock, listing.views).muted()
        );
    }

    let stats = catalog.stats();
    println!(
        "{} {} total, {} approved, {} pending, {} rejected",
        check(),
        stats.total,
        stats.approved,
        stats.pending,
        stats.rejected
    );
}

/// Run the product sku command
pub fn run_product_sku(name: &str, color: &str, size: Option<&str>) {
    let sku = generate_sku(name, color, size.unwrap_or_default(), &mut rand::thread_rng());
    println!("{sku}");
}
