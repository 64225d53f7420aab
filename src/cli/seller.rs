//! Seller command - show the signed-in seller

use crate::cli::style::{Stylize, check};
use anstream::println;
use cart_royal::types::Seller;

/// Run the seller command
pub fn run_seller() {
    let seller = Seller::demo();
    let verified = if seller.is_verified {
        format!(" {}", check())
    } else {
        String::new()
    };

    println!("{}{verified}", seller.store_name.emphasis());
    println!("  Email    {}", seller.email.accent());
    println!("  Phone    {}", seller.phone);
    println!("  Address  {}", seller.address);
    if let Some(cac) = &seller.cac {
        println!("  CAC      {cac}");
    }
    println!(
        "  {}",
        format!(
            "Joined {}, {} products, {} sales, rated {:.1}",
            seller.joined_date, seller.total_products, seller.total_sales, seller.rating
        )
        .muted()
    );
}
