//! Statistics and overview commands

use crate::cli::naira;
use crate::cli::style::Stylize;
use anstream::println;
use cart_royal::pages::{DashboardOverview, StatisticsSummary};
use cart_royal::product::Catalog;

/// Run the statistics command
pub fn run_stats(top: usize) {
    let stats = StatisticsSummary::demo();

    println!("{}", "This year".emphasis());
    println!("  Total sales          {}", naira(stats.total_sales()).accent());
    println!("  Orders               {}", stats.total_orders().accent());
    println!("  Product views        {}", stats.total_views().accent());
    if let Some(aov) = stats.average_order_value() {
        println!("  Average order value  {}", naira(aov).accent());
    }
    if let Some(growth) = stats.sales_growth() {
        let direction = if growth >= 0.0 { "up" } else { "down" };
        println!(
            "  {}",
            format!("{direction} {:.1}% from last month", growth.abs()).muted()
        );
    }

    println!("{}", "Sales by category".emphasis());
    for category in &stats.categories {
        println!(
            "  {:<12} {:>3}% {}",
            category.name,
            category.share,
            naira(category.sales).accent()
        );
    }

    println!("{}", "Best sellers".emphasis());
    for product in stats.best_sellers(top) {
        println!(
            "  {} {} sold, {} {}",
            product.name,
            product.units_sold,
            naira(product.revenue).accent(),
            format!("{} views, rated {:.1}", product.views, product.rating).muted()
        );
    }

    println!("{}", "Recent activity".emphasis());
    for activity in &stats.recent_activity {
        println!("  {} {}", activity.time().muted(), activity);
    }
}

/// Run the overview command
pub fn run_overview() {
    let catalog = Catalog::demo();
    let overview =
        DashboardOverview::from_catalog(&catalog, DashboardOverview::DEMO_PENDING_ORDERS);
    let listings = overview.listings;

    println!("{}", "Overview".emphasis());
    println!("  Total earnings  {}", naira(overview.total_earnings).accent());
    println!("  Total views     {}", overview.total_views.accent());
    println!("  Pending orders  {}", overview.pending_orders.accent());
    println!(
        "  {}",
        format!(
            "{} total, {} approved, {} pending, {} rejected",
            listings.total, listings.approved, listings.pending, listings.rejected
        )
        .muted()
    );

    println!("{}", "Recent products".emphasis());
    for listing in catalog.recent(4) {
        println!(
            "  {} {} {} {}",
            listing.created_at.muted(),
            listing.name,
            naira(listing.price).accent(),
            listing.status
        );
    }
}
