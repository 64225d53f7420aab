//! Store statistics and the dashboard overview
//!
//! Both views are read-only summaries over mocked store data. Growth and
//! averages are derived here; the charts that plot them are not.

use crate::product::{Catalog, CatalogStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sales, orders and views for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Short month name
    pub month: String,
    /// Sales in naira
    pub sales: f64,
    /// Orders placed
    pub orders: u64,
    /// Product page views
    pub views: u64,
}

/// Share of sales taken by one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    /// Category name
    pub name: String,
    /// Percentage of all sales
    pub share: u8,
    /// Sales in naira
    pub sales: f64,
}

/// Sales performance of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    /// Product name
    pub name: String,
    /// Units sold
    pub units_sold: u64,
    /// Revenue in naira
    pub revenue: f64,
    /// Product page views
    pub views: u64,
    /// Average review rating out of 5
    pub rating: f64,
}

/// Something that recently happened in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    /// A product was bought
    Sale {
        /// Product name
        product: String,
        /// Sale amount in naira
        amount: f64,
        /// When, relative to now
        time: String,
    },
    /// A product page drew views
    View {
        /// Product name
        product: String,
        /// Number of views
        count: u64,
        /// When, relative to now
        time: String,
    },
    /// A buyer reviewed a product
    Review {
        /// Product name
        product: String,
        /// Stars out of 5
        rating: u8,
        /// When, relative to now
        time: String,
    },
}

impl Activity {
    /// When it happened, relative to now
    pub fn time(&self) -> &str {
        match self {
            Self::Sale { time, .. } | Self::View { time, .. } | Self::Review { time, .. } => time,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale { product, .. } => write!(f, "Sale: {product}"),
            Self::View { product, count, .. } => write!(f, "{count} views on {product}"),
            Self::Review {
                product, rating, ..
            } => write!(f, "{rating}-star review on {product}"),
        }
    }
}

/// The statistics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Oldest month first
    pub monthly: Vec<MonthlySales>,
    /// Sales split by category
    pub categories: Vec<CategorySales>,
    /// Product performance
    pub top_products: Vec<TopProduct>,
    /// Newest first
    pub recent_activity: Vec<Activity>,
}

impl StatisticsSummary {
    /// Mocked figures of the demo seller
    pub fn demo() -> Self {
        let monthly = [
            ("Jan", 45_000.0, 12, 450),
            ("Feb", 52_000.0, 15, 520),
            ("Mar", 48_000.0, 13, 480),
            ("Apr", 61_000.0, 18, 610),
            ("May", 55_000.0, 16, 550),
            ("Jun", 67_000.0, 20, 670),
            ("Jul", 72_000.0, 22, 720),
            ("Aug", 68_000.0, 19, 680),
            ("Sep", 75_000.0, 24, 750),
            ("Oct", 82_000.0, 26, 820),
            ("Nov", 78_000.0, 23, 780),
            ("Dec", 85_000.0, 28, 850),
        ]
        .into_iter()
        .map(|(month, sales, orders, views)| MonthlySales {
            month: month.to_string(),
            sales,
            orders,
            views,
        })
        .collect();

        let categories = [
            ("Electronics", 35, 245_000.0),
            ("Clothing", 25, 175_000.0),
            ("Sports", 20, 140_000.0),
            ("Accessories", 15, 105_000.0),
            ("Others", 5, 35_000.0),
        ]
        .into_iter()
        .map(|(name, share, sales)| CategorySales {
            name: name.to_string(),
            share,
            sales,
        })
        .collect();

        let top_products = [
            ("Nike Air Max 270", 45, 255_000.0, 1250, 4.8),
            ("iPhone 15 Pro", 32, 384_000.0, 980, 4.9),
            ("Samsung Galaxy Watch", 28, 168_000.0, 750, 4.6),
            ("MacBook Pro M3", 15, 375_000.0, 450, 4.7),
            ("Sony Headphones", 38, 171_000.0, 890, 4.5),
        ]
        .into_iter()
        .map(|(name, units_sold, revenue, views, rating)| TopProduct {
            name: name.to_string(),
            units_sold,
            revenue,
            views,
            rating,
        })
        .collect();

        let recent_activity = vec![
            Activity::Sale {
                product: "Nike Air Max 270".into(),
                amount: 85_000.0,
                time: "2 hours ago".into(),
            },
            Activity::View {
                product: "iPhone 15 Pro".into(),
                count: 15,
                time: "3 hours ago".into(),
            },
            Activity::Sale {
                product: "Samsung Galaxy Watch".into(),
                amount: 320_000.0,
                time: "5 hours ago".into(),
            },
            Activity::Review {
                product: "MacBook Pro M3".into(),
                rating: 5,
                time: "1 day ago".into(),
            },
            Activity::Sale {
                product: "Sony Headphones".into(),
                amount: 450_000.0,
                time: "1 day ago".into(),
            },
        ];

        Self {
            monthly,
            categories,
            top_products,
            recent_activity,
        }
    }

    /// Sales across every month
    pub fn total_sales(&self) -> f64 {
        self.monthly.iter().map(|m| m.sales).sum()
    }

    /// Orders across every month
    pub fn total_orders(&self) -> u64 {
        self.monthly.iter().map(|m| m.orders).sum()
    }

    /// Views across every month
    pub fn total_views(&self) -> u64 {
        self.monthly.iter().map(|m| m.views).sum()
    }

    /// Total sales over total orders; `None` without orders
    #[allow(clippy::cast_precision_loss)] // order counts stay far below 2^52
    pub fn average_order_value(&self) -> Option<f64> {
        match self.total_orders() {
            0 => None,
            orders => Some(self.total_sales() / orders as f64),
        }
    }

    /// Percentage change of the latest month's sales over the one before
    pub fn sales_growth(&self) -> Option<f64> {
        let [.., previous, current] = self.monthly.as_slice() else {
            return None;
        };
        if previous.sales.abs() < f64::EPSILON {
            return None;
        }
        Some((current.sales - previous.sales) / previous.sales * 100.0)
    }

    /// Up to `limit` products by units sold, then revenue
    pub fn best_sellers(&self, limit: usize) -> Vec<&TopProduct> {
        let mut products: Vec<&TopProduct> = self.top_products.iter().collect();
        products.sort_by(|a, b| {
            b.units_sold
                .cmp(&a.units_sold)
                .then(b.revenue.total_cmp(&a.revenue))
        });
        products.truncate(limit);
        products
    }
}

/// Headline numbers on the dashboard home page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    /// Listings by review status
    pub listings: CatalogStats,
    /// Page views across every listing
    pub total_views: u64,
    /// Revenue across every listing
    pub total_earnings: f64,
    /// Orders waiting to be fulfilled
    pub pending_orders: u64,
}

impl DashboardOverview {
    /// Pending orders of the demo seller
    pub const DEMO_PENDING_ORDERS: u64 = 8;

    /// Overview computed from the seller's listings
    pub fn from_catalog(catalog: &Catalog, pending_orders: u64) -> Self {
        let listings = catalog.listings();
        Self {
            listings: catalog.stats(),
            total_views: listings.iter().map(|l| l.views).sum(),
            total_earnings: listings.iter().map(|l| l.earnings).sum(),
            pending_orders,
        }
    }
}
