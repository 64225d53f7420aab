//! royal - Cart Royal seller dashboard
//!
//! CLI binary that runs the dashboard pages against JSON input files.

use anyhow::Result;
use cart_royal::types::ProductStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "royal")]
#[command(about = "Cart Royal seller dashboard")]
#[command(version)]
struct Cli {
    /// Settings file (JSON) overriding upload limits and delays
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip simulated delays
    #[arg(long, global = true)]
    instant: bool,

    /// Log workflow details to stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new seller
    Register {
        /// Registration form values (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Store logo image
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Store background image
        #[arg(long)]
        background: Option<PathBuf>,
    },

    /// Product listings
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Send a message to seller support
    Contact {
        /// Contact form values (JSON)
        #[arg(long)]
        input: PathBuf,
    },

    /// Balances, bank accounts and withdrawals
    Finance {
        #[command(subcommand)]
        action: FinanceAction,
    },

    /// Account settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Sales, orders and views over the year
    Stats {
        /// How many best sellers to show
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Dashboard home: listing counts and recent products
    Overview,

    /// Show the signed-in seller
    Seller,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product listing
    Add {
        /// Product form values with variants (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Product image (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },

    /// List the seller's products
    List {
        /// Match name or product type
        #[arg(long)]
        search: Option<String>,

        /// Only listings with this status
        #[arg(long)]
        status: Option<ProductStatus>,

        /// Only listings in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Suggest a SKU
    Sku {
        /// Product name
        #[arg(long)]
        name: String,

        /// Variant color
        #[arg(long)]
        color: String,

        /// Variant size
        #[arg(long)]
        size: Option<String>,
    },
}

#[derive(Subcommand)]
enum FinanceAction {
    /// Show balances, bank accounts and transactions
    Summary,

    /// Add a bank account
    AddAccount {
        /// Bank account form values (JSON)
        #[arg(long)]
        input: PathBuf,
    },

    /// Request a withdrawal
    Withdraw {
        /// Amount in naira
        #[arg(long)]
        amount: f64,

        /// Destination bank account id
        #[arg(long)]
        account: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Update account details
    Account {
        /// Account form values (JSON)
        #[arg(long)]
        input: PathBuf,

        /// New store logo image
        #[arg(long)]
        logo: Option<PathBuf>,

        /// New store background image
        #[arg(long)]
        background: Option<PathBuf>,
    },

    /// Change the password
    Password {
        /// Password form values (JSON)
        #[arg(long)]
        input: PathBuf,
    },

    /// Delete the account
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = if verbose == 0 { "warn" } else { "debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = cli::Context::new(cli.config.as_deref(), cli.instant)?;

    match cli.command {
        Commands::Register {
            input,
            logo,
            background,
        } => {
            cli::run_register(&ctx, &input, logo.as_deref(), background.as_deref()).await?;
        }
        Commands::Product { action } => match action {
            ProductAction::Add { input, images } => {
                cli::run_product_add(&ctx, &input, &images).await?;
            }
            ProductAction::List {
                search,
                status,
                category,
            } => cli::run_product_list(search, status, category),
            ProductAction::Sku { name, color, size } => {
                cli::run_product_sku(&name, &color, size.as_deref());
            }
        },
        Commands::Contact { input } => cli::run_contact(&ctx, &input).await?,
        Commands::Finance { action } => match action {
            FinanceAction::Summary => cli::run_finance_summary(&ctx),
            FinanceAction::AddAccount { input } => cli::run_add_account(&ctx, &input).await?,
            FinanceAction::Withdraw { amount, account } => {
                cli::run_withdraw(&ctx, amount, &account).await?;
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Account {
                input,
                logo,
                background,
            } => {
                cli::run_update_account(&ctx, &input, logo.as_deref(), background.as_deref())
                    .await?;
            }
            SettingsAction::Password { input } => cli::run_change_password(&ctx, &input).await?,
            SettingsAction::DeleteAccount { yes } => cli::run_delete_account(&ctx, yes).await?,
        },
        Commands::Stats { top } => cli::run_stats(top),
        Commands::Overview => cli::run_overview(),
        Commands::Seller => cli::run_seller(),
    }

    Ok(())
}
