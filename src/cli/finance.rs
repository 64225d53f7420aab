//! Finance commands - balances, bank accounts and withdrawals

use crate::cli::feedback::CliFeedback;
use crate::cli::style::Stylize;
use crate::cli::{Context, naira, read_values};
use anstream::println;
use cart_royal::error::Result;
use cart_royal::pages::{FinancePage, TransactionStatus};
use cart_royal::validate::FormValues;
use std::path::Path;

/// Run the finance summary command
pub fn run_finance_summary(ctx: &Context) {
    let page = FinancePage::demo(&ctx.services);
    let summary = page.summary();

    println!("{}", "Balances".emphasis());
    println!("  Total earnings     {}", naira(summary.total_earnings).accent());
    println!("  Available balance  {}", naira(summary.available_balance).accent());
    println!("  Pending balance    {}", naira(summary.pending_balance).accent());
    println!("  Total withdrawn    {}", naira(summary.total_withdrawn).accent());
    if let Some(growth) = summary.earnings_growth() {
        let direction = if growth >= 0.0 { "up" } else { "down" };
        println!(
            "  {}",
            format!("{direction} {:.1}% from last month", growth.abs()).muted()
        );
    }

    println!("{}", "Bank accounts".emphasis());
    for account in page.accounts() {
        let default = if account.is_default { " (default)" } else { "" };
        println!(
            "  {} {} {} • {}{}",
            account.id.muted(),
            account.bank_name,
            account.account_number.accent(),
            account.account_type,
            default.success()
        );
    }

    println!("{}", "Recent transactions".emphasis());
    for tx in page.transactions() {
        let status = match tx.status {
            TransactionStatus::Completed => tx.status.success().to_string(),
            TransactionStatus::Pending | TransactionStatus::Processing => {
                tx.status.warn().for_stdout().to_string()
            }
            TransactionStatus::Failed => tx.status.error().for_stdout().to_string(),
        };
        println!(
            "  {} {} {} {}",
            tx.date.muted(),
            tx.description,
            naira(tx.amount).accent(),
            status
        );
    }
}

/// Run the finance add-account command
pub async fn run_add_account(ctx: &Context, input: &Path) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut page = FinancePage::demo(&ctx.services);
    page.fill_account(read_values(input)?);

    let account = page.add_account(&feedback).await?;
    println!(
        "  {} {} {}",
        account.id.muted(),
        account.bank_name.emphasis(),
        account.account_number.accent()
    );
    Ok(())
}

/// Run the finance withdraw command
pub async fn run_withdraw(ctx: &Context, amount: f64, account: &str) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut page = FinancePage::demo(&ctx.services);
    page.fill_withdrawal(
        FormValues::new()
            .with("amount", amount)
            .with("bankAccountId", account),
    );

    let tx = page.withdraw(&feedback).await?;
    println!(
        "  {} {} {}",
        tx.description,
        naira(tx.amount).accent(),
        tx.status.warn().for_stdout()
    );
    Ok(())
}
