//! Settings commands - account details, password and account deletion

use crate::cli::feedback::{CliFeedback, CliNavigator};
use crate::cli::{Context, read_values};
use anstream::println;
use cart_royal::error::{Error, Result};
use cart_royal::pages::SettingsPage;
use cart_royal::types::{FileHandle, Seller};
use dialoguer::Confirm;
use std::path::Path;

/// Run the settings account command
///
/// Prints the updated seller record.
pub async fn run_update_account(
    ctx: &Context,
    input: &Path,
    logo: Option<&Path>,
    background: Option<&Path>,
) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut seller = Seller::demo();
    let mut page = SettingsPage::new(ctx.services(), &seller);

    // Fields missing from the input keep the seller's current values
    let mut values = page.account_form().values().clone();
    let changes = read_values(input)?;
    for field in ["email", "phone", "storeName", "cac", "address"] {
        if let Some(value) = changes.get(field) {
            values.set(field, value.clone());
        }
    }
    page.fill_account(values);

    if let Some(path) = logo {
        page.select_logo(FileHandle::from_path(path)?, &feedback)
            .await?;
    }
    if let Some(path) = background {
        page.select_background(FileHandle::from_path(path)?, &feedback)
            .await?;
    }

    page.update_account(&mut seller, &feedback).await?;
    println!("{}", serde_json::to_string_pretty(&seller)?);
    Ok(())
}

/// Run the settings password command
pub async fn run_change_password(ctx: &Context, input: &Path) -> Result<()> {
    let feedback = CliFeedback::new();
    let seller = Seller::demo();
    let mut page = SettingsPage::new(ctx.services(), &seller);
    page.fill_password(read_values(input)?);
    page.change_password(&feedback).await?;
    Ok(())
}

/// Run the settings delete-account command
///
/// Asks for confirmation unless `yes` is set.
pub async fn run_delete_account(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete your account? This cannot be undone.")
            .default(false)
            .interact()
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let feedback = CliFeedback::new();
    let seller = Seller::demo();
    let mut page = SettingsPage::new(ctx.services(), &seller);
    page.delete_account(&seller, &feedback, &CliNavigator).await?;
    Ok(())
}
