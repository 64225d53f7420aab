//! Register command - sign up a new seller

use crate::cli::feedback::{CliFeedback, CliNavigator};
use crate::cli::{Context, read_values};
use cart_royal::error::Result;
use cart_royal::pages::RegisterPage;
use cart_royal::types::FileHandle;
use std::path::Path;

/// Run the register command
pub async fn run_register(
    ctx: &Context,
    input: &Path,
    logo: Option<&Path>,
    background: Option<&Path>,
) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut page = RegisterPage::new(ctx.services());
    page.fill(read_values(input)?);

    if let Some(path) = logo {
        page.select_logo(FileHandle::from_path(path)?, &feedback)
            .await?;
    }
    if let Some(path) = background {
        page.select_background(FileHandle::from_path(path)?, &feedback)
            .await?;
    }

    page.submit(&feedback, &CliNavigator).await?;
    Ok(())
}
