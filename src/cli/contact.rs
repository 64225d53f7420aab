//! Contact command - send a message to seller support

use crate::cli::feedback::CliFeedback;
use crate::cli::{Context, read_values};
use cart_royal::error::Result;
use cart_royal::pages::ContactPage;
use std::path::Path;

/// Run the contact command
pub async fn run_contact(ctx: &Context, input: &Path) -> Result<()> {
    let feedback = CliFeedback::new();
    let mut page = ContactPage::new(&ctx.services);
    page.fill(read_values(input)?);
    page.submit(&feedback).await?;
    Ok(())
}
