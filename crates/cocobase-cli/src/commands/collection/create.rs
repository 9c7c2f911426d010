//! Create collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection name
    pub name: String,

    /// URL notified when documents change
    #[arg(long)]
    pub webhook_url: Option<String>,
}

pub async fn run(args: CreateArgs, overrides: &Overrides) -> Result<()> {
    let client = connect(overrides)?;

    let collection = client
        .create_collection(&args.name, args.webhook_url.as_deref())
        .await
        .context("Failed to create collection")?;

    output::document(&collection, false)?;
    output::success(&format!("Created collection: {}", collection.id));

    Ok(())
}
