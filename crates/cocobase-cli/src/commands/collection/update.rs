//! Update collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Collection id
    pub id: String,

    /// New collection name
    #[arg(long)]
    pub name: Option<String>,

    /// New webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,
}

pub async fn run(args: UpdateArgs, overrides: &Overrides) -> Result<()> {
    let client = connect(overrides)?;

    let collection = client
        .update_collection(
            &args.id,
            args.name.as_deref(),
            args.webhook_url.as_deref(),
        )
        .await
        .context("Failed to update collection")?;

    output::document(&collection, false)?;
    output::success(&format!("Updated collection: {}", collection.id));

    Ok(())
}
