//! Update document command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::{connect, input};
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Collection id
    pub collection: String,

    /// Document id
    pub id: String,

    /// JSON file with the new document fields (use - for stdin)
    #[arg(long)]
    pub json: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: UpdateArgs, overrides: &Overrides) -> Result<()> {
    let fields = input::read_object(&args.json)?;

    let client = connect(overrides)?;
    let record = client
        .update_document(&args.collection, &args.id, &fields)
        .await
        .context("Failed to update document")?;

    output::document(&record, args.pretty)?;
    output::success(&format!("Updated document: {}", record.id()));

    Ok(())
}
