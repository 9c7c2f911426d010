//! Create document command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Map;

use crate::commands::{connect, input};
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection id
    pub collection: String,

    /// JSON file with the document fields (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: CreateArgs, overrides: &Overrides) -> Result<()> {
    let fields = match &args.json {
        Some(path) => input::read_object(path)?,
        None => Map::new(),
    };

    let client = connect(overrides)?;
    let record = client
        .create_document(&args.collection, &fields)
        .await
        .context("Failed to create document")?;

    output::document(&record, args.pretty)?;
    output::success(&format!("Created document: {}", record.id()));

    Ok(())
}
