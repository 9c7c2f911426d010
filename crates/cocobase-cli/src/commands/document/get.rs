//! Get document command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection id
    pub collection: String,

    /// Document id
    pub id: String,

    /// Print only this field, coerced to a string
    #[arg(long)]
    pub field: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, overrides: &Overrides) -> Result<()> {
    let client = connect(overrides)?;
    let record = client
        .get_document(&args.collection, &args.id)
        .await
        .context("Failed to get document")?;

    match &args.field {
        Some(key) => {
            let value = record
                .get_string(key)
                .with_context(|| format!("Document has no field '{key}'"))?;
            println!("{}", value);
        }
        None => output::document(&record, args.pretty)?,
    }

    Ok(())
}
