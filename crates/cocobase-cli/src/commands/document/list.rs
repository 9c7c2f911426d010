//! List documents command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::filter::{self, FilterArg};
use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection id
    pub collection: String,

    /// Filter predicate, repeatable (e.g. age:greaterThan:18)
    #[arg(long = "filter", value_name = "FIELD:OPERATOR:VALUE")]
    pub filters: Vec<FilterArg>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, overrides: &Overrides) -> Result<()> {
    let query = filter::build(args.filters).context("Invalid filter")?;

    let client = connect(overrides)?;
    let records = client
        .list_documents(&args.collection, Some(&query))
        .await
        .context("Failed to list documents")?;

    if records.is_empty() {
        eprintln!("{}", "No documents found.".dimmed());
        return Ok(());
    }

    for record in &records {
        output::document(record, args.pretty)?;
    }

    Ok(())
}
