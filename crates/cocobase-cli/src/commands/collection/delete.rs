//! Delete collection command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection id
    pub id: String,
}

pub async fn run(args: DeleteArgs, overrides: &Overrides) -> Result<()> {
    let client = connect(overrides)?;

    let deleted = client
        .delete_collection(&args.id)
        .await
        .context("Failed to delete collection")?;

    println!("{}", deleted);
    output::success(&format!("Deleted collection: {}", args.id));

    Ok(())
}
