//! Delete document command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::commands::connect;
use crate::config::Overrides;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection id
    pub collection: String,

    /// Document id
    pub id: String,
}

pub async fn run(args: DeleteArgs, overrides: &Overrides) -> Result<()> {
    let client = connect(overrides)?;

    let deleted = client
        .delete_document(&args.collection, &args.id)
        .await
        .context("Failed to delete document")?;

    println!("{}", deleted);
    if deleted {
        output::success(&format!("Deleted document: {}", args.id));
    } else {
        output::error(&format!("Document not deleted: {}", args.id));
    }

    Ok(())
}
