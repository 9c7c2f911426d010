//! Document subcommand implementations.

mod create;
mod delete;
mod filter;
mod get;
mod list;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Overrides;

#[derive(Args, Debug)]
pub struct DocumentCommand {
    #[command(subcommand)]
    pub command: DocumentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentSubcommand {
    /// Create a new document in a collection
    Create(create::CreateArgs),

    /// List documents in a collection
    List(list::ListArgs),

    /// Fetch a single document
    Get(get::GetArgs),

    /// Replace a document's fields
    Update(update::UpdateArgs),

    /// Delete a document
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: DocumentCommand, overrides: &Overrides) -> Result<()> {
    match cmd.command {
        DocumentSubcommand::Create(args) => create::run(args, overrides).await,
        DocumentSubcommand::List(args) => list::run(args, overrides).await,
        DocumentSubcommand::Get(args) => get::run(args, overrides).await,
        DocumentSubcommand::Update(args) => update::run(args, overrides).await,
        DocumentSubcommand::Delete(args) => delete::run(args, overrides).await,
    }
}
