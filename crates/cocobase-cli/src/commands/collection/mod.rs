//! Collection subcommand implementations.

mod create;
mod delete;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Overrides;

#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// Create a new collection
    Create(create::CreateArgs),

    /// Rename a collection or change its webhook
    Update(update::UpdateArgs),

    /// Delete a collection
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: CollectionCommand, overrides: &Overrides) -> Result<()> {
    match cmd.command {
        CollectionSubcommand::Create(args) => create::run(args, overrides).await,
        CollectionSubcommand::Update(args) => update::run(args, overrides).await,
        CollectionSubcommand::Delete(args) => delete::run(args, overrides).await,
    }
}
