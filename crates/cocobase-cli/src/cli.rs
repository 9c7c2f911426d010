//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::collection::CollectionCommand;
use crate::commands::configure::ConfigureArgs;
use crate::commands::document::DocumentCommand;
use crate::commands::whoami::WhoamiArgs;
use crate::config::Overrides;

/// Cocobase document database CLI.
#[derive(Parser, Debug)]
#[command(name = "cocobase")]
#[command(author, version = env!("COCOBASE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API key (overrides COCOBASE_API_KEY and the saved profile)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Service base URL (overrides COCOBASE_BASE_URL and the saved profile)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save --api-key, --base-url and a token to the local profile
    Configure(ConfigureArgs),

    /// Show the effective connection settings
    Whoami(WhoamiArgs),

    /// Collection operations
    Collection(CollectionCommand),

    /// Document operations
    Document(DocumentCommand),
}
