//! Subcommand implementations.

pub mod collection;
pub mod configure;
pub mod document;
pub mod whoami;

mod input;

use anyhow::Result;
use cocobase::Client;
use tracing::debug;

use crate::config::{Overrides, Settings};

/// Resolve settings and build a client for one command.
fn connect(overrides: &Overrides) -> Result<Client> {
    let settings = Settings::load(overrides)?;
    debug!(
        base = %settings.base_url,
        key_source = %settings.api_key_source,
        "Connecting"
    );
    settings.client()
}
