//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::{Overrides, Settings, redact};
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, overrides: &Overrides) -> Result<()> {
    let settings = Settings::load(overrides)?;

    output::field(
        "Base URL",
        &format!("{} ({})", settings.base_url, settings.base_url_source),
    );
    output::field(
        "API key",
        &format!("{} ({})", redact(&settings.api_key), settings.api_key_source),
    );
    output::field(
        "Token",
        if settings.token.is_some() { "set" } else { "not set" },
    );

    Ok(())
}
