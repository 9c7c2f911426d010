//! Configure command implementation.
//!
//! Saves the global `--api-key` and `--base-url` values, plus an optional
//! token, as the profile later commands fall back to.

use anyhow::{Context, Result};
use clap::Args;

use cocobase::BaseUrl;
use cocobase::auth::ApiKey;

use crate::config::{Overrides, Profile, redact, storage};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// User session token to keep with the profile
    #[arg(long)]
    pub token: Option<String>,
}

pub async fn run(args: ConfigureArgs, overrides: &Overrides) -> Result<()> {
    let api_key = overrides
        .api_key
        .clone()
        .context("--api-key is required to configure a profile")?;

    ApiKey::new(api_key.as_str()).context("Invalid API key")?;
    if let Some(url) = &overrides.base_url {
        BaseUrl::new(url).context("Invalid base URL")?;
    }

    let profile = Profile {
        api_key,
        token: args.token,
        base_url: overrides.base_url.clone(),
    };

    let path = storage::save_profile(&profile).context("Failed to save profile")?;

    output::success("Profile saved");
    output::field("Path", path.display());
    output::field("API key", redact(&profile.api_key));
    if let Some(url) = &profile.base_url {
        output::field("Base URL", url);
    }

    Ok(())
}
