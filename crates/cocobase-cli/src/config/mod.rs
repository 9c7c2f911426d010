//! Connection settings: saved profile, environment, and flags.
//!
//! Each setting is taken from the first source that provides it, in the
//! order command-line flag, environment variable, saved profile.

pub mod storage;

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cocobase::{BaseUrl, Client};

pub const API_KEY_VAR: &str = "COCOBASE_API_KEY";
pub const TOKEN_VAR: &str = "COCOBASE_TOKEN";
pub const BASE_URL_VAR: &str = "COCOBASE_BASE_URL";

/// Settings persisted by `cocobase configure`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("api_key", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Where a setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Environment,
    Profile,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Flag => "flag",
            Source::Environment => "environment",
            Source::Profile => "profile",
            Source::Default => "default",
        })
    }
}

/// Fully resolved connection settings.
pub struct Settings {
    pub api_key: String,
    pub api_key_source: Source,
    pub token: Option<String>,
    pub base_url: BaseUrl,
    pub base_url_source: Source,
}

impl Settings {
    /// Load the saved profile and apply environment and flag overrides.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let profile = storage::load_profile().context("Failed to load profile")?;
        resolve(profile, |name| std::env::var(name).ok(), overrides)
    }

    /// Build a library client from these settings.
    pub fn client(&self) -> Result<Client> {
        let mut builder = Client::builder(&self.api_key).base_url(self.base_url.clone());
        if let Some(token) = &self.token {
            builder = builder.token(token);
        }
        builder.build().context("Failed to create client")
    }
}

/// Merge the sources in precedence order.
///
/// Empty environment values count as unset.
pub fn resolve<F>(profile: Option<Profile>, env: F, overrides: &Overrides) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());
    let profile = profile.as_ref();

    let (api_key, api_key_source) = pick(
        overrides.api_key.clone(),
        env(API_KEY_VAR),
        profile.map(|p| p.api_key.clone()),
    )
    .context(format!(
        "No API key configured. Run 'cocobase configure --api-key <KEY>' or set {API_KEY_VAR}."
    ))?;

    let token = env(TOKEN_VAR).or_else(|| profile.and_then(|p| p.token.clone()));

    let (base_url, base_url_source) = match pick(
        overrides.base_url.clone(),
        env(BASE_URL_VAR),
        profile.and_then(|p| p.base_url.clone()),
    ) {
        Some((url, source)) => (
            BaseUrl::new(&url).with_context(|| format!("Invalid base URL from {source}"))?,
            source,
        ),
        None => (BaseUrl::default(), Source::Default),
    };

    Ok(Settings {
        api_key,
        api_key_source,
        token,
        base_url,
        base_url_source,
    })
}

fn pick(
    flag: Option<String>,
    env: Option<String>,
    profile: Option<String>,
) -> Option<(String, Source)> {
    flag.map(|v| (v, Source::Flag))
        .or_else(|| env.map(|v| (v, Source::Environment)))
        .or_else(|| profile.map(|v| (v, Source::Profile)))
}

/// Show enough of a key to tell keys apart.
pub fn redact(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    if key.chars().count() > 8 {
        format!("{prefix}****")
    } else {
        "****".to_string()
    }
}
