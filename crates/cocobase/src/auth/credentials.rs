//! Client credentials.

use super::tokens::{ApiKey, BearerToken};
use crate::error::Error;

/// Credentials for a Cocobase project.
///
/// The API key authenticates every request. The bearer token is an inert
/// slot: it is kept so callers can carry it with the client, but no
/// operation sends it.
///
/// # Example
///
/// ```
/// use cocobase::Credentials;
///
/// let creds = Credentials::new("ck_live_123").unwrap();
/// assert!(creds.token().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Credentials {
    api_key: ApiKey,
    token: Option<BearerToken>,
}

impl Credentials {
    /// Create credentials from an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a legal header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            token: None,
        })
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(BearerToken::new(token));
        self
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the stored bearer token, if any.
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }
}
