//! Secret token types.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::{Error, InvalidArgumentError};

/// The project API key sent as `x-api-key` on every request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Validated as a legal header value at construction
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or contains characters that
    /// cannot appear in an HTTP header.
    pub fn new(key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(InvalidArgumentError::ApiKey {
                reason: "must not be empty",
            }
            .into());
        }
        if HeaderValue::from_str(&key).is_err() {
            return Err(InvalidArgumentError::ApiKey {
                reason: "contains characters not allowed in a header",
            }
            .into());
        }
        Ok(Self(key))
    }

    /// Returns the key for use in the request header.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP headers or persisting configuration.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as a header value marked sensitive.
    pub(crate) fn header_value(&self) -> HeaderValue {
        let mut value =
            HeaderValue::from_str(&self.0).expect("validated as a header value at construction");
        value.set_sensitive(true);
        value
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// A user bearer token.
///
/// Stored alongside the API key for auth modes the service may add later.
/// No request currently sends it.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    /// Create a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
