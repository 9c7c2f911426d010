//! Request description and validation, independent of the transport.

use std::fmt;

use serde_json::Value;

use crate::error::{Error, InvalidArgumentError};

/// HTTP methods the service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A validated request, ready to resolve against the base URL.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    /// Build a request, rejecting method/body pairs the service never sees.
    ///
    /// Reads and deletes carry no body and updates always carry one. POST
    /// may go either way: collection deletion posts without a body.
    pub(crate) fn new(
        method: Method,
        path: impl Into<String>,
        body: Option<Value>,
    ) -> Result<Self, Error> {
        let reason = match (method, &body) {
            (Method::Get | Method::Delete, Some(_)) => Some("must not carry a body"),
            (Method::Patch, None) => Some("requires a body"),
            _ => None,
        };

        if let Some(reason) = reason {
            return Err(InvalidArgumentError::UnsupportedRequest {
                method: method.as_str(),
                reason,
            }
            .into());
        }

        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        Ok(Self { method, path, body })
    }
}

/// Status and body text of a completed exchange.
#[derive(Debug)]
pub(crate) struct Response {
    pub status: u16,
    pub body: String,
}
