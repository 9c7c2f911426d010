//! Error types for the cocobase client.
//!
//! This module provides a unified error type with explicit variants for
//! transport failures, service-reported failures, caller input validation,
//! and strict type coercion on [`Record`](crate::Record) accessors.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The unified error type for cocobase operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a status outside the operation's success set.
    #[error("service error: {0}")]
    Api(#[from] ApiError),

    /// Caller input rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Strict-mode record accessor could not coerce a value.
    #[error("type conversion error: {0}")]
    TypeConversion(#[from] TypeConversionError),

    /// A success response whose body is not the documented JSON shape.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String, body: String },
}

impl Error {
    /// Returns the HTTP status carried by a service error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status()),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Failures reported by the service, classified from the HTTP status.
///
/// Every variant keeps the raw response body for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400: the service rejected the request as malformed.
    #[error("invalid request: {body}")]
    InvalidRequest { body: String },

    /// 422: a required field was absent from the request.
    #[error("a field is missing: {body}")]
    MissingField { body: String },

    /// 500: unrecoverable server fault.
    #[error("internal service error: {body}")]
    InternalServiceError { body: String },

    /// Any other status the operation does not accept.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl ApiError {
    /// Classify a non-success status and its body.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 => ApiError::InvalidRequest { body },
            422 => ApiError::MissingField { body },
            500 => ApiError::InternalServiceError { body },
            status => ApiError::UnexpectedStatus { status, body },
        }
    }

    /// Check a response status against the statuses an operation accepts.
    ///
    /// Returns the body untouched on success so the caller can decode it.
    pub fn check(status: u16, accepted: &[u16], body: String) -> Result<String, ApiError> {
        if accepted.contains(&status) {
            Ok(body)
        } else {
            Err(ApiError::from_status(status, body))
        }
    }

    /// The HTTP status this error was classified from.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidRequest { .. } => 400,
            ApiError::MissingField { .. } => 422,
            ApiError::InternalServiceError { .. } => 500,
            ApiError::UnexpectedStatus { status, .. } => *status,
        }
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        match self {
            ApiError::InvalidRequest { body }
            | ApiError::MissingField { body }
            | ApiError::InternalServiceError { body }
            | ApiError::UnexpectedStatus { body, .. } => body,
        }
    }

    /// True for statuses outside the known table.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, ApiError::UnexpectedStatus { .. })
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidArgumentError {
    /// A required input was empty.
    #[error("{name} must be provided")]
    Required { name: &'static str },

    /// An identifier that cannot be used as a single path segment.
    #[error("invalid {name} '{value}': {reason}")]
    Identifier {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The API key was empty or not a legal header value.
    #[error("invalid API key: {reason}")]
    ApiKey { reason: &'static str },

    /// A collection update carried neither a name nor a webhook URL.
    #[error("at least one of name or webhook_url must be provided")]
    EmptyCollectionUpdate,

    /// Document fields did not serialize to a JSON object.
    #[error("document fields must be a JSON object, got {found}")]
    FieldsNotObject { found: &'static str },

    /// Document fields could not be serialized at all.
    #[error("document fields could not be serialized: {message}")]
    FieldsUnserializable { message: String },

    /// A filter predicate had an empty field name.
    #[error("filter field name must not be empty")]
    EmptyFilterField,

    /// An unknown filter operator name.
    #[error("unknown filter operator '{value}'")]
    FilterOperator { value: String },

    /// The method and body do not form a request the service accepts.
    #[error("unsupported request: {method} {reason}")]
    UnsupportedRequest {
        method: &'static str,
        reason: &'static str,
    },

    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}

/// The type a strict accessor was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    String,
    Int,
    Float,
    Bool,
    DateTime,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::String => "string",
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::Bool => "bool",
            TargetType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strict-mode accessor could not coerce the stored value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("value for '{key}' is not {target}-convertible: {value}")]
pub struct TypeConversionError {
    pub key: String,
    pub target: TargetType,
    pub value: Value,
}
