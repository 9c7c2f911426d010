//! Credentials carried by a [`Client`](crate::Client).

mod credentials;
mod tokens;

pub use credentials::Credentials;
pub use tokens::{ApiKey, BearerToken};
