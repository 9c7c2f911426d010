//! cocobase - Client library for the Cocobase document database
//!
//! Collections hold schemaless JSON documents. This crate wraps the HTTP API
//! in a typed [`Client`], returns documents as [`Record`]s with coercing
//! accessors, and builds list filters with [`QueryFilter`].
//!
//! # Example
//!
//! ```no_run
//! use cocobase::{Client, QueryFilter};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), cocobase::Error> {
//! let client = Client::new("ck_live_123")?;
//!
//! let users = client.create_collection("users", None).await?;
//! client
//!     .create_document(&users.id, &json!({"name": "Ada", "age": 36, "admin": "yes"}))
//!     .await?;
//!
//! let filter = QueryFilter::new().greater_than("age", 18)?;
//! for record in client.list_documents(&users.id, Some(&filter)).await? {
//!     let admin = record.get_bool("admin").unwrap_or(false);
//!     println!("{} admin={}", record.id(), admin);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod collection;
pub mod error;
pub mod query;
pub mod record;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use client::{Client, ClientBuilder};
pub use collection::Collection;
pub use error::{ApiError, Error, TypeConversionError};
pub use query::{Operator, Predicate, QueryFilter};
pub use record::Record;
pub use types::{BaseUrl, DEFAULT_BASE_URL};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
