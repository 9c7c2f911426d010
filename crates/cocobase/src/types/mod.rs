//! Core value types.
//!
//! These types enforce their invariants at construction time.

mod base_url;
mod identifier;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub(crate) use identifier::path_segment;
