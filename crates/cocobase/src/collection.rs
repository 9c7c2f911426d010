//! Collection descriptor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A collection as described by the service.
///
/// Only the id, name and webhook URL are modeled; any other keys the
/// service returns are kept in `extra`. Collections are never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
