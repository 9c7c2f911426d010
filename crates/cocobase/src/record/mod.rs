//! Typed wrapper around one stored document.
//!
//! A [`Record`] owns the document's field map and exposes it through raw
//! accessors (`get`, `set`, `remove`, indexing) and coercing accessors
//! (`get_int`, `get_bool`, ...). Coercing accessors come in two flavors:
//! the plain form returns `None` when a value cannot be converted, and the
//! `try_` form returns a [`TypeConversionError`] instead.
//!
//! Changes made through a `Record` are local. Send them back with
//! [`Client::update_document`](crate::Client::update_document).

mod coerce;

use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{TargetType, TypeConversionError};

pub(crate) use coerce::display_string;

/// A document returned by the service.
///
/// # Example
///
/// ```
/// use cocobase::Record;
/// use serde_json::json;
///
/// let record = Record::try_from(json!({
///     "id": "doc_1",
///     "collection_id": "col_1",
///     "created_at": 1700000000,
///     "data": {"name": "Ada", "age": "36", "admin": "yes"}
/// })).unwrap();
///
/// assert_eq!(record.get_string("name").as_deref(), Some("Ada"));
/// assert_eq!(record.get_int("age"), Some(36));
/// assert_eq!(record.get_bool("admin"), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    collection_id: String,
    created_at: DateTime<Utc>,
    fields: Map<String, Value>,
    collection: Option<Map<String, Value>>,
}

impl Record {
    /// The service-assigned document id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the collection that owns this document.
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Creation time; the Unix epoch when the service did not report one.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Collection metadata echoed by some endpoints.
    pub fn collection(&self) -> Option<&Map<String, Value>> {
        self.collection.as_ref()
    }

    /// The document content.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the record, keeping only its content.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    // ========================================================================
    // Map access
    // ========================================================================

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Raw value for `key`, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.fields.get(key).unwrap_or(default)
    }

    /// Insert or replace a field, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // ========================================================================
    // Typed accessors
    // ========================================================================

    /// Field as text. Nested values render as compact JSON.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.present(key).and_then(coerce::display_string)
    }

    /// Field as text, refusing arrays and objects.
    ///
    /// Every JSON scalar has a text form, so this only fails for nested
    /// values.
    pub fn try_get_string(&self, key: &str) -> Result<Option<String>, TypeConversionError> {
        self.strict(key, TargetType::String, coerce::scalar_string)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.present(key).and_then(coerce::to_int)
    }

    /// Field as an integer. Floats truncate toward zero, booleans are 0/1,
    /// strings must hold a base-10 integer.
    pub fn try_get_int(&self, key: &str) -> Result<Option<i64>, TypeConversionError> {
        self.strict(key, TargetType::Int, coerce::to_int)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.present(key).and_then(coerce::to_float)
    }

    pub fn try_get_float(&self, key: &str) -> Result<Option<f64>, TypeConversionError> {
        self.strict(key, TargetType::Float, coerce::to_float)
    }

    /// Field as a boolean.
    ///
    /// Native booleans pass through. Strings match `true`/`1`/`yes` and
    /// `false`/`0`/`no` ignoring case and surrounding whitespace. Anything
    /// else is true when it coerces to a non-zero integer.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.present(key).and_then(coerce::to_bool)
    }

    pub fn try_get_bool(&self, key: &str) -> Result<Option<bool>, TypeConversionError> {
        self.strict(key, TargetType::Bool, coerce::to_bool)
    }

    /// Field as a UTC timestamp. Numbers are epoch seconds and strings are
    /// ISO-8601; an offset-less string is taken as UTC.
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.present(key).and_then(coerce::to_datetime)
    }

    pub fn try_get_datetime(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, TypeConversionError> {
        self.strict(key, TargetType::DateTime, coerce::to_datetime)
    }

    /// A missing key and an explicit null both read as absent.
    fn present(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    fn strict<T>(
        &self,
        key: &str,
        target: TargetType,
        convert: fn(&Value) -> Option<T>,
    ) -> Result<Option<T>, TypeConversionError> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };

        convert(value)
            .map(Some)
            .ok_or_else(|| TypeConversionError {
                key: key.to_string(),
                target,
                value: value.clone(),
            })
    }
}

/// Panics if the key is absent, like `HashMap`.
impl Index<&str> for Record {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.fields[key]
    }
}

/// Panics if the key is absent; use [`Record::set`] to add fields.
impl IndexMut<&str> for Record {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        &mut self.fields[key]
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// Document JSON as the service sends it.
#[derive(Debug, Deserialize)]
struct DocumentIn {
    #[serde(default)]
    id: String,
    #[serde(default)]
    collection_id: String,
    #[serde(default)]
    created_at: Value,
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    collection: Option<Map<String, Value>>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    id: &'a str,
    collection_id: &'a str,
    created_at: Value,
    data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<&'a Map<String, Value>>,
}

impl TryFrom<DocumentIn> for Record {
    type Error = String;

    fn try_from(doc: DocumentIn) -> Result<Self, Self::Error> {
        let created_at = match &doc.created_at {
            Value::Null => DateTime::<Utc>::UNIX_EPOCH,
            value => coerce::to_datetime(value)
                .ok_or_else(|| format!("created_at is not a timestamp: {}", value))?,
        };

        Ok(Self {
            id: doc.id,
            collection_id: doc.collection_id,
            created_at,
            fields: doc.data.unwrap_or_default(),
            collection: doc.collection,
        })
    }
}

impl TryFrom<Value> for Record {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only a JSON object is a document, never a positional array
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let doc: DocumentIn =
            serde_json::from_value(Value::Object(map)).map_err(serde::de::Error::custom)?;
        Record::try_from(doc).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Whole seconds go back out as an integer, like the service sends them
        let created_at = if self.created_at.timestamp_subsec_nanos() == 0 {
            Value::from(self.created_at.timestamp())
        } else {
            Value::from(self.created_at.timestamp_micros() as f64 / 1e6)
        };

        DocumentOut {
            id: &self.id,
            collection_id: &self.collection_id,
            created_at,
            data: &self.fields,
            collection: self.collection.as_ref(),
        }
        .serialize(serializer)
    }
}
