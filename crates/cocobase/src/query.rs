//! Filter predicates for listing documents.
//!
//! A [`QueryFilter`] collects `(field, operator, value)` predicates in the
//! order they are added and serializes them as a query string the service
//! understands.
//!
//! # Example
//!
//! ```
//! use cocobase::{Operator, QueryFilter};
//!
//! let filter = QueryFilter::new()
//!     .greater_than("age", 18)?
//!     .add_filter("name", Operator::Contains, "ann")?;
//!
//! assert_eq!(filter.build(), "filter[age][greaterThan]=18&filter[name][contains]=ann");
//! # Ok::<(), cocobase::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::error::{Error, InvalidArgumentError};
use crate::record::display_string;

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    Exists,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Contains,
        Operator::Exists,
    ];

    /// The name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::GreaterOrEqual => "greaterOrEqual",
            Operator::LessOrEqual => "lessOrEqual",
            Operator::Contains => "contains",
            Operator::Exists => "exists",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Operator::Equals => "eq",
            Operator::NotEquals => "ne",
            Operator::GreaterThan => "gt",
            Operator::LessThan => "lt",
            Operator::GreaterOrEqual => "gte",
            Operator::LessOrEqual => "lte",
            Operator::Contains => "contains",
            Operator::Exists => "exists",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    /// Accepts the wire name (`greaterThan`) or a short alias (`gt`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s || op.alias() == s)
            .ok_or_else(|| {
                InvalidArgumentError::FilterOperator {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    operator: Operator,
    value: Value,
}

impl Predicate {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `filter[<field>][<operator>]=<value>`, or `None` for a null value.
    fn encode(&self) -> Option<String> {
        let value = display_string(&self.value)?;
        Some(format!(
            "filter[{}][{}]={}",
            encode_component(&self.field),
            self.operator,
            encode_component(&value)
        ))
    }
}

fn encode_component(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

/// An ordered set of predicates for one list call.
///
/// Predicates are sent in insertion order and duplicates are kept; the
/// service decides what repeated conditions mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilter {
    predicates: Vec<Predicate>,
}

impl QueryFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    ///
    /// The value is rendered like [`Record::get_string`](crate::Record::get_string)
    /// renders it; a null value leaves the predicate out of the query string.
    ///
    /// # Errors
    ///
    /// Returns an error if `field` is empty.
    pub fn add_filter(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        let field = field.into();
        if field.is_empty() {
            return Err(InvalidArgumentError::EmptyFilterField.into());
        }

        self.predicates.push(Predicate {
            field,
            operator,
            value: value.into(),
        });
        Ok(self)
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self, Error> {
        self.add_filter(field, Operator::Equals, value)
    }

    pub fn not_equals(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        self.add_filter(field, Operator::NotEquals, value)
    }

    pub fn greater_than(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        self.add_filter(field, Operator::GreaterThan, value)
    }

    pub fn less_than(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        self.add_filter(field, Operator::LessThan, value)
    }

    pub fn greater_or_equal(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        self.add_filter(field, Operator::GreaterOrEqual, value)
    }

    pub fn less_or_equal(
        self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        self.add_filter(field, Operator::LessOrEqual, value)
    }

    pub fn contains(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self, Error> {
        self.add_filter(field, Operator::Contains, value)
    }

    /// Match documents where `field` is present (`true`) or absent (`false`).
    pub fn exists(self, field: impl Into<String>, present: bool) -> Result<Self, Error> {
        self.add_filter(field, Operator::Exists, present)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Serialize to a query string, without a leading `?`.
    ///
    /// Field names and values are form-urlencoded; brackets and operator
    /// names are literal. An empty filter yields an empty string.
    pub fn build(&self) -> String {
        self.predicates
            .iter()
            .filter_map(Predicate::encode)
            .collect::<Vec<_>>()
            .join("&")
    }
}
