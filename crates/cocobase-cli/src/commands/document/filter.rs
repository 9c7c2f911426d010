//! `--filter field:operator:value` arguments.

use std::str::FromStr;

use serde_json::Value;

use cocobase::{Operator, QueryFilter};

/// One parsed `--filter` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl FromStr for FilterArg {
    type Err = String;

    /// The value is read as JSON when it parses (`18`, `true`, `"18"`),
    /// otherwise it is taken as a plain string. Only the first two colons
    /// split, so values may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected FIELD:OPERATOR:VALUE, got '{s}'"));
        };

        if field.is_empty() {
            return Err("filter field must not be empty".to_string());
        }

        let operator = Operator::from_str(operator).map_err(|e| e.to_string())?;
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

        Ok(Self {
            field: field.to_string(),
            operator,
            value,
        })
    }
}

/// Fold the arguments into a filter, keeping their order.
pub fn build(filters: Vec<FilterArg>) -> cocobase::Result<QueryFilter> {
    filters
        .into_iter()
        .try_fold(QueryFilter::new(), |filter, arg| {
            filter.add_filter(arg.field, arg.operator, arg.value)
        })
}
