//! Reading JSON document bodies from files or stdin.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Read a JSON object from `path`, or from stdin when `path` is `-`.
pub fn read_object(path: &str) -> Result<Map<String, Value>> {
    let content = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
    };

    parse_object(&content)
}

fn parse_object(content: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(content).context("Invalid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("Document JSON must be an object"),
    }
}
