//! Output formatting.
//!
//! Documents go to stdout as JSON, one per line unless pretty-printed.
//! Status lines go to stderr so output can be piped.

use std::fmt::Display;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a serializable value as JSON.
pub fn document<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
