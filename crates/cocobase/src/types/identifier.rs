//! Validation for service-assigned identifiers used in request paths.

use crate::error::{Error, InvalidArgumentError};

/// Characters that would change the meaning of a URL if left inside a segment.
/// Backslash counts because http(s) URL parsing treats it as `/`.
const DELIMITERS: &[char] = &['/', '\\', '?', '#'];

/// Validate an identifier that is about to be placed in a request path.
///
/// Identifiers are opaque, so the only requirements are that one is present
/// and that it stays a single path segment.
pub(crate) fn path_segment<'a>(name: &'static str, value: &'a str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        return Err(InvalidArgumentError::Required { name }.into());
    }

    if value.contains(DELIMITERS) {
        return Err(InvalidArgumentError::Identifier {
            name,
            value: value.to_string(),
            reason: "must not contain '/', '\\', '?' or '#'",
        }
        .into());
    }

    // URL parsing resolves dot segments away, moving the request elsewhere
    if is_dot_segment(value) {
        return Err(InvalidArgumentError::Identifier {
            name,
            value: value.to_string(),
            reason: "must not be a dot segment",
        }
        .into());
    }

    Ok(value)
}

/// `.` or `..`, including the percent-encoded spellings URL parsers honor.
fn is_dot_segment(value: &str) -> bool {
    let decoded = value.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}
