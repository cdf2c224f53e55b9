//! Field-level validation helpers.
//!
//! All helpers report failures as [`ValidationError`]s carrying the full
//! dot-delimited path of the offending field, so nested violations (for
//! example `artists.0.name`) stay diagnosable from the object root. A JSON
//! null is uniformly treated as absent: absence is only an error for
//! required fields.

use serde_json::Value;

use crate::error::ValidationError;

/// Join a parent path with a child segment, dropping an empty parent.
pub(crate) fn join(at: &str, segment: &str) -> String {
    if at.is_empty() {
        segment.to_string()
    } else {
        format!("{at}.{segment}")
    }
}

/// Present, non-null field of `parent`.
pub(crate) fn field<'a>(parent: &'a Value, name: &str) -> Option<&'a Value> {
    match parent.get(name) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

/// The value itself must be a mapping.
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    at: &str,
) -> Result<&'a serde_json::Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::expected(at, "mapping", value))
}

pub(crate) fn required_str(
    parent: &Value,
    at: &str,
    name: &str,
) -> Result<String, ValidationError> {
    let path = join(at, name);
    match field(parent, name) {
        None => Err(ValidationError::missing(path)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::expected(path, "string", other)),
    }
}

pub(crate) fn optional_str(
    parent: &Value,
    at: &str,
    name: &str,
) -> Result<Option<String>, ValidationError> {
    match field(parent, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::expected(join(at, name), "string", other)),
    }
}

pub(crate) fn required_u64(parent: &Value, at: &str, name: &str) -> Result<u64, ValidationError> {
    let path = join(at, name);
    match field(parent, name) {
        None => Err(ValidationError::missing(path)),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| ValidationError::expected(path, "non-negative integer", value)),
    }
}

pub(crate) fn optional_u64(
    parent: &Value,
    at: &str,
    name: &str,
) -> Result<Option<u64>, ValidationError> {
    match field(parent, name) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| ValidationError::expected(join(at, name), "non-negative integer", value)),
    }
}

pub(crate) fn required_bool(parent: &Value, at: &str, name: &str) -> Result<bool, ValidationError> {
    let path = join(at, name);
    match field(parent, name) {
        None => Err(ValidationError::missing(path)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ValidationError::expected(path, "boolean", other)),
    }
}

/// Ordered sequence of strings; absent defaults to empty.
pub(crate) fn string_seq(
    parent: &Value,
    at: &str,
    name: &str,
) -> Result<Vec<String>, ValidationError> {
    let path = join(at, name);
    match field(parent, name) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ValidationError::expected(
                    join(&path, &idx.to_string()),
                    "string",
                    other,
                )),
            })
            .collect(),
        Some(other) => Err(ValidationError::expected(path, "sequence", other)),
    }
}

/// Absolute URL: a scheme, `://`, and a non-empty remainder.
pub(crate) fn is_absolute_url(candidate: &str) -> bool {
    match candidate.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
                && !rest.is_empty()
        }
        None => false,
    }
}

pub(crate) fn absolute_url(value: &Value, at: &str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) if is_absolute_url(s) => Ok(s.clone()),
        Value::String(s) => Err(ValidationError::new(
            at,
            format!("expected absolute URL, got `{s}`"),
        )),
        other => Err(ValidationError::expected(at, "string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_counts_as_absent() {
        let parent = json!({"isrc": null});
        assert_eq!(optional_str(&parent, "", "isrc").unwrap(), None);
        assert_eq!(
            required_str(&parent, "", "isrc").unwrap_err(),
            ValidationError::missing("isrc")
        );
    }

    #[test]
    fn nested_paths_compose() {
        let parent = json!({"name": 42});
        let err = required_str(&parent, "artists.0", "name").unwrap_err();
        assert_eq!(err.path, "artists.0.name");
    }

    #[test]
    fn string_seq_defaults_empty_and_checks_elements() {
        assert_eq!(string_seq(&json!({}), "", "genre_tags").unwrap(), Vec::<String>::new());
        let err = string_seq(&json!({"genre_tags": ["pop", 5]}), "", "genre_tags").unwrap_err();
        assert_eq!(err.path, "genre_tags.1");
    }

    #[test]
    fn negative_and_fractional_numbers_are_rejected() {
        assert!(required_u64(&json!({"duration_ms": -1}), "", "duration_ms").is_err());
        assert!(required_u64(&json!({"duration_ms": 1.5}), "", "duration_ms").is_err());
        assert_eq!(
            required_u64(&json!({"duration_ms": 0}), "", "duration_ms").unwrap(),
            0
        );
    }

    #[test]
    fn absolute_url_requires_scheme_and_rest() {
        assert!(is_absolute_url("https://open.spotify.com/album/abc123"));
        assert!(is_absolute_url("spotify+audio://preview/1"));
        assert!(!is_absolute_url("open.spotify.com/album"));
        assert!(!is_absolute_url("://missing-scheme"));
        assert!(!is_absolute_url("https://"));
    }
}
