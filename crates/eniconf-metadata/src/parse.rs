//! Parsing of raw metadata values

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{MetadataError, Result};

/// Trimmed scalar value; an empty body means the value is absent.
pub(crate) fn scalar(path: &str, raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(MetadataError::NotFound(path.to_string()));
    }
    Ok(value.to_string())
}

/// Scalar value parsed into `T`
pub(crate) fn typed<T>(path: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = scalar(path, raw)?;
    value.parse().map_err(|e: T::Err| MetadataError::InvalidValue {
        path: path.to_string(),
        value: value.clone(),
        reason: e.to_string(),
    })
}

/// Directory listing: one entry per line, sub-directories end in `/`.
pub(crate) fn listing(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_end_matches('/'))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Address list.
///
/// The server answers either with a JSON array of strings
/// (`["10.0.0.5","10.0.0.6"]`) or with a bare bracketed list
/// (`[fd00::5,fd00::6]`).
pub(crate) fn address_list<T>(path: &str, raw: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let body = raw.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(body) {
        Ok(items) => items,
        Err(_) => body
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|item| item.trim().trim_matches('"').to_string())
            .collect(),
    };

    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|e: T::Err| MetadataError::InvalidValue {
                path: path.to_string(),
                value: item.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
