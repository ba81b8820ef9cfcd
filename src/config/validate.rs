//! Field validators.
//!
//! Pure functions over a single field's raw value: each either returns the
//! normalized typed value or fails with a [`ConfigError::Validation`] naming
//! the field and the violated constraint. Validators never read environment
//! state; that is the loader's job.

use crate::error::{ConfigError, ConfigResult};
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;

/// Parse a figure size of exactly two comma-separated positive integers.
pub fn figure_size(field: &str, raw: &str) -> ConfigResult<(u32, u32)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(ConfigError::validation(
            field,
            format!("expected two comma-separated positive integers, got '{raw}'"),
        ));
    }
    let mut dims = [0u32; 2];
    for (slot, part) in dims.iter_mut().zip(&parts) {
        *slot = positive_int(field, part.trim())?;
    }
    Ok((dims[0], dims[1]))
}

/// Verify a strftime-style pattern can format the current instant.
///
/// Malformed tokens are detected through chrono's own parser rather than a
/// hard-coded token grammar: `StrftimeItems` yields an error item for any
/// specifier it does not understand.
pub fn timestamp_format(field: &str, raw: &str) -> ConfigResult<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(raw).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::validation(
            field,
            format!("'{raw}' is not a valid timestamp format"),
        ));
    }
    let mut rendered = String::new();
    write!(rendered, "{}", Local::now().format_with_items(items.iter())).map_err(|_| {
        ConfigError::validation(field, format!("'{raw}' cannot format the current instant"))
    })?;
    Ok(raw.to_string())
}

/// Verify membership in a fixed set; returns the index of the match.
///
/// The failure message lists the full allowed set.
pub fn one_of(field: &str, raw: &str, allowed: &[&str]) -> ConfigResult<usize> {
    allowed.iter().position(|v| *v == raw).ok_or_else(|| {
        ConfigError::validation(
            field,
            format!("'{}' is not one of: {}", raw, allowed.join(", ")),
        )
    })
}

/// Parse a strictly positive integer.
pub fn positive_int(field: &str, raw: &str) -> ConfigResult<u32> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::validation(
            field,
            format!("'{raw}' is not a positive integer"),
        )),
    }
}

/// Parse a strictly positive float.
pub fn positive_float(field: &str, raw: &str) -> ConfigResult<f64> {
    match raw.parse::<f64>() {
        Ok(f) if f > 0.0 && f.is_finite() => Ok(f),
        _ => Err(ConfigError::validation(
            field,
            format!("'{raw}' is not a positive number"),
        )),
    }
}

/// Require a non-empty value, trimmed.
pub fn non_empty(field: &str, raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Normalize a format token: non-empty, lowercased.
pub fn lower_token(field: &str, raw: &str) -> ConfigResult<String> {
    non_empty(field, raw).map(|s| s.to_lowercase())
}

/// A log-line template must carry the message placeholder.
pub fn line_template(field: &str, raw: &str) -> ConfigResult<String> {
    let template = non_empty(field, raw)?;
    if !template.contains("{message}") {
        return Err(ConfigError::validation(
            field,
            "template must contain the {message} placeholder",
        ));
    }
    Ok(template)
}
