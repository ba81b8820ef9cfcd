//! Environment sources and the prefix-scoped field resolver.
//!
//! Each sub-configuration reads variables named `<PREFIX><FIELD>` from an
//! explicit [`Source`]. Absence falls back to the compiled-in default,
//! presence overrides it, and either way the effective raw value passes
//! through the field's validator. Unknown variables under a recognized
//! prefix are never an error: only declared fields are ever queried.
//!
//! The default tiers, highest first: process environment, then a `.env`
//! file in the working directory, then compiled-in defaults. [`Layered`]
//! resolves across tiers first-found-wins.

use crate::error::ConfigResult;
use std::collections::HashMap;
use std::path::Path;

/// A provider of raw configuration values.
///
/// Kept as an explicit abstraction (rather than reading `std::env` inline)
/// so the override priority is injectable and testable.
pub trait Source {
    /// Look up a raw value by full variable name.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory source for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MapSource(HashMap<String, String>);

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl Source for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Overrides read from a dotenv-style file.
///
/// Parses `KEY=VALUE` lines; blank lines and `#` comments are skipped and
/// values may carry matching surrounding quotes. A missing or unreadable
/// file yields an empty source, so the tier is always safe to stack.
#[derive(Debug, Clone, Default)]
pub struct DotEnv(HashMap<String, String>);

impl DotEnv {
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&content)
    }

    fn parse(content: &str) -> Self {
        let mut vars = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            vars.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Self(vars)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

impl Source for DotEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Two sources stacked: the primary wins, the fallback answers what the
/// primary misses.
#[derive(Debug, Clone)]
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Source, F: Source> Layered<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Source, F: Source> Source for Layered<P, F> {
    fn get(&self, key: &str) -> Option<String> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }
}

/// The default override tiers: process environment over a `.env` file in
/// the working directory.
pub fn default_source() -> Layered<ProcessEnv, DotEnv> {
    Layered::new(ProcessEnv, DotEnv::load(Path::new(".env")))
}

/// A [`Source`] scoped to one sub-configuration's variable prefix.
pub struct Scope<'a> {
    prefix: &'static str,
    source: &'a dyn Source,
}

impl<'a> Scope<'a> {
    pub fn new(prefix: &'static str, source: &'a dyn Source) -> Self {
        Self { prefix, source }
    }

    /// The sub-configuration prefix this scope reads under.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Raw override for a field, if the environment provides one.
    pub fn raw(&self, field: &str) -> Option<String> {
        self.source.get(&format!("{}{}", self.prefix, field))
    }

    /// Effective raw value: override or compiled-in default.
    pub fn string(&self, field: &str, default: &str) -> String {
        self.raw(field).unwrap_or_else(|| default.to_string())
    }

    /// Effective raw value run through a field validator.
    pub fn validated<T>(
        &self,
        field: &str,
        default: &str,
        validator: impl FnOnce(&str, &str) -> ConfigResult<T>,
    ) -> ConfigResult<T> {
        let raw = self.string(field, default);
        validator(field, &raw)
    }

    /// Validated override, or an already-typed compiled-in default when the
    /// source has nothing for the field.
    pub fn or_default<T>(
        &self,
        field: &str,
        default: T,
        validator: impl FnOnce(&str, &str) -> ConfigResult<T>,
    ) -> ConfigResult<T> {
        match self.raw(field) {
            Some(raw) => validator(field, &raw),
            None => Ok(default),
        }
    }

    /// Like [`Scope::validated`], but an empty override clears the field.
    ///
    /// Used for optional sink thresholds: absence keeps the default, an
    /// empty string disables the sink entirely.
    pub fn optional<T>(
        &self,
        field: &str,
        default: Option<&str>,
        validator: impl FnOnce(&str, &str) -> ConfigResult<T>,
    ) -> ConfigResult<Option<T>> {
        let raw = match self.raw(field) {
            Some(v) => {
                if v.trim().is_empty() {
                    return Ok(None);
                }
                v
            }
            None => match default {
                Some(d) => d.to_string(),
                None => return Ok(None),
            },
        };
        validator(field, &raw).map(Some)
    }
}
