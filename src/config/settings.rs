//! The settings aggregator.
//!
//! Composes every sub-configuration into one immutable object. Resolution
//! order is fixed: paths first, then project identity, then the mutually
//! independent sub-configurations, then the derived file sets. The first
//! failure aborts the whole resolution; no partial settings object is ever
//! returned.

use crate::config::derived::{DerivedFileSet, data_paths, images_paths};
use crate::config::logger::LoggerDefaults;
use crate::config::params::Parameters;
use crate::config::paths::{PathSet, ProjectIdentity};
use crate::config::plot::PlotDefaults;
use crate::config::source::{Source, default_source};
use crate::error::ConfigResult;
use serde::Serialize;
use std::sync::OnceLock;

/// The aggregate configuration, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub project: ProjectIdentity,
    pub paths: PathSet,
    pub plot: PlotDefaults,
    pub logger: LoggerDefaults,
    pub parameters: Parameters,
    pub images: DerivedFileSet,
    pub data: DerivedFileSet,
}

impl Settings {
    /// Resolve everything from the default tiers: process environment, then
    /// a `.env` file in the working directory, then compiled-in defaults.
    pub fn resolve() -> ConfigResult<Self> {
        Self::resolve_with(&default_source())
    }

    /// Resolve everything from an explicit source.
    pub fn resolve_with(source: &dyn Source) -> ConfigResult<Self> {
        let paths = PathSet::resolve(source)?;
        let project = ProjectIdentity::from_paths(&paths)?;
        let plot = PlotDefaults::resolve(source)?;
        let logger = LoggerDefaults::resolve(source, &paths, &project)?;
        let parameters = Parameters::resolve(source)?;
        let images = images_paths(source, &paths, &plot)?;
        let data = data_paths(source, &paths)?;

        Ok(Self {
            project,
            paths,
            plot,
            logger,
            parameters,
            images,
            data,
        })
    }

    /// Serialize the resolved configuration for diagnostics.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Process-wide settings, resolved eagerly at first access.
///
/// Concurrent first callers may race to resolve, but all observe the single
/// value that wins the cell; identical environment state yields identical
/// resolutions, so the race is benign. A resolution error is returned to
/// the caller and not cached.
pub fn settings() -> ConfigResult<&'static Settings> {
    if let Some(resolved) = SETTINGS.get() {
        return Ok(resolved);
    }
    let resolved = Settings::resolve()?;
    Ok(SETTINGS.get_or_init(|| resolved))
}
