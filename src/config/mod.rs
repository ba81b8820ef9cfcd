//! Configuration resolution and validation engine.
//!
//! Each sub-configuration resolves independently from `<PREFIX><FIELD>`
//! variables with compiled-in fallbacks, runs its field validators in
//! declaration order, then any cross-field derivation, and freezes. The
//! [`Settings`] aggregator composes them in fixed dependency order:
//! `PathSet`, then `ProjectIdentity`, then the mutually independent
//! sub-configurations, then the derived file sets. Overrides come from the
//! process environment first, then a `.env` file in the working directory.
//!
//! ## Variables
//! - `PATH_*`: project directories (`PATH_PROJECT_ROOT`, `PATH_IMAGES`, ...)
//! - `PLOT_*`: plotting defaults (`PLOT_FIGSIZE`, `PLOT_DPI`, ...)
//! - `LOG_*`: logging defaults (`LOG_LEVEL`, `LOG_DATEFMT`, ...)
//! - `PARAM_*`: analysis parameters (`PARAM_RANDOM_SEED`)
//! - `IMAGES_*` / `DATA_*`: derived file sets (DIRECTORY, EXTENSION, names)
//!
//! Unknown variables under a recognized prefix are ignored. Configuration
//! objects are immutable once resolved; there is no runtime reconfiguration.

mod derived;
mod logger;
mod params;
mod paths;
mod plot;
mod settings;
pub mod source;
pub mod validate;

pub use derived::{
    DATA_PREFIX, DerivedFileSet, IMAGES_PREFIX, data_paths, derive_file_paths, images_paths,
};
pub use logger::{LOG_PREFIX, LogLevel, LoggerDefaults};
pub use params::{PARAM_PREFIX, Parameters};
pub use paths::{PATH_PREFIX, PathSet, ProjectIdentity};
pub use plot::{PLOT_PREFIX, PlotContext, PlotDefaults, PlotPalette, PlotStyle};
pub use settings::{Settings, settings};
pub use source::{DotEnv, Layered, MapSource, ProcessEnv, Scope, Source, default_source};
