//! Process-wide configuration layer for data-analysis projects.
//!
//! Resolves filesystem paths, plotting defaults, logging defaults, and
//! numeric parameters from compiled-in defaults plus environment overrides,
//! validates every field, and derives dependent values such as full file
//! paths from a directory, a base name, and an extension. Resolution happens
//! once per process; the resulting [`Settings`] object is immutable.
//!
//! Consumers of the resolved configuration live at the crate edge:
//! [`logging`] builds a tracing subscriber from the logging defaults,
//! [`plots`] publishes a global charting theme, and [`tables`] dispatches
//! table I/O on the resolved data extension.

pub mod config;
pub mod error;
pub mod logging;
pub mod plots;
pub mod tables;

pub use config::{
    DerivedFileSet, DotEnv, Layered, LogLevel, LoggerDefaults, MapSource, Parameters, PathSet,
    PlotContext, PlotDefaults, PlotPalette, PlotStyle, ProcessEnv, ProjectIdentity, Settings,
    Source, settings,
};
pub use error::{ConfigError, ConfigResult};
pub use logging::{LoggerHandle, init_logging};
pub use plots::{Theme, apply_theme, current_theme};
pub use tables::{TableError, TableFormat, read_table, write_table};
