//! Logging defaults.
//!
//! Resolves after [`PathSet`] and [`ProjectIdentity`]: the log-file path is
//! derived from the resolved logs directory and the project name.

use crate::config::paths::{PathSet, ProjectIdentity};
use crate::config::source::{Scope, Source, default_source};
use crate::config::validate;
use crate::error::ConfigResult;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Environment prefix for logging variables.
pub const LOG_PREFIX: &str = "LOG_";

/// Minimum severity level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [&'static str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

    pub fn parse(field: &str, raw: &str) -> ConfigResult<Self> {
        Ok(match validate::one_of(field, raw, &Self::ALL)? {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            3 => LogLevel::Error,
            _ => LogLevel::Critical,
        })
    }

    pub fn as_str(&self) -> &'static str {
        Self::ALL[*self as usize]
    }

    /// Map to a tracing level filter. CRITICAL collapses into ERROR, the
    /// most severe level tracing distinguishes.
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging defaults, resolved under the `LOG_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerDefaults {
    /// Minimum severity for the logger as a whole.
    pub level: LogLevel,
    /// Log-line template; `{asctime}`, `{name}`, `{levelname}`, `{message}`.
    pub format: String,
    /// strftime pattern for `{asctime}`.
    pub datefmt: String,
    /// Console-sink threshold; `None` disables the console sink.
    pub console_level: Option<LogLevel>,
    /// File-sink threshold; `None` disables the file sink.
    pub file_level: Option<LogLevel>,
    /// Derived: `<logs dir>/<project name>.log`.
    pub log_file: PathBuf,
}

impl LoggerDefaults {
    pub fn load(paths: &PathSet, project: &ProjectIdentity) -> ConfigResult<Self> {
        Self::resolve(&default_source(), paths, project)
    }

    /// Resolve fields in declaration order, then derive the log-file path
    /// from the already-resolved logs directory and project name.
    ///
    /// Setting `LOG_CONSOLE_LEVEL` or `LOG_FILE_LEVEL` to an empty string
    /// disables that sink.
    pub fn resolve(
        source: &dyn Source,
        paths: &PathSet,
        project: &ProjectIdentity,
    ) -> ConfigResult<Self> {
        let scope = Scope::new(LOG_PREFIX, source);
        let level = scope.validated("LEVEL", "INFO", LogLevel::parse)?;
        let format = scope.validated(
            "FORMAT",
            "{asctime} - {name} - {levelname} - {message}",
            validate::line_template,
        )?;
        let datefmt = scope.validated("DATEFMT", "%Y-%m-%d %H:%M:%S", validate::timestamp_format)?;
        let console_level = scope.optional("CONSOLE_LEVEL", Some("INFO"), LogLevel::parse)?;
        let file_level = scope.optional("FILE_LEVEL", Some("DEBUG"), LogLevel::parse)?;
        let log_file = paths.logs.join(format!("{}.log", project.name));

        Ok(Self {
            level,
            format,
            datefmt,
            console_level,
            file_level,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MapSource;
    use tempfile::TempDir;

    fn fixtures() -> (TempDir, PathSet, ProjectIdentity) {
        let temp = TempDir::new().unwrap();
        for dir in [
            "src", "images", "data", "input", "output", "logs", "scripts", "tests",
        ] {
            std::fs::create_dir(temp.path().join(dir)).unwrap();
        }
        let source = MapSource::new().with("PATH_PROJECT_ROOT", temp.path().to_str().unwrap());
        let paths = PathSet::resolve(&source).unwrap();
        let project = ProjectIdentity::from_paths(&paths).unwrap();
        (temp, paths, project)
    }

    #[test]
    fn log_file_derives_from_logs_dir_and_project_name() {
        let (_temp, paths, project) = fixtures();
        let cfg = LoggerDefaults::resolve(&MapSource::new(), &paths, &project).unwrap();

        assert_eq!(
            cfg.log_file,
            paths.logs.join(format!("{}.log", project.name))
        );
        assert_eq!(cfg.level, LogLevel::Info);
        assert_eq!(cfg.console_level, Some(LogLevel::Info));
        assert_eq!(cfg.file_level, Some(LogLevel::Debug));
    }

    #[test]
    fn level_override_outside_set_is_rejected() {
        let (_temp, paths, project) = fixtures();
        let source = MapSource::new().with("LOG_LEVEL", "VERBOSE");
        let err = LoggerDefaults::resolve(&source, &paths, &project).unwrap_err();
        let msg = err.to_string();
        for allowed in LogLevel::ALL {
            assert!(msg.contains(allowed), "missing '{allowed}' in: {msg}");
        }
    }

    #[test]
    fn empty_sink_override_disables_the_sink() {
        let (_temp, paths, project) = fixtures();
        let source = MapSource::new().with("LOG_FILE_LEVEL", "");
        let cfg = LoggerDefaults::resolve(&source, &paths, &project).unwrap();
        assert_eq!(cfg.file_level, None);
        assert_eq!(cfg.console_level, Some(LogLevel::Info));
    }

    #[test]
    fn bad_datefmt_is_rejected() {
        let (_temp, paths, project) = fixtures();
        let source = MapSource::new().with("LOG_DATEFMT", "%Q");
        assert!(LoggerDefaults::resolve(&source, &paths, &project).is_err());
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warning < LogLevel::Critical);
    }
}
