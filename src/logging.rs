//! Logger factory.
//!
//! Consumes [`LoggerDefaults`] and builds a layered tracing subscriber with
//! up to two sinks: console (stderr) and a per-run log file opened in
//! truncate mode. A sink whose threshold is unset is not attached at all.
//! The log directory is created here, not during configuration resolution.

use crate::config::{LogLevel, LoggerDefaults};
use crate::error::{ConfigError, ConfigResult};
use chrono::Local;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// Identity of an initialized logger.
#[derive(Debug, Clone)]
pub struct LoggerHandle {
    pub name: String,
    /// Path of the file sink, if one was attached.
    pub log_file: Option<PathBuf>,
}

/// Renders events through the configured line template.
///
/// Supported placeholders: `{asctime}`, `{name}`, `{levelname}`, `{message}`.
struct LineFormat {
    template: String,
    datefmt: String,
    name: String,
}

impl LineFormat {
    fn new(cfg: &LoggerDefaults, name: &str) -> Self {
        Self {
            template: cfg.format.clone(),
            datefmt: cfg.datefmt.clone(),
            name: name.to_string(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        use fmt::Write as _;

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        let asctime = Local::now().format(&self.datefmt).to_string();
        let line = self
            .template
            .replace("{asctime}", &asctime)
            .replace("{name}", &self.name)
            .replace("{levelname}", level_name(*event.metadata().level()))
            .replace("{message}", &message);
        writeln!(writer, "{line}")
    }
}

/// Collects the `message` field of an event.
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            use fmt::Write as _;
            let _ = write!(self.0, "{value:?}");
        }
    }
}

fn level_name(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::TRACE | tracing::Level::DEBUG => "DEBUG",
        tracing::Level::INFO => "INFO",
        tracing::Level::WARN => "WARNING",
        _ => "ERROR",
    }
}

/// Effective sink threshold: the stricter of the logger level and the
/// sink's own level, as in stdlib-logging semantics.
fn sink_filter(cfg: &LoggerDefaults, sink_level: LogLevel) -> tracing::level_filters::LevelFilter {
    cfg.level.max(sink_level).to_filter()
}

/// Build the layered subscriber without installing it.
///
/// Creates the log directory and truncates the log file when a file sink is
/// configured. Exposed separately from [`init_logging`] so tests can use
/// `tracing::subscriber::with_default`.
pub fn build_subscriber(
    cfg: &LoggerDefaults,
    name: &str,
) -> ConfigResult<(impl Subscriber + Send + Sync + use<>, LoggerHandle)> {
    let console_layer = cfg.console_level.map(|level| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat::new(cfg, name))
            .with_writer(std::io::stderr)
            .with_filter(sink_filter(cfg, level))
    });

    let mut log_file = None;
    let file_layer = match cfg.file_level {
        Some(level) => {
            if let Some(parent) = cfg.log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(&cfg.log_file)?;
            log_file = Some(cfg.log_file.clone());
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat::new(cfg, name))
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(sink_filter(cfg, level)),
            )
        }
        None => None,
    };

    let subscriber = Registry::default().with(console_layer).with(file_layer);
    let handle = LoggerHandle {
        name: name.to_string(),
        log_file,
    };
    Ok((subscriber, handle))
}

/// Build and install the process-global logger.
///
/// A missing name falls back to the current executable's stem. Fails with
/// [`ConfigError::LoggingInit`] if a global subscriber is already set.
pub fn init_logging(cfg: &LoggerDefaults, name: Option<&str>) -> ConfigResult<LoggerHandle> {
    let name = match name {
        Some(n) => n.to_string(),
        None => caller_name(),
    };
    let (subscriber, handle) = build_subscriber(cfg, &name)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|_| ConfigError::LoggingInit)?;
    Ok(handle)
}

/// Name inferred from the invocation context: the running executable's stem.
fn caller_name() -> String {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "app".to_string())
}
