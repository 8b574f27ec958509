use std::fmt::{self as stdfmt, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Result;
use pf_config::{LogFormat, LoggingConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// FileFields: keeps the file layer's field cache apart from stderr's
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FileFields(DefaultFields);

impl<'writer> fmt::FormatFields<'writer> for FileFields {
    fn format_fields<R: tracing_subscriber::field::RecordFields>(
        &self,
        writer: fmt::format::Writer<'writer>,
        fields: R,
    ) -> stdfmt::Result {
        self.0.format_fields(writer, fields)
    }
}

// ---------------------------------------------------------------------------
// DomainFormat: `domain` field rendered as a `[domain]` prefix
// ---------------------------------------------------------------------------

/// Plain-text event formatter:
///
/// ```text
/// 2026-10-19T08:12:03Z  INFO [synth] kpi generated kpi="GRAFFITI" quota=1500
/// ```
///
/// Events without a `domain` field (from dependencies) have no prefix.
pub struct DomainFormat {
    timer: SystemTime,
}

impl DomainFormat {
    pub fn new() -> Self {
        Self { timer: SystemTime }
    }
}

impl Default for DomainFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for DomainFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> fmt::FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        let ansi = writer.has_ansi_escapes();

        if self.timer.format_time(&mut writer).is_err() {
            write!(writer, "<unknown time>")?;
        }

        let level = *event.metadata().level();
        if ansi {
            let color = match level {
                Level::ERROR => "31",
                Level::WARN => "33",
                Level::INFO => "32",
                Level::DEBUG => "34",
                Level::TRACE => "35",
            };
            write!(writer, " \x1b[{color}m{level:>5}\x1b[0m ")?;
        } else {
            write!(writer, " {level:>5} ")?;
        }

        let mut visitor = DomainExtractor::default();
        event.record(&mut visitor);

        if let Some(domain) = &visitor.domain {
            if ansi {
                write!(writer, "\x1b[1;36m[{domain}]\x1b[0m ")?;
            } else {
                write!(writer, "[{domain}] ")?;
            }
        }

        write!(writer, "{}", visitor.message)?;
        if !visitor.fields.is_empty() {
            write!(writer, " {}", visitor.fields)?;
        }
        writeln!(writer)
    }
}

#[derive(Default)]
struct DomainExtractor {
    domain: Option<String>,
    message: String,
    fields: String,
}

impl DomainExtractor {
    fn push_field(&mut self, name: &str, value: impl stdfmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        write!(&mut self.fields, "{name}={value}").ok();
    }
}

impl Visit for DomainExtractor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "domain" => self.domain = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn stdfmt::Debug) {
        match field.name() {
            "domain" => self.domain = Some(format!("{value:?}").trim_matches('"').to_string()),
            "message" => {
                write!(&mut self.message, "{value:?}").ok();
            }
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push_field(field.name(), value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push_field(field.name(), value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push_field(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push_field(field.name(), value);
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the `EnvFilter` from `RUST_LOG` or, when unset, from the configured
/// level plus per-module overrides.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    let mut directives = config.level.clone();
    for (module, level) in &config.modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))
}

/// Where the log file goes: relative paths are placed under `base_dir`.
pub fn resolve_log_path(config: &LoggingConfig, base_dir: &Path) -> Option<PathBuf> {
    config.file.as_ref().map(|file| {
        if file.is_relative() {
            base_dir.join(file)
        } else {
            file.clone()
        }
    })
}

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Plain => fmt::layer()
            .event_format(DomainFormat::new())
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, writer: NonBlocking) -> BoxedLayer {
    match format {
        // domain stays a regular key so log consumers can query it
        LogFormat::Json => fmt::layer()
            .json()
            .fmt_fields(FileFields::default())
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Plain => fmt::layer()
            .event_format(DomainFormat::new())
            .fmt_fields(FileFields::default())
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    }
}

/// Initialise the `tracing` subscriber stack from [`LoggingConfig`].
///
/// Returns an optional [`WorkerGuard`] that must be held until the process
/// exits; dropping it flushes and closes the non-blocking file writer.
/// `RUST_LOG` overrides all config-driven directives.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    let mut layers = vec![stderr_layer(config.format)];
    let mut guard = None;

    if let Some(path) = resolve_log_path(config, base_dir) {
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("log file path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("log file path has no file name"))?;
        std::fs::create_dir_all(dir)?;

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
        layers.push(file_layer(config.format, non_blocking));
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
