use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Stderr timestamps are time of day only; the log file keeps the full
/// date and offset.
const TERMINAL_TIME: &str = "%H:%M:%S%.3f";
const FILE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// One record per line: `time LEVEL crate: fields`.
struct CliFormat {
    time_format: &'static str,
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[2m",
    }
}

/// Crate that emitted the record, e.g. `tax_core` for
/// `tax_core::calculations::federal`.
fn origin(target: &str) -> &str {
    target.split("::").next().unwrap_or(target)
}

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format(self.time_format);
        let origin = origin(meta.target());

        if writer.has_ansi_escapes() {
            let color = level_color(meta.level());
            write!(writer, "{time} {color}{:<5}\x1b[0m \x1b[1m{origin}:\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{time} {:<5} {origin}: ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the level filter. `RUST_LOG` wins over the configured level.
fn make_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'")),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Stdout
///   is left to command output.
/// - File: appended to when `log_file` is given. The directory must exist.
pub fn init_logging(
    level: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFormat {
            time_format: TERMINAL_TIME,
        })
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(CliFormat {
                        time_format: FILE_TIME,
                    })
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn origin_is_the_crate_segment() {
        assert_eq!(origin("tax_core::calculations::federal"), "tax_core");
        assert_eq!(origin("tax_cli"), "tax_cli");
    }

    #[test]
    fn configured_level_is_used_when_rust_log_is_unset() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        assert!(make_filter("tax_core=debug,warn").is_ok());
        assert!(make_filter("tax_core=loud").is_err());
    }
}
