//! Tracing setup for the binary.
//!
//! - Verbosity comes from `LogLevel` only; RUST_LOG is not consulted.
//! - The console layer writes to stderr; stdout carries the progress listing.
//! - `--json` switches console and file layers to JSON lines together.
//! - The optional file layer is non-blocking and refused below a symlinked
//!   directory.

use anyhow::Result;
use chrono::Local;
use file_dispatch::output as out;
use file_dispatch::platform::open_log_file_secure_append;
use file_dispatch::{LogLevel, path_has_symlink_ancestor};
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self as tsfmt, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, registry};

/// Local wall-clock timestamps, e.g. `18/10/26 14:03:59`.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

// Each level shows one tier more than its name suggests: "info" users want
// the per-file debug lines too.
fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn fmt_layer<S, W>(json: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tsfmt::layer().with_writer(writer).with_thread_ids(true);
    if json {
        // event_format() resets the timer, so it is set on the JSON format.
        layer
            .fmt_fields(tsfmt::format::JsonFields::new())
            .event_format(tsfmt::format().json().with_timer(LocalTime).with_thread_ids(true))
            .boxed()
    } else {
        layer.with_timer(LocalTime).compact().boxed()
    }
}

/// Open `path` for non-blocking appends, or explain why not.
fn open_file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err("an ancestor directory is a symlink".to_string()),
        Err(e) => return Err(format!("symlink check failed: {e}")),
    }
    let file = open_log_file_secure_append(path).map_err(|e| e.to_string())?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered file logs are flushed.
pub fn init_tracing(
    level: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::default().add_directive(level_filter(level).into());

    let mut guard = None;
    let file_layer = log_file.and_then(|path| match open_file_writer(path) {
        Ok((writer, g)) => {
            guard = Some(g);
            Some(fmt_layer(json, writer))
        }
        Err(reason) => {
            out::print_warn(&format!(
                "File logging to '{}' disabled: {reason}. Logs continue on stderr.",
                path.display()
            ));
            None
        }
    });

    registry()
        .with(filter)
        .with(fmt_layer(json, std::io::stderr))
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}
