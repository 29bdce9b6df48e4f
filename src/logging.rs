//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console events go to stderr so they don't split the step lines printed on stdout.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//!
//! Implementation notes:
//! - File logging uses tracing_appender::non_blocking to avoid blocking on I/O.
//! - We refuse file logging if any ancestor of the file path is a symlink.

use anyhow::{Context, Result};
use chrono::Local;
use nzb_move::output as out;
use nzb_move::platform::open_log_file_secure_append;
use nzb_move::{LogLevel, default_log_path, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Open the log file behind a non-blocking writer.
/// Symlinked ancestors are refused; the parent directory is created on demand.
fn open_file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err("an ancestor directory is a symlink".into()),
        Err(e) => return Err(format!("cannot inspect ancestors: {e}")),
    }
    let file = open_log_file_secure_append(path).map_err(|e| e.to_string())?;
    Ok(tracing_appender::non_blocking(file))
}

/// Initialize tracing based on LogLevel and format. Returns an optional WorkerGuard
/// if a file appender is created (must be held until shutdown to flush logs).
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());

    let file = log_file.and_then(|path| match open_file_writer(path) {
        Ok(pair) => Some(pair),
        Err(reason) => {
            out::print_warn(&format!(
                "File logging to '{}' disabled ({reason}); logging to the console only.",
                path.display()
            ));
            if let Ok(def) = default_log_path() {
                out::print_info(&format!("The default log path is {}", def.display()));
            }
            None
        }
    });
    let (file_writer, guard) = match file {
        Some((w, g)) => (Some(w), Some(g)),
        None => (None, None),
    };

    // Option<Layer> is a no-op layer when None, so one registry covers every combination.
    let console_json = json.then(|| {
        tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(io::stderr)
    });
    let console_compact = (!json).then(|| {
        tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .compact()
            .with_writer(io::stderr)
    });
    let file_json = file_writer.clone().filter(|_| json).map(|writer| {
        tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
    });
    let file_compact = file_writer.filter(|_| !json).map(|writer| {
        tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_ansi(false)
            .compact()
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(console_json)
        .with(console_compact)
        .with(file_json)
        .with(file_compact)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}
