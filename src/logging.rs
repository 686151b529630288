// src/logging.rs
//
// `log` backend: `[hh:mm:ss.mmm][LEVEL] msg` to stderr, and everything from
// DEBUG up appended to a debug log file when one is configured.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

fn format_line(level: log::Level, msg: &std::fmt::Arguments<'_>) -> String {
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    format!("[{elapsed}][{level}] {msg}\n")
}

struct RunLogger {
    console: LevelFilter,
    file: Option<Mutex<File>>,
}

impl RunLogger {
    fn file_level(&self) -> LevelFilter {
        if self.file.is_some() { LevelFilter::Debug } else { LevelFilter::Off }
    }
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // Dependencies stay quiet unless they have something to complain about
        let ours = metadata.target().starts_with(env!("CARGO_CRATE_NAME"));
        let level = metadata.level();
        (level <= self.console || level <= self.file_level())
            && (ours || level <= log::Level::Warn)
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());

        if record.level() <= self.console {
            eprint!("{line}");
        }
        if record.level() <= self.file_level() {
            if let Some(file) = &self.file {
                if let Ok(mut f) = file.lock() {
                    let _ = f.write_all(line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the logger. A log file that can't be opened is reported and
/// skipped; the run goes on with console output only.
pub fn init(console: LevelFilter, log_file: Option<&Path>) -> Result<(), SetLoggerError> {
    start();

    let mut file_error = None;
    let file = log_file.and_then(|p| match open_log_file(p) {
        Ok(f) => Some(Mutex::new(f)),
        Err(e) => {
            file_error = Some(format!("cannot open log file {}: {e}", p.display()));
            None
        }
    });

    let logger = RunLogger { console, file };
    let max = console.max(logger.file_level());
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max);

    if let Some(msg) = file_error {
        log::warn!("{msg}");
    }
    Ok(())
}
