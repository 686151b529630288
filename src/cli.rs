// src/cli.rs
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

use crate::config::options::{AppOptions, Edition};
use crate::core::HttpTransport;
use crate::error::ArgError;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Command {
    Run(AppOptions),
    Help,
}

/// Parse flags over the defaults. No flags at all means "run the defaults".
pub fn parse_args<I, S>(args: I) -> Result<Command, ArgError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = AppOptions::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(a) = args.next() {
        match a.as_str() {
            "--year" => {
                let v = args.next().ok_or(ArgError::MissingValue("--year"))?;
                let year: u16 = v.parse().map_err(|_| ArgError::Invalid { flag: "--year", value: v })?;
                options.edition = Edition::for_year(year).ok_or(ArgError::UnsupportedYear(year))?;
            }
            "--no-main" => options.passes.main_track = false,
            "--no-workshops" => options.passes.workshops = false,
            "-o" | "--out" => {
                let v = args.next().ok_or(ArgError::MissingValue("--out"))?;
                options.out_dir = PathBuf::from(v);
            }
            "--retries" => {
                let v = args.next().ok_or(ArgError::MissingValue("--retries"))?;
                options.retry.max_retries =
                    v.parse().map_err(|_| ArgError::Invalid { flag: "--retries", value: v })?;
            }
            "--delay-ms" => {
                let v = args.next().ok_or(ArgError::MissingValue("--delay-ms"))?;
                let ms: u64 = v.parse().map_err(|_| ArgError::Invalid { flag: "--delay-ms", value: v })?;
                options.retry.delay = Duration::from_millis(ms);
            }
            "--log-file" => {
                let v = args.next().ok_or(ArgError::MissingValue("--log-file"))?;
                options.log_file = Some(PathBuf::from(v));
            }
            "--no-log-file" => options.log_file = None,
            "-v" | "--verbose" => options.log_level = LevelFilter::Debug,
            "-q" | "--quiet" => options.log_level = LevelFilter::Warn,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(ArgError::Unknown(a)),
        }
    }

    Ok(Command::Run(options))
}

/// Per-item console progress: `[  3/120] name`.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl ConsoleProgress {
    fn line(&mut self, mark: &str, name: &str) {
        self.seen += 1;
        let width = self.total.to_string().len();
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "[{:>width$}/{}] {mark}{name}", self.seen, self.total);
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, label: &str, total: usize) {
        self.total = total;
        self.seen = 0;
        println!("{label}: {total} item(s)");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        self.line("", name);
    }

    fn item_skipped(&mut self, name: &str) {
        self.line("(exists) ", name);
    }

    fn item_failed(&mut self, name: &str) {
        self.line("FAILED ", name);
    }

    fn finish(&mut self) {
        println!("------------------------------------------");
    }
}

/// Run against the live site and print the end-of-run report.
pub fn run(options: &AppOptions) -> RunSummary {
    let transport = HttpTransport::new();
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(options, &transport, &mut progress);
    print_report(&summary);
    summary
}

pub fn print_report(summary: &RunSummary) {
    println!(
        "Downloaded {}, already present {}",
        summary.downloaded, summary.skipped
    );
    if !summary.unmatched.is_empty() {
        println!("{} titles had no matching paper", summary.unmatched.len());
    }
    for what in &summary.aborted {
        println!("Aborted: {what}");
    }
    if !summary.failed.is_empty() {
        println!("Failed to download {} papers", summary.failed.len());
    }
    if !summary.failed.is_empty() || !summary.aborted.is_empty() {
        println!("Re-run to retry download of missing papers");
    }
}
