// src/fetch.rs
//
// One download = status check, then streamed retrieval into `<dest>.part`,
// renamed onto `dest` when complete. A partial file never survives a failed
// attempt, so "file exists" stays a reliable done-marker for re-runs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::config::consts::PART_SUFFIX;
use crate::core::Transport;
use crate::error::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included.
    pub max_retries: u32,
    /// Fixed pause after a failed attempt.
    pub delay: Duration,
}

/// Result class of one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Succeeded,
    FailedTransient,
    FailedPermanent,
}

impl DownloadOutcome {
    pub fn of(result: &Result<u64, FetchError>) -> Self {
        match result {
            Ok(_) => DownloadOutcome::Succeeded,
            Err(e) if e.is_permanent() => DownloadOutcome::FailedPermanent,
            Err(_) => DownloadOutcome::FailedTransient,
        }
    }
}

#[derive(Debug)]
pub struct FetchReport {
    pub attempts: u32,
    /// Bytes written, or the last failure seen.
    pub result: Result<u64, FetchError>,
}

impl FetchReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Fetcher<'t, T: Transport + ?Sized> {
    transport: &'t T,
    policy: RetryPolicy,
}

impl<'t, T: Transport + ?Sized> Fetcher<'t, T> {
    pub fn new(transport: &'t T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &'t T {
        self.transport
    }

    /// Download with bounded retries. Never panics or propagates; the report
    /// carries the attempt count and the last error.
    pub fn fetch(&self, url: &str, dest: &Path) -> FetchReport {
        let mut attempts = 0;
        let mut last = Err(FetchError::Connect {
            url: s!(url),
            reason: s!("no attempt made (retry limit is 0)"),
        });

        while attempts < self.policy.max_retries {
            attempts += 1;
            last = self.fetch_once(url, dest);

            match DownloadOutcome::of(&last) {
                DownloadOutcome::Succeeded | DownloadOutcome::FailedPermanent => break,
                DownloadOutcome::FailedTransient => {
                    if let Err(e) = &last {
                        log::warn!("{url}: attempt {attempts}/{}: {e}", self.policy.max_retries);
                    }
                    if attempts < self.policy.max_retries && !self.policy.delay.is_zero() {
                        thread::sleep(self.policy.delay);
                    }
                }
            }
        }

        if let Err(e) = &last {
            log::error!("Giving up on {url} after {attempts} attempt(s): {e}");
        }
        FetchReport { attempts, result: last }
    }

    /// Boolean view of [`Fetcher::fetch`].
    pub fn fetch_with_retry(&self, url: &str, dest: &Path) -> bool {
        self.fetch(url, dest).succeeded()
    }

    /// One attempt: status check, then retrieval.
    pub fn fetch_once(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let status = self.transport.status(url)?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status { url: s!(url), status });
        }

        let part = part_path(dest);
        let result = self.retrieve_to(url, &part).and_then(|n| {
            fs::rename(&part, dest)
                .map(|_| n)
                .map_err(|source| FetchError::Io { path: dest.to_path_buf(), source })
        });

        if result.is_err() && part.exists() {
            if let Err(e) = fs::remove_file(&part) {
                log::warn!("Could not remove partial file {}: {e}", part.display());
            }
        }
        result
    }

    fn retrieve_to(&self, url: &str, part: &Path) -> Result<u64, FetchError> {
        let file = File::create(part)
            .map_err(|source| FetchError::Io { path: part.to_path_buf(), source })?;
        let mut out = BufWriter::new(file);
        let n = self.transport.retrieve(url, &mut out)?;
        out.flush().map_err(FetchError::Write)?;
        Ok(n)
    }
}

/// `paper.pdf` -> `paper.pdf.part`
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}
