// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a single download attempt (or page fetch) failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot reach {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("transfer from {url} broke off: {reason}")]
    Transfer { url: String, reason: String },

    #[error("writing downloaded bytes failed: {0}")]
    Write(#[source] io::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Local filesystem trouble won't go away by asking the server again.
    pub fn is_permanent(&self) -> bool {
        matches!(self, FetchError::Write(_) | FetchError::Io { .. })
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page does not look like the page we know how to read.
    #[error("unrecognized page structure: {0}")]
    Structure(String),

    #[error("bad selector `{css}`: {reason}")]
    Selector { css: &'static str, reason: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ArgError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("invalid value `{value}` for {flag}")]
    Invalid { flag: &'static str, value: String },

    #[error("no preset for year {0} (supported: 2019, 2020)")]
    UnsupportedYear(u16),

    #[error("unknown argument: {0}")]
    Unknown(String),
}
