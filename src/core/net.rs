// src/core/net.rs

// Blocking HTTP(S) over ureq. Everything above this file talks to `Transport`.

use std::io::{Read, Write};
use std::time::Duration;

use crate::config::consts::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

/// The three things the downloader needs from the network.
pub trait Transport {
    /// Status code of `url` without reading its body.
    fn status(&self, url: &str) -> Result<u16, FetchError>;

    /// Stream the body of `url` into `sink`; returns the byte count.
    fn retrieve(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError>;

    /// Whole body of `url` as text (index and program pages).
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout_read(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }

    fn get(&self, url: &str) -> Result<ureq::Response, FetchError> {
        self.agent.get(url).call().map_err(|e| classify(url, e))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(url: &str, error: ureq::Error) -> FetchError {
    match error {
        ureq::Error::Status(status, _) => FetchError::Status { url: s!(url), status },
        ureq::Error::Transport(t) => FetchError::Connect { url: s!(url), reason: t.to_string() },
    }
}

impl Transport for HttpTransport {
    fn status(&self, url: &str) -> Result<u16, FetchError> {
        match self.agent.head(url).call() {
            Ok(resp) => Ok(resp.status()),
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(e) => Err(classify(url, e)),
        }
    }

    fn retrieve(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        let resp = self.get(url)?;
        let mut reader = resp.into_reader();

        // Copy by hand so read and write failures stay distinguishable
        let mut buf = [0u8; 64 * 1024];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(FetchError::Transfer { url: s!(url), reason: e.to_string() });
                }
            };
            sink.write_all(&buf[..n]).map_err(FetchError::Write)?;
            total += n as u64;
        }
        sink.flush().map_err(FetchError::Write)?;
        Ok(total)
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.get(url)?;
        resp.into_string()
            .map_err(|e| FetchError::Transfer { url: s!(url), reason: e.to_string() })
    }
}
