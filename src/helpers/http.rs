//! Blocking HTTP GET helpers
//!
//! One `ureq` agent per cache, shared by every fetch. Bodies are streamed to a
//! writer with a progress bar; when the server announces a `Content-Length`
//! the number of bytes actually received must match it.

use crate::core::error::{FetchError, Result};
use crate::core::output;
use std::io::{Read, Write};
use std::time::Duration;

const USER_AGENT: &str = concat!("mc-artifacts/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a configured `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }

    fn call(&self, url: &str) -> Result<ureq::Response> {
        self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, response) => FetchError::Http {
                url: url.to_string(),
                reason: format!("status {} {}", code, response.status_text()),
            },
            ureq::Error::Transport(t) => FetchError::Http {
                url: url.to_string(),
                reason: t.to_string(),
            },
        })
    }

    /// Stream the response body for `url` into `out`, returning the byte count.
    pub fn get_to_writer(&self, url: &str, label: &str, out: &mut dyn Write) -> Result<u64> {
        let pb = output::ProgressGuard::new(output::spinner(&format!(
            "downloading {}",
            label
        )));

        let response = self.call(url)?;
        let expected = response
            .header("content-length")
            .and_then(|s| s.parse::<u64>().ok());
        if let Some(len) = expected {
            output::upgrade_to_bytes(&pb, len);
        }

        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];
        let mut total_bytes = 0u64;

        let read_err = |e: std::io::Error| FetchError::Http {
            url: url.to_string(),
            reason: format!("read error: {}", e),
        };

        loop {
            let bytes_read = reader.read(&mut buffer).map_err(&read_err)?;
            if bytes_read == 0 {
                break;
            }
            out.write_all(&buffer[..bytes_read])
                .map_err(|e| FetchError::Http {
                    url: url.to_string(),
                    reason: format!("write error: {}", e),
                })?;
            total_bytes += bytes_read as u64;
            pb.set_position(total_bytes);
        }

        drop(pb);
        verify_length(url, expected, total_bytes)?;
        Ok(total_bytes)
    }

    /// GET `url` into memory.
    pub fn get_bytes(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.get_to_writer(url, label, &mut body)?;
        Ok(body)
    }

    /// GET `url` as UTF-8 text.
    pub fn get_text(&self, url: &str, label: &str) -> Result<String> {
        let body = self.get_bytes(url, label)?;
        String::from_utf8(body).map_err(|e| FetchError::Http {
            url: url.to_string(),
            reason: format!("response is not valid UTF-8: {}", e),
        })
    }
}

/// A body shorter or longer than announced means the transfer was cut.
fn verify_length(url: &str, expected: Option<u64>, actual: u64) -> Result<()> {
    match expected {
        Some(len) if len != actual => Err(FetchError::Http {
            url: url.to_string(),
            reason: format!("truncated body: expected {} bytes, got {}", len, actual),
        }),
        _ => Ok(()),
    }
}
