//! # Synchronous Cache Client
//!
//! Purpose: Expose a compact, blocking API for storing and fetching string
//! values on a radish cache server.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `CacheClient` hides socket and framing details.
//! 2. **Connection Per Call**: Every operation opens a fresh TCP connection,
//!    performs one request/response exchange, and drops it.
//! 3. **Explicit Outcomes**: Transport failures are `ClientError` values, never
//!    strings that could be mistaken for cache data.
//! 4. **Bounded Blocking**: Connect, read, and write honor configured timeouts.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::resp::{parse_fetch_reply, parse_store_reply, Command};

/// Maximum number of bytes read for a single response.
pub const RESPONSE_BUFFER_SIZE: usize = 1024;

/// Result type for the cache client.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the cache client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or IO failure while connecting, reading, or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The server closed the connection without replying.
    #[error("connection closed before a response was received")]
    ConnectionClosed,
    /// The response bytes were not valid UTF-8.
    #[error("response is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// Host and port did not resolve to any socket address.
    #[error("no address found for {0}")]
    InvalidAddress(String),
    /// Server returned an error reply.
    #[error("server error: {message}")]
    Server { message: String },
    /// Response did not match the expected command response.
    #[error("unexpected response: {0:?}")]
    UnexpectedResponse(String),
    /// Configuration document could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Blocking client for the radish cache server.
///
/// Holds only the connection target and timeouts; no socket outlives a call,
/// so a client can be cloned or shared across threads freely.
#[derive(Debug, Clone)]
pub struct CacheClient {
    config: ClientConfig,
}

impl Default for CacheClient {
    fn default() -> Self {
        CacheClient::with_config(ClientConfig::default())
    }
}

impl CacheClient {
    /// Creates a client for `host` on the standard port (7171).
    pub fn new(host: impl Into<String>) -> Self {
        CacheClient::with_config(ClientConfig::with_host(host))
    }

    /// Creates a client with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        CacheClient { config }
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stores `value` under `key`.
    ///
    /// Returns true only when the server answers exactly `+OK`. Server errors,
    /// unexpected replies, and transport failures all yield false.
    pub fn put(&self, key: &str, value: &str) -> bool {
        match self.try_put(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "put failed");
                false
            }
        }
    }

    /// Fetches the value stored under `key`.
    ///
    /// Returns `None` when the key is missing or when the request fails.
    /// Use [`CacheClient::try_get`] to tell the two apart.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "get failed");
                None
            }
        }
    }

    /// Stores `value` under `key`, surfacing the reason for any failure.
    #[instrument(skip(self, value), fields(host = %self.config.host, port = self.config.port))]
    pub fn try_put(&self, key: &str, value: &str) -> ClientResult<()> {
        let reply = self.send_command(&Command::Put { key, value }.to_frame())?;
        parse_store_reply(&reply)
    }

    /// Fetches the value stored under `key`, surfacing the reason for any
    /// failure. `Ok(None)` means the key is missing.
    #[instrument(skip(self), fields(host = %self.config.host, port = self.config.port))]
    pub fn try_get(&self, key: &str) -> ClientResult<Option<String>> {
        let reply = self.send_command(&Command::Get { key }.to_frame())?;
        parse_fetch_reply(&reply)
    }

    /// Runs one request/response exchange on a fresh connection.
    ///
    /// Reads at most `RESPONSE_BUFFER_SIZE` bytes in a single receive and
    /// returns them as trimmed text. The stream is dropped on every path.
    fn send_command(&self, frame: &[u8]) -> ClientResult<String> {
        let mut stream = self.connect()?;
        debug!(request = %String::from_utf8_lossy(frame).escape_debug(), "sending command");

        stream.write_all(frame)?;
        stream.flush()?;

        let mut buf = [0u8; RESPONSE_BUFFER_SIZE];
        let read = stream.read(&mut buf)?;
        if read == 0 {
            return Err(ClientError::ConnectionClosed);
        }

        let text = String::from_utf8(buf[..read].to_vec())?;
        let reply = text.trim();
        debug!(reply = %reply.escape_debug(), bytes = read, "received reply");
        Ok(reply.to_string())
    }

    fn connect(&self) -> ClientResult<TcpStream> {
        let stream = connect_stream(&self.config)?;
        if let Some(timeout) = self.config.read_timeout {
            stream.set_read_timeout(Some(timeout))?;
        }
        if let Some(timeout) = self.config.write_timeout {
            stream.set_write_timeout(Some(timeout))?;
        }
        // Frames are tiny and written once; don't let Nagle hold them back.
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

fn connect_stream(config: &ClientConfig) -> ClientResult<TcpStream> {
    let target = (config.host.as_str(), config.port);
    let mut last_err = None;

    for addr in target.to_socket_addrs()? {
        let attempt = match config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                debug!(%addr, error = %err, "connect attempt failed");
                last_err = Some(err);
            }
        }
    }

    match last_err {
        Some(err) => Err(ClientError::Io(err)),
        None => Err(ClientError::InvalidAddress(format!(
            "{}:{}",
            config.host, config.port
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fixes_standard_port() {
        let client = CacheClient::new("cache.example");
        assert_eq!(client.host(), "cache.example");
        assert_eq!(client.port(), 7171);
    }

    #[test]
    fn default_targets_localhost() {
        let client = CacheClient::default();
        assert_eq!(client.host(), "localhost");
        assert_eq!(client.port(), 7171);
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<CacheClient>();
    }

    #[test]
    fn errors_render_cause() {
        let err = ClientError::Server {
            message: "ERR Unknown command".to_string(),
        };
        assert_eq!(err.to_string(), "server error: ERR Unknown command");
        assert_eq!(
            ClientError::UnexpectedResponse("+QUEUED".to_string()).to_string(),
            "unexpected response: \"+QUEUED\""
        );
    }
}
