//! # Client Configuration
//!
//! Connection target and socket timeouts for `CacheClient`. The struct is
//! plain data so it can be built in code or loaded from JSON; timeouts are
//! written as milliseconds on the wire (`connect_timeout_ms`, ...).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ClientResult;

/// Port the cache server listens on.
pub const DEFAULT_PORT: u16 = 7171;

/// Host used when none is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Timeout applied to connect, read, and write unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the cache client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server hostname or IP, e.g. "localhost".
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Optional TCP connect timeout.
    #[serde(rename = "connect_timeout_ms", with = "millis")]
    pub connect_timeout: Option<Duration>,
    /// Optional TCP read timeout.
    #[serde(rename = "read_timeout_ms", with = "millis")]
    pub read_timeout: Option<Duration>,
    /// Optional TCP write timeout.
    #[serde(rename = "write_timeout_ms", with = "millis")]
    pub write_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Some(DEFAULT_TIMEOUT),
            read_timeout: Some(DEFAULT_TIMEOUT),
            write_timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `host` on the standard port.
    pub fn with_host(host: impl Into<String>) -> Self {
        ClientConfig {
            host: host.into(),
            ..ClientConfig::default()
        }
    }

    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
