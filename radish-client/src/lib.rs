//! # Radish Sync Client
//!
//! Purpose: Provide a small, blocking client for the radish cache server,
//! which speaks a two-command subset of RESP (`PUT` and `GET`) on port 7171.
//!
//! ## Design Principles
//! 1. **One Connection Per Call**: No pooling; each request owns its socket.
//! 2. **Protocol Clarity**: Frames are encoded explicitly as RESP arrays.
//! 3. **Typed Failures**: `try_*` calls return `ClientResult`; the plain
//!    `put`/`get` calls fold failures into `false`/`None`.

mod client;
mod config;
mod resp;

pub use client::{CacheClient, ClientError, ClientResult, RESPONSE_BUFFER_SIZE};
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use resp::{encode_command, parse_fetch_reply, parse_store_reply, Command};
