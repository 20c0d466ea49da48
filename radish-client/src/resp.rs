//! # RESP Command Framing
//!
//! Purpose: Encode the client's two commands as RESP arrays of bulk strings
//! and interpret the server's textual replies.
//!
//! ## Design Principles
//! 1. **Byte-Exact Frames**: Length prefixes count UTF-8 bytes, not characters.
//! 2. **Loose Replies**: The server's reply is matched against a few markers
//!    (`+OK`, `$-1`, `-`) instead of being parsed as a full RESP value.
//! 3. **Explicit Outcomes**: Interpretation returns `ClientResult`, never a
//!    sentinel string.

use crate::client::{ClientError, ClientResult};

/// Reply marker for a successful store.
pub const OK_REPLY: &str = "+OK";

/// Reply prefix for a missing key.
pub const NIL_PREFIX: &str = "$-1";

const ERROR_PREFIX: char = '-';
const SEPARATOR: &str = "\r\n";

/// A command understood by the cache server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Store `value` under `key`.
    Put { key: &'a str, value: &'a str },
    /// Fetch the value stored under `key`.
    Get { key: &'a str },
}

impl<'a> Command<'a> {
    /// Command name as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Put { .. } => "PUT",
            Command::Get { .. } => "GET",
        }
    }

    /// Appends the encoded frame to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        match *self {
            Command::Put { key, value } => encode_command(
                &[self.name().as_bytes(), key.as_bytes(), value.as_bytes()],
                out,
            ),
            Command::Get { key } => {
                encode_command(&[self.name().as_bytes(), key.as_bytes()], out)
            }
        }
    }

    /// Encodes the command into a freshly allocated frame.
    pub fn to_frame(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        self.encode(&mut out);
        out
    }
}

/// Encodes a RESP array command into the provided buffer.
pub fn encode_command(args: &[&[u8]], out: &mut Vec<u8>) {
    out.push(b'*');
    push_usize(out, args.len());
    out.extend_from_slice(b"\r\n");
    for arg in args {
        out.push(b'$');
        push_usize(out, arg.len());
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(arg);
        out.extend_from_slice(b"\r\n");
    }
}

/// Interprets the trimmed reply to a `PUT`.
///
/// Only an exact `+OK` counts as success.
pub fn parse_store_reply(reply: &str) -> ClientResult<()> {
    if reply == OK_REPLY {
        return Ok(());
    }
    if let Some(message) = reply.strip_prefix(ERROR_PREFIX) {
        return Err(ClientError::Server {
            message: message.to_string(),
        });
    }
    Err(ClientError::UnexpectedResponse(reply.to_string()))
}

/// Interprets the trimmed reply to a `GET`.
///
/// The reply is expected to look like `$<len>\r\n<value>`. The declared length
/// is not checked: everything after the first separator is the value. A reply
/// without a separator is returned whole.
pub fn parse_fetch_reply(reply: &str) -> ClientResult<Option<String>> {
    if reply.starts_with(NIL_PREFIX) {
        return Ok(None);
    }
    if let Some(message) = reply.strip_prefix(ERROR_PREFIX) {
        return Err(ClientError::Server {
            message: message.to_string(),
        });
    }
    let value = match reply.split_once(SEPARATOR) {
        Some((_, value)) => value,
        None => reply,
    };
    Ok(Some(value.to_string()))
}

fn push_usize(out: &mut Vec<u8>, mut value: usize) {
    // Digits go into a stack buffer first so no temporary String is built.
    let mut buf = [0u8; 20];
    let mut len = 0;
    if value == 0 {
        buf[0] = b'0';
        len = 1;
    } else {
        while value > 0 {
            buf[len] = b'0' + (value % 10) as u8;
            value /= 10;
            len += 1;
        }
    }
    for idx in (0..len).rev() {
        out.push(buf[idx]);
    }
}
