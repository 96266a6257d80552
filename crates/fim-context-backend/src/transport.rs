//! Stdio framing for session messages.
//!
//! Every message is a JSON object `{ "key": ..., "value": ... }` framed by a header block:
//!
//! ```text
//! Content-Length: <n>\r\n
//! \r\n
//! <n bytes of UTF-8 JSON>
//! ```

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufRead, Read, Write};

/// One key/value update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Channel key.
    pub key: String,
    /// Payload.
    pub value: Value,
}

impl Message {
    /// Create a message.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Write a single framed message to `writer`.
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> io::Result<()> {
    let body = serde_json::to_vec(message)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Largest accepted frame body, in bytes.
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Read a single framed message from `reader`.
///
/// Returns:
/// - `Ok(Some(message))` when a message is successfully read.
/// - `Ok(None)` on clean EOF (no more messages).
/// - `Err(SessionError::Message)` when the frame is unusable: a missing, unparsable or
///   oversized `Content-Length`, or a body that is not a message. The frame is consumed and
///   the reader stays aligned on the next one.
/// - `Err(SessionError::Io)` only when reading from `reader` fails.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Message>, SessionError> {
    let Some(body) = read_frame(reader)? else {
        return Ok(None);
    };
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|err| SessionError::Message(err.to_string()))
}

fn read_frame<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, SessionError> {
    let mut content_length: Option<Result<usize, String>> = None;
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }

        if let Some((name, rest)) = trimmed.split_once(':')
            && name.trim().eq_ignore_ascii_case("Content-Length")
        {
            let value = rest.trim();
            content_length = Some(
                value
                    .parse::<usize>()
                    .map_err(|err| format!("bad Content-Length `{value}`: {err}")),
            );
        }
    }

    // Without a usable length the body cannot be located; the next read starts at the
    // following header block.
    let len = match content_length {
        Some(Ok(len)) => len,
        Some(Err(reason)) => return Err(SessionError::Message(reason)),
        None => return Err(SessionError::Message("missing Content-Length header".to_string())),
    };

    if len > MAX_FRAME_LEN {
        io::copy(&mut reader.by_ref().take(len as u64), &mut io::sink())?;
        return Err(SessionError::Message(format!(
            "frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit"
        )));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}
