//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Fetch Request
//! ```text
//! ┌──────────┬──────────┬───────────┬─────────┬──────────┬────────────┬─────────────┐
//! │ Size (4) │ Type (2) │ TopicLen  │  Topic  │ Part (4) │ Offset (8) │ MaxSize (4) │
//! │          │          │    (2)    │         │          │            │             │
//! └──────────┴──────────┴───────────┴─────────┴──────────┴────────────┴─────────────┘
//! ```
//! `Size` covers every byte after itself.
//!
//! ### Fetch Response
//! ```text
//! ┌──────────┬────────────┬─────────────────────────────────────────────┐
//! │ Len (4)  │ Marker (2) │ { MsgSize (4) │ Body (MsgSize) }*            │
//! └──────────┴────────────┴─────────────────────────────────────────────┘
//! ```
//! The broker stops filling the message set at `max_size`, which can cut the
//! last record short. A partial trailing record is dropped, never an error.

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FetchError, Result};
use super::byte_order::{i16_to_wire, i32_to_wire, i64_to_wire, read_i16, read_i32};
use super::{FetchRequest, FetchResponse, WireMessage};

/// Size of the outer length prefix on both requests and responses
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of the marker preceding the message set
pub const MARKER_SIZE: usize = 2;

/// Size of the per-record size field
pub const MESSAGE_SIZE_FIELD: usize = 4;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a fetch request to bytes
///
/// Format: size (4) + type (2) + topic_len (2) + topic + partition (4) + offset (8) + max_size (4)
pub fn encode_request(request: &FetchRequest) -> Result<Bytes> {
    request.validate()?;

    let body_len = request.body_len();
    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + body_len);

    buf.put_slice(&i32_to_wire(body_len as i32));
    buf.put_slice(&i16_to_wire(request.request_type() as i16));
    buf.put_slice(&i16_to_wire(request.topic.len() as i16));
    buf.put_slice(request.topic.as_bytes());
    buf.put_slice(&i32_to_wire(request.partition));
    buf.put_slice(&i64_to_wire(request.offset));
    buf.put_slice(&i32_to_wire(request.max_size));

    tracing::trace!(
        topic = %request.topic,
        partition = request.partition,
        offset = request.offset,
        max_size = request.max_size,
        bytes = buf.len(),
        "Encoded fetch request"
    );

    Ok(buf.freeze())
}

/// Encode a fetch request from its parts
pub fn encode_fetch(topic: &str, partition: i32, offset: i64, max_size: i32) -> Result<Bytes> {
    encode_request(&FetchRequest::new(topic, partition, offset).with_max_size(max_size))
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a complete response frame, including its 4-byte length prefix
///
/// Bytes beyond the declared length are ignored.
pub fn decode_response(frame: &[u8]) -> Result<FetchResponse> {
    // The frame is already in memory, so its own length is the only bound
    let declared = response_len(frame, usize::MAX)?;

    if declared == 0 {
        tracing::debug!("Empty fetch response");
        return Ok(FetchResponse::empty());
    }

    let total_len = LENGTH_PREFIX_SIZE + declared;
    if frame.len() < total_len {
        return Err(FetchError::Framing(format!(
            "Incomplete response payload: expected {} bytes, got {}",
            total_len,
            frame.len()
        )));
    }

    Ok(decode_message_set(Bytes::copy_from_slice(
        &frame[LENGTH_PREFIX_SIZE..total_len],
    )))
}

/// Largest response payload a broker may send for a request with `max_size`:
/// the marker plus at most `max_size` bytes of message set.
pub fn response_limit(max_size: i32) -> usize {
    MARKER_SIZE + max_size.max(0) as usize
}

/// Parse the outer length prefix at the start of `prefix`
///
/// Rejects a missing prefix, a negative length, and a length above `limit`,
/// before anything is allocated for the payload.
pub(crate) fn response_len(prefix: &[u8], limit: usize) -> Result<usize> {
    let declared = read_i32(prefix, 0).ok_or_else(|| {
        FetchError::Framing(format!(
            "Incomplete length prefix: expected {} bytes, got {}",
            LENGTH_PREFIX_SIZE,
            prefix.len()
        ))
    })?;

    if declared < 0 {
        return Err(FetchError::Framing(format!(
            "Negative response length: {}",
            declared
        )));
    }

    let declared = declared as usize;
    if declared > limit {
        return Err(FetchError::Framing(format!(
            "Response too large: {} bytes (max {})",
            declared, limit
        )));
    }

    Ok(declared)
}

/// Decode a message set whose outer length prefix was already stripped
///
/// Skips the 2-byte marker, then reads records until the buffer holds no
/// further complete record. Never fails.
pub fn decode_message_set(payload: Bytes) -> FetchResponse {
    let Some(marker) = read_i16(&payload, 0) else {
        return FetchResponse::empty();
    };

    let mut messages = Vec::new();
    let mut pos = MARKER_SIZE;

    while let Some(size) = read_i32(&payload, pos) {
        let start = pos + MESSAGE_SIZE_FIELD;
        let remaining = payload.len() - start;

        if size < 0 || size as usize > remaining {
            tracing::trace!(
                declared = size,
                remaining,
                "Dropping partial trailing message"
            );
            break;
        }

        let end = start + size as usize;
        messages.push(WireMessage::parse(payload.slice(start..end)));
        pos = end;
    }

    tracing::debug!(
        count = messages.len(),
        bytes = payload.len(),
        "Decoded message set"
    );

    FetchResponse { marker, messages }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a fetch request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &FetchRequest) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete fetch response from a stream
///
/// `max_size` is the one sent with the request; a length prefix announcing
/// more than [`response_limit`] of it is a framing error. Blocks until the
/// length prefix and the payload it announces are received.
pub fn read_response<R: Read>(reader: &mut R, max_size: i32) -> Result<FetchResponse> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    reader.read_exact(&mut prefix).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            FetchError::Framing("Stream ended before the length prefix".to_string())
        }
        _ => FetchError::Io(e),
    })?;

    let declared = response_len(&prefix, response_limit(max_size))?;

    let mut payload = vec![0u8; declared];
    if declared > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(decode_message_set(Bytes::from(payload)))
}
