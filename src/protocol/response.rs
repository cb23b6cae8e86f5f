//! Response definitions
//!
//! Represents a decoded fetch response.

use super::WireMessage;

/// The messages decoded from one fetch response, in wire order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    /// Raw value of the 2-byte marker preceding the message set.
    /// Skipped during decoding and never interpreted.
    pub marker: i16,

    /// Complete messages in on-wire order
    pub messages: Vec<WireMessage>,
}

impl FetchResponse {
    /// Create an empty response (no data at the requested offset)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of complete messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Log bytes covered by the complete messages. A dropped partial tail
    /// does not count.
    pub fn bytes_consumed(&self) -> i64 {
        self.messages.iter().map(|m| m.wire_len() as i64).sum()
    }

    /// Offset to request next, given the offset this response was fetched at.
    /// Saturates at `i64::MAX`.
    pub fn next_offset(&self, start: i64) -> i64 {
        start.saturating_add(self.bytes_consumed())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WireMessage> {
        self.messages.iter()
    }
}

impl IntoIterator for FetchResponse {
    type Item = WireMessage;
    type IntoIter = std::vec::IntoIter<WireMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
