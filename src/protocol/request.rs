//! Request definitions
//!
//! Represents a fetch request before it is encoded.

use crate::error::{FetchError, Result};

/// Default upper bound on response payload bytes (1 MiB)
pub const DEFAULT_MAX_SIZE: i32 = 1024 * 1024;

/// Longest topic name the 2-byte length field can carry
pub const MAX_TOPIC_LEN: usize = i16::MAX as usize;

/// Request type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum RequestType {
    Produce = 0,
    Fetch = 1,
    MultiFetch = 2,
    MultiProduce = 3,
    Offsets = 4,
}

/// A fetch request for one topic partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Topic name (ASCII)
    pub topic: String,

    /// Partition within the topic
    pub partition: i32,

    /// Byte offset into the partition log to read from
    pub offset: i64,

    /// Upper bound on response payload bytes
    pub max_size: i32,
}

impl FetchRequest {
    /// Create a request using [`DEFAULT_MAX_SIZE`]
    pub fn new(topic: impl Into<String>, partition: i32, offset: i64) -> Self {
        Self {
            topic: topic.into(),
            partition,
            offset,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Override the max fetch size
    pub fn with_max_size(mut self, max_size: i32) -> Self {
        self.max_size = max_size;
        self
    }

    /// The request type tag written on the wire
    pub fn request_type(&self) -> RequestType {
        RequestType::Fetch
    }

    /// Byte count covered by the request size prefix.
    ///
    /// type (2) + topic_len (2) + topic + partition (4) + offset (8) + max_size (4)
    pub fn body_len(&self) -> usize {
        2 + 2 + self.topic.len() + 4 + 8 + 4
    }

    /// Check the request can be encoded
    pub fn validate(&self) -> Result<()> {
        if self.topic.len() > MAX_TOPIC_LEN {
            return Err(FetchError::Encoding(format!(
                "Topic too long: {} bytes (max {})",
                self.topic.len(),
                MAX_TOPIC_LEN
            )));
        }

        if !self.topic.is_ascii() {
            return Err(FetchError::Encoding(format!(
                "Topic must be ASCII: {:?}",
                self.topic
            )));
        }

        if self.max_size <= 0 {
            return Err(FetchError::Encoding(format!(
                "Max size must be positive, got {}",
                self.max_size
            )));
        }

        if self.offset < 0 {
            return Err(FetchError::Encoding(format!(
                "Offset must be non-negative, got {}",
                self.offset
            )));
        }

        Ok(())
    }
}
