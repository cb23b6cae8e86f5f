//! Message definitions
//!
//! A single record from a fetch response message set.
//!
//! ## Body Layout
//! ```text
//! magic 0: ┌───────────┬─────────┬─────────────────────┐
//!          │ Magic (1) │ CRC (4) │       Payload       │
//!          └───────────┴─────────┴─────────────────────┘
//! magic 1: ┌───────────┬───────────┬─────────┬─────────┐
//!          │ Magic (1) │ Attrs (1) │ CRC (4) │ Payload │
//!          └───────────┴───────────┴─────────┴─────────┘
//! ```
//!
//! Framing never looks inside the body. The header is interpreted on demand,
//! so a record whose body does not match either layout is still returned
//! intact as opaque bytes.

use bytes::Bytes;

use super::byte_order::read_u32;

/// Magic value for the original header (no attributes byte)
pub const MAGIC_V0: u8 = 0;

/// Magic value for the header carrying an attributes byte
pub const MAGIC_V1: u8 = 1;

/// Header length for magic 0: magic (1) + crc (4)
pub const HEADER_SIZE_V0: usize = 1 + 4;

/// Header length for magic 1: magic (1) + attributes (1) + crc (4)
pub const HEADER_SIZE_V1: usize = 1 + 1 + 4;

/// Interpreted message header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Format version
    pub magic: u8,

    /// Attributes byte (magic 1 only)
    pub attributes: Option<u8>,

    /// CRC32 of the payload as sent by the broker
    pub checksum: u32,
}

impl MessageHeader {
    /// Header length in bytes for the given magic
    pub fn len_for(magic: u8) -> Option<usize> {
        match magic {
            MAGIC_V0 => Some(HEADER_SIZE_V0),
            MAGIC_V1 => Some(HEADER_SIZE_V1),
            _ => None,
        }
    }

    /// Header length in bytes
    pub fn size(&self) -> usize {
        Self::len_for(self.magic).unwrap_or(HEADER_SIZE_V0)
    }
}

/// One complete record of a message set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    /// Byte length of the body, as declared by the record's size field
    pub length: u32,

    /// Header metadata followed by the payload
    pub body: Bytes,
}

impl WireMessage {
    /// Build a message from exactly the body bytes framed by its size field
    pub fn parse(body: Bytes) -> Self {
        Self {
            length: body.len() as u32,
            body,
        }
    }

    /// Total bytes the record occupies on the wire (size field + body)
    pub fn wire_len(&self) -> usize {
        4 + self.body.len()
    }

    /// Interpret the leading metadata bytes, if they form a known header
    pub fn header(&self) -> Option<MessageHeader> {
        let magic = *self.body.first()?;
        let header_len = MessageHeader::len_for(magic)?;
        if self.body.len() < header_len {
            return None;
        }

        let attributes = match magic {
            MAGIC_V1 => Some(self.body[1]),
            _ => None,
        };
        let checksum = read_u32(&self.body, header_len - 4)?;

        Some(MessageHeader {
            magic,
            attributes,
            checksum,
        })
    }

    /// Payload following the header, if the header is recognised
    pub fn payload(&self) -> Option<Bytes> {
        let header = self.header()?;
        Some(self.body.slice(header.size()..))
    }

    /// Whether the payload CRC32 matches the header checksum
    ///
    /// Returns false when the header cannot be interpreted.
    pub fn is_valid(&self) -> bool {
        match (self.header(), self.payload()) {
            (Some(header), Some(payload)) => crc32fast::hash(&payload) == header.checksum,
            _ => false,
        }
    }
}
