//! Protocol Module
//!
//! Defines the wire protocol for fetching messages from a broker.
//!
//! ## Protocol Format (Fetch, big-endian)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬──────────────┬───────────┬────────────┬─────────────┐
//! │ Size (4) │ Type (2) │ Topic (2+N)  │ Part (4)  │ Offset (8) │ MaxSize (4) │
//! └──────────┴──────────┴──────────────┴───────────┴────────────┴─────────────┘
//! ```
//!
//! ### Request Types
//! - 0: PRODUCE
//! - 1: FETCH (the only type this crate encodes)
//! - 2: MULTI_FETCH
//! - 3: MULTI_PRODUCE
//! - 4: OFFSETS
//!
//! ### Response Format
//! ```text
//! ┌──────────┬────────────┬─────────────────────────────┐
//! │ Len (4)  │ Marker (2) │         Message Set         │
//! └──────────┴────────────┴─────────────────────────────┘
//! ```

pub mod byte_order;
mod request;
mod message;
mod response;
pub(crate) mod codec;

pub use request::{FetchRequest, RequestType, DEFAULT_MAX_SIZE, MAX_TOPIC_LEN};
pub use message::{
    MessageHeader, WireMessage, HEADER_SIZE_V0, HEADER_SIZE_V1, MAGIC_V0, MAGIC_V1,
};
pub use response::FetchResponse;
pub use codec::{
    decode_message_set, decode_response, encode_fetch, encode_request, read_response,
    response_limit, write_request, LENGTH_PREFIX_SIZE, MARKER_SIZE, MESSAGE_SIZE_FIELD,
};
