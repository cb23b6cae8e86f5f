//! Consumer
//!
//! Runs one fetch exchange per call against a broker.

use bytes::Bytes;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::codec::response_len;
use crate::protocol::{
    decode_message_set, encode_request, response_limit, FetchRequest, FetchResponse,
    LENGTH_PREFIX_SIZE,
};

use super::{TcpTransport, Transport};

/// Fetches messages from a single broker
///
/// Holds only configuration. Each call opens its own connection and closes it
/// before returning, so a `Consumer` can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Consumer {
    config: Config,
}

impl Consumer {
    /// Create a consumer for the broker named in `config`
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch messages at `offset`, bounded by the configured max size
    pub fn consume(&self, topic: &str, partition: i32, offset: i64) -> Result<FetchResponse> {
        self.consume_with_max_size(topic, partition, offset, self.config.max_size)
    }

    /// Fetch messages at `offset`, bounded by `max_size`
    pub fn consume_with_max_size(
        &self,
        topic: &str,
        partition: i32,
        offset: i64,
        max_size: i32,
    ) -> Result<FetchResponse> {
        let request = FetchRequest::new(topic, partition, offset).with_max_size(max_size);
        self.fetch(&request)
    }

    /// Run one request/response exchange over a fresh connection
    pub fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        // Encode first so invalid input never opens a connection
        let bytes = encode_request(request)?;

        let mut transport = TcpTransport::connect(&self.config)?;
        let response = exchange(&mut transport, &bytes, response_limit(request.max_size))?;

        tracing::debug!(
            topic = %request.topic,
            partition = request.partition,
            offset = request.offset,
            messages = response.len(),
            next_offset = response.next_offset(request.offset),
            "Fetch complete"
        );

        Ok(response)
    }
}

/// Run one fetch exchange over an existing transport
pub fn fetch_with<T: Transport + ?Sized>(
    transport: &mut T,
    request: &FetchRequest,
) -> Result<FetchResponse> {
    let bytes = encode_request(request)?;
    exchange(transport, &bytes, response_limit(request.max_size))
}

/// Send an encoded request, then read and decode the response frame
///
/// A length prefix above `limit` is rejected before the payload is received.
fn exchange<T: Transport + ?Sized>(
    transport: &mut T,
    request: &[u8],
    limit: usize,
) -> Result<FetchResponse> {
    transport.send(request)?;

    let prefix = transport.receive(LENGTH_PREFIX_SIZE)?;
    let declared = response_len(&prefix, limit)?;

    if declared == 0 {
        return Ok(FetchResponse::empty());
    }

    let payload = transport.receive(declared)?;
    Ok(decode_message_set(Bytes::from(payload)))
}
