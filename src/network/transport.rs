//! Transport
//!
//! Byte transport used for one request/response exchange.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::{FetchError, Result};

/// Moves raw bytes to and from a broker
///
/// Implementations report every I/O failure as [`FetchError::Connection`].
pub trait Transport {
    /// Send all of `bytes`
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receive exactly `len` bytes
    fn receive(&mut self, len: usize) -> Result<Vec<u8>>;
}

/// Transport over any blocking byte stream
pub struct StreamTransport<S: Read + Write> {
    stream: S,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Recover the wrapped stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream
            .write_all(bytes)
            .and_then(|_| self.stream.flush())
            .map_err(|e| FetchError::connection("send failed", e))
    }

    fn receive(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.stream
            .read_exact(&mut buf)
            .map_err(|e| FetchError::connection("receive failed", e))?;
        Ok(buf)
    }
}

/// TCP connection to a broker
///
/// The socket closes when the transport is dropped.
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to the broker named in `config` and apply its timeouts
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.resolve_server()?;

        let stream = match config.write_timeout_ms {
            0 => TcpStream::connect(addr),
            ms => TcpStream::connect_timeout(&addr, Duration::from_millis(ms)),
        }
        .map_err(|e| FetchError::connection(&format!("connect to {} failed", addr), e))?;

        let mut transport = Self::from_stream(stream)?;
        transport.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::debug!("Connected to {}", transport.peer_addr);
        Ok(transport)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm; requests are small and latency bound
        stream
            .set_nodelay(true)
            .map_err(|e| FetchError::connection("set_nodelay failed", e))?;

        let read_stream = stream
            .try_clone()
            .map_err(|e| FetchError::connection("clone stream failed", e))?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves a timeout disabled)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))
                .map_err(|e| FetchError::connection("set_read_timeout failed", e))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))
                .map_err(|e| FetchError::connection("set_write_timeout failed", e))?;
        }

        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .and_then(|_| self.writer.flush())
            .map_err(|e| FetchError::connection(&format!("send to {} failed", self.peer_addr), e))
    }

    fn receive(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf).map_err(|e| {
            FetchError::connection(&format!("receive from {} failed", self.peer_addr), e)
        })?;
        Ok(buf)
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        tracing::trace!("Closing connection to {}", self.peer_addr);
    }
}
