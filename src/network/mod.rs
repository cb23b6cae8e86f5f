//! Network Module
//!
//! Broker connections and the fetch exchange.
//!
//! ## Architecture
//! - One blocking connection per fetch call
//! - Request encoded before connecting
//! - Response framed by its 4-byte length prefix, then decoded

mod transport;
mod consumer;

pub use transport::{StreamTransport, TcpTransport, Transport};
pub use consumer::{fetch_with, Consumer};
