//! # kafka-fetch
//!
//! A client-side codec for the Kafka 0.7 fetch protocol with:
//! - Big-endian request encoding with an explicit max fetch size
//! - Message set decoding that drops a partial trailing record
//! - Lazy message header interpretation and CRC32 verification
//! - A blocking TCP consumer running one exchange per call
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Consumer (one call = one fetch)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encoder   │          │  Transport  │
//!   │  (request)  │          │    (TCP)    │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Decoder   │
//!                           │(message set)│
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FetchError, Result};
pub use config::Config;
pub use network::Consumer;
pub use protocol::{FetchRequest, FetchResponse, WireMessage};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kafka-fetch
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
