//! # auditlog
//!
//! `auditlog` persists and replays audit events of interactive remote sessions
//! (connection lifecycle, authentication attempts, channel requests) as a
//! compact binary stream.
//!
//! ## Core Modules
//!
//! - `message`: The audit event record and its payload shapes.
//! - `codec`: The type registry, the streaming encoder and the concurrent decoder.
//! - `storage`: Capability traits for byte sinks/sources and a file backed store.
//! - `config`: Handles loading and managing configuration.
//! - `utils`: Shared error types and logging setup.

pub mod codec;
pub mod config;
pub mod message;
pub mod storage;
pub mod utils;

pub use codec::{DecodeEvent, DecodeOutcome, Decoder, DecoderLimits, Decoding, Encoder, Registry};
pub use message::{Message, MessageType, Payload, PayloadShape};
pub use utils::error::{DecodeError, EncodeError, StorageError};
