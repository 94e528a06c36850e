//! The `error` module defines the error types used within the `auditlog` crate.
//!
//! Encoding and decoding failures are terminal for the stream they occur in:
//! an `EncodeError` ends the `encode` call, a `DecodeError` is the last event
//! a decoder publishes. Decode errors carry the zero-based index of the record
//! being read so a consumer can tell how far a damaged log is usable.

use std::io;

use thiserror::Error;

use crate::message::{MessageType, PayloadShape};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("no codec registered for message type {0}")]
    UnknownMessageType(MessageType),

    #[error("message type {message_type} expects payload {expected:?}, got {found:?}")]
    PayloadShapeMismatch {
        message_type: MessageType,
        expected: Option<PayloadShape>,
        found: Option<PayloadShape>,
    },

    #[error("field {field} is {len} bytes long, limit is {max}")]
    FieldTooLarge {
        field: &'static str,
        len: usize,
        max: u32,
    },

    #[error("failed to write record {record}: {source}")]
    WriteFailure {
        record: u64,
        #[source]
        source: io::Error,
    },
}

/// Reasons a payload region of a known message type could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadFieldError {
    #[error("field {field} needs {needed} bytes but only {available} remain")]
    Short {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),

    #[error("message type carries no payload but one is present")]
    Unexpected,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record {record} is truncated")]
    TruncatedRecord { record: u64 },

    #[error("record {record} has unknown message type {tag}")]
    UnknownMessageType { record: u64, tag: u16 },

    #[error("record {record} has a malformed {message_type} payload: {source}")]
    MalformedPayload {
        record: u64,
        message_type: MessageType,
        #[source]
        source: PayloadFieldError,
    },

    #[error("record {record} has invalid payload presence flag {flag}")]
    InvalidPresenceFlag { record: u64, flag: u8 },

    #[error("record {record} declares a {len} byte {field}, limit is {max}")]
    FieldTooLarge {
        record: u64,
        field: &'static str,
        len: u32,
        max: u32,
    },

    #[error("failed to read record {record}: {source}")]
    ReadFailure {
        record: u64,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    /// Index of the record the decoder was reading when it failed.
    pub fn record(&self) -> u64 {
        match self {
            DecodeError::TruncatedRecord { record }
            | DecodeError::UnknownMessageType { record, .. }
            | DecodeError::MalformedPayload { record, .. }
            | DecodeError::InvalidPresenceFlag { record, .. }
            | DecodeError::FieldTooLarge { record, .. }
            | DecodeError::ReadFailure { record, .. } => *record,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("metadata index error: {0}")]
    Index(#[from] sled::Error),

    #[error("metadata encoding error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("invalid audit log name: {0:?}")]
    InvalidName(String),

    #[error("audit log not found: {0}")]
    NotFound(String),

    #[error("audit log already exists: {0}")]
    AlreadyExists(String),
}
