//! Record frame layout
//!
//! One frame per message, all integers big-endian:
//!
//! ```text
//! [u32 id_len][connection_id][i64 timestamp][u16 type][i64 channel_id]
//! [u8 presence] ( [u32 payload_len][payload] if presence == 1 )
//! ```
//!
//! Inside a payload region strings and byte fields are `u32` length-prefixed
//! and small integers are fixed-width `u32`. The region must be consumed
//! exactly by the registered decode routine.

use crate::codec::decoder::DecoderLimits;
use crate::codec::registry::{Registry, RegistryEntry};
use crate::message::{Message, MessageType, Payload, PayloadShape};
use crate::utils::error::{DecodeError, EncodeError, PayloadFieldError};

pub const PAYLOAD_ABSENT: u8 = 0;
pub const PAYLOAD_PRESENT: u8 = 1;

/// Serializes `message` as one frame appended to `out`.
///
/// The connection id and payload region are held to `limits`, so a frame
/// written here is never refused by a decoder using the same limits.
///
/// On error `out` may hold a partial frame; callers discard the buffer.
pub fn write_record(
    registry: &Registry,
    limits: &DecoderLimits,
    message: &Message,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    let message_type = message.message_type;
    let entry = registry
        .lookup(message_type.tag())
        .ok_or(EncodeError::UnknownMessageType(message_type))?;

    let codec = match (&message.payload, entry.codec) {
        (None, _) => None,
        (Some(payload), Some(codec)) if payload.shape() == codec.shape => Some((payload, codec)),
        (Some(payload), _) => {
            return Err(EncodeError::PayloadShapeMismatch {
                message_type,
                expected: entry.shape(),
                found: Some(payload.shape()),
            });
        }
    };

    put_len(
        out,
        "connection_id",
        message.connection_id.len(),
        limits.max_connection_id_len,
    )?;
    out.extend_from_slice(&message.connection_id);
    out.extend_from_slice(&message.timestamp.to_be_bytes());
    out.extend_from_slice(&message_type.tag().to_be_bytes());
    out.extend_from_slice(&message.channel_id.to_be_bytes());

    match codec {
        None => out.push(PAYLOAD_ABSENT),
        Some((payload, codec)) => {
            out.push(PAYLOAD_PRESENT);
            let len_at = out.len();
            out.extend_from_slice(&[0u8; 4]);
            let mut writer = PayloadWriter {
                message_type,
                out: &mut *out,
            };
            (codec.encode)(payload, &mut writer)?;

            let region_len = out.len() - len_at - 4;
            let region_len = checked_len("payload", region_len, limits.max_payload_len)?;
            out[len_at..len_at + 4].copy_from_slice(&region_len.to_be_bytes());
        }
    }

    Ok(())
}

/// Parses a payload region with the routine registered in `entry`.
pub fn read_payload(
    entry: &RegistryEntry,
    region: &[u8],
    record: u64,
) -> Result<Payload, DecodeError> {
    let malformed = |source| DecodeError::MalformedPayload {
        record,
        message_type: entry.message_type,
        source,
    };

    let codec = entry.codec.ok_or(malformed(PayloadFieldError::Unexpected))?;
    let mut reader = PayloadReader::new(region);
    let payload = (codec.decode)(&mut reader).map_err(malformed)?;
    reader.finish().map_err(malformed)?;
    Ok(payload)
}

fn checked_len(field: &'static str, len: usize, max: u32) -> Result<u32, EncodeError> {
    match u32::try_from(len) {
        Ok(prefix) if prefix <= max => Ok(prefix),
        _ => Err(EncodeError::FieldTooLarge { field, len, max }),
    }
}

fn put_len(
    out: &mut Vec<u8>,
    field: &'static str,
    len: usize,
    max: u32,
) -> Result<(), EncodeError> {
    let prefix = checked_len(field, len, max)?;
    out.extend_from_slice(&prefix.to_be_bytes());
    Ok(())
}

/// Appends payload fields to a frame under construction.
pub struct PayloadWriter<'a> {
    message_type: MessageType,
    out: &'a mut Vec<u8>,
}

impl PayloadWriter<'_> {
    pub fn put_bytes(&mut self, field: &'static str, value: &[u8]) -> Result<(), EncodeError> {
        put_len(self.out, field, value.len(), u32::MAX)?;
        self.out.extend_from_slice(value);
        Ok(())
    }

    pub fn put_string(&mut self, field: &'static str, value: &str) -> Result<(), EncodeError> {
        self.put_bytes(field, value.as_bytes())
    }

    pub fn put_u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    /// Error for a payload handed to the routine of another shape.
    pub fn mismatch(&self, expected: PayloadShape, found: &Payload) -> EncodeError {
        EncodeError::PayloadShapeMismatch {
            message_type: self.message_type,
            expected: Some(expected),
            found: Some(found.shape()),
        }
    }
}

/// Cursor over a payload region.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    buf: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take(&mut self, field: &'static str, needed: usize) -> Result<&'a [u8], PayloadFieldError> {
        if needed > self.buf.len() {
            return Err(PayloadFieldError::Short {
                field,
                needed,
                available: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(needed);
        self.buf = rest;
        Ok(head)
    }

    pub fn take_u32(&mut self, field: &'static str) -> Result<u32, PayloadFieldError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(field, 4)?);
        Ok(u32::from_be_bytes(raw))
    }

    pub fn take_bytes(&mut self, field: &'static str) -> Result<Vec<u8>, PayloadFieldError> {
        let len = self.take_u32(field)? as usize;
        Ok(self.take(field, len)?.to_vec())
    }

    pub fn take_string(&mut self, field: &'static str) -> Result<String, PayloadFieldError> {
        String::from_utf8(self.take_bytes(field)?)
            .map_err(|_| PayloadFieldError::InvalidUtf8 { field })
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Fails if any bytes were left unread.
    pub fn finish(self) -> Result<(), PayloadFieldError> {
        match self.buf.len() {
            0 => Ok(()),
            trailing => Err(PayloadFieldError::TrailingBytes(trailing)),
        }
    }
}
