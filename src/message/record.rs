use serde::{Deserialize, Serialize};

use crate::message::{MessageType, Payload, PayloadShape};

/// Represents one audit event.
///
/// Equality is field-wise: connection id bytes, timestamp, type and channel id
/// must match exactly, and the payloads must either both be absent or both be
/// present with the same shape and equal fields. An absent payload never
/// equals a present one, even a field-less `ChannelRequestShell` payload.
///
/// # Fields
///
/// - `connection_id` - Opaque bytes identifying the audited connection.
/// - `timestamp` - Opaque producer timestamp; the unit is not interpreted.
/// - `message_type` - Tag selecting the payload shape.
/// - `channel_id` - Sub-channel of the connection, or `Message::NO_CHANNEL`.
/// - `payload` - `None` when the event carries no payload at all.
///
/// # Example
///
/// ```rust
/// use auditlog::message::{Message, MessageType, Payload, PayloadConnect};
///
/// let msg = Message {
///     connection_id: b"1234".to_vec(),
///     timestamp: 1234,
///     message_type: MessageType::Connect,
///     channel_id: Message::NO_CHANNEL,
///     payload: Some(Payload::Connect(PayloadConnect {
///         remote_addr: "127.0.0.1".to_string(),
///     })),
/// };
/// assert!(!msg.has_channel());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub connection_id: Vec<u8>,
    pub timestamp: i64,
    pub message_type: MessageType,
    pub channel_id: i64,
    pub payload: Option<Payload>,
}

impl Message {
    /// Channel id sentinel for events not tied to any sub-channel.
    pub const NO_CHANNEL: i64 = -1;

    pub fn has_channel(&self) -> bool {
        self.channel_id != Self::NO_CHANNEL
    }

    pub fn payload_shape(&self) -> Option<PayloadShape> {
        self.payload.as_ref().map(Payload::shape)
    }
}
