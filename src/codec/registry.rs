//! Type registry
//!
//! Maps the wire tag of every message type to the pair of routines that turn
//! its payload into bytes and back. The encoder and decoder only ever go
//! through this table, so adding an event kind means adding one entry here
//! and one shape in `message::payload`.
//!
//! The standard registry is built once, on first use, and is immutable
//! afterwards; it is shared between any number of encoders and decoders.
//! Restricted registries can be assembled with `RegistryBuilder`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::codec::frame::{PayloadReader, PayloadWriter};
use crate::codec::shapes;
use crate::message::{MessageType, Payload, PayloadShape};
use crate::utils::error::{EncodeError, PayloadFieldError};

pub type EncodeFn = fn(&Payload, &mut PayloadWriter<'_>) -> Result<(), EncodeError>;
pub type DecodeFn = fn(&mut PayloadReader<'_>) -> Result<Payload, PayloadFieldError>;

/// Encode/decode routines for one payload shape.
#[derive(Clone, Copy)]
pub struct PayloadCodec {
    pub shape: PayloadShape,
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

impl fmt::Debug for PayloadCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadCodec")
            .field("shape", &self.shape)
            .finish()
    }
}

/// Registration of one message type. `codec` is `None` for types that never
/// carry a payload, such as `Disconnect`.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub message_type: MessageType,
    pub codec: Option<PayloadCodec>,
}

impl RegistryEntry {
    pub const fn with_payload(
        message_type: MessageType,
        shape: PayloadShape,
        encode: EncodeFn,
        decode: DecodeFn,
    ) -> Self {
        Self {
            message_type,
            codec: Some(PayloadCodec {
                shape,
                encode,
                decode,
            }),
        }
    }

    pub const fn without_payload(message_type: MessageType) -> Self {
        Self {
            message_type,
            codec: None,
        }
    }

    /// Shape a present payload must have for this type.
    pub fn shape(&self) -> Option<PayloadShape> {
        self.codec.map(|codec| codec.shape)
    }
}

const STANDARD_ENTRIES: [RegistryEntry; 23] = [
    RegistryEntry::with_payload(
        MessageType::Connect,
        PayloadShape::Connect,
        shapes::encode_connect,
        shapes::decode_connect,
    ),
    RegistryEntry::without_payload(MessageType::Disconnect),
    RegistryEntry::with_payload(
        MessageType::AuthPassword,
        PayloadShape::AuthPassword,
        shapes::encode_auth_password,
        shapes::decode_auth_password,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPasswordSuccessful,
        PayloadShape::AuthPassword,
        shapes::encode_auth_password,
        shapes::decode_auth_password,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPasswordFailed,
        PayloadShape::AuthPassword,
        shapes::encode_auth_password,
        shapes::decode_auth_password,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPasswordBackendError,
        PayloadShape::AuthPasswordBackendError,
        shapes::encode_auth_password_backend_error,
        shapes::decode_auth_password_backend_error,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPubKey,
        PayloadShape::AuthPubKey,
        shapes::encode_auth_pub_key,
        shapes::decode_auth_pub_key,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPubKeySuccessful,
        PayloadShape::AuthPubKey,
        shapes::encode_auth_pub_key,
        shapes::decode_auth_pub_key,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPubKeyFailed,
        PayloadShape::AuthPubKey,
        shapes::encode_auth_pub_key,
        shapes::decode_auth_pub_key,
    ),
    RegistryEntry::with_payload(
        MessageType::AuthPubKeyBackendError,
        PayloadShape::AuthPubKeyBackendError,
        shapes::encode_auth_pub_key_backend_error,
        shapes::decode_auth_pub_key_backend_error,
    ),
    RegistryEntry::with_payload(
        MessageType::GlobalRequestUnknown,
        PayloadShape::GlobalRequestUnknown,
        shapes::encode_global_request_unknown,
        shapes::decode_global_request_unknown,
    ),
    RegistryEntry::with_payload(
        MessageType::NewChannel,
        PayloadShape::NewChannel,
        shapes::encode_new_channel,
        shapes::decode_new_channel,
    ),
    RegistryEntry::with_payload(
        MessageType::NewChannelSuccessful,
        PayloadShape::NewChannel,
        shapes::encode_new_channel,
        shapes::decode_new_channel,
    ),
    RegistryEntry::with_payload(
        MessageType::NewChannelFailed,
        PayloadShape::NewChannelFailed,
        shapes::encode_new_channel_failed,
        shapes::decode_new_channel_failed,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestUnknownType,
        PayloadShape::ChannelRequestUnknownType,
        shapes::encode_channel_request_unknown_type,
        shapes::decode_channel_request_unknown_type,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestDecodeFailed,
        PayloadShape::ChannelRequestDecodeFailed,
        shapes::encode_channel_request_decode_failed,
        shapes::decode_channel_request_decode_failed,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestSetEnv,
        PayloadShape::ChannelRequestSetEnv,
        shapes::encode_channel_request_set_env,
        shapes::decode_channel_request_set_env,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestExec,
        PayloadShape::ChannelRequestExec,
        shapes::encode_channel_request_exec,
        shapes::decode_channel_request_exec,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestPty,
        PayloadShape::ChannelRequestPty,
        shapes::encode_channel_request_pty,
        shapes::decode_channel_request_pty,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestShell,
        PayloadShape::ChannelRequestShell,
        shapes::encode_channel_request_shell,
        shapes::decode_channel_request_shell,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestSignal,
        PayloadShape::ChannelRequestSignal,
        shapes::encode_channel_request_signal,
        shapes::decode_channel_request_signal,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestSubsystem,
        PayloadShape::ChannelRequestSubsystem,
        shapes::encode_channel_request_subsystem,
        shapes::decode_channel_request_subsystem,
    ),
    RegistryEntry::with_payload(
        MessageType::ChannelRequestWindow,
        PayloadShape::ChannelRequestWindow,
        shapes::encode_channel_request_window,
        shapes::decode_channel_request_window,
    ),
];

static STANDARD: LazyLock<Arc<Registry>> =
    LazyLock::new(|| Arc::new(RegistryBuilder::standard().build()));

/// Immutable tag -> payload codec table.
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<u16, RegistryEntry>,
}

impl Registry {
    /// The process-wide registry with every known message type.
    pub fn standard() -> Arc<Registry> {
        Arc::clone(&STANDARD)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, tag: u16) -> Option<&RegistryEntry> {
        self.entries.get(&tag)
    }

    pub fn contains(&self, message_type: MessageType) -> bool {
        self.entries.contains_key(&message_type.tag())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assembles a `Registry`. Only used during setup; the result is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<u16, RegistryEntry>,
}

impl RegistryBuilder {
    /// A builder pre-populated with every standard entry.
    pub fn standard() -> Self {
        STANDARD_ENTRIES
            .iter()
            .fold(Self::default(), |builder, entry| builder.register(*entry))
    }

    /// Adds or replaces the entry for `entry.message_type`.
    pub fn register(mut self, entry: RegistryEntry) -> Self {
        self.entries.insert(entry.message_type.tag(), entry);
        self
    }

    pub fn without(mut self, message_type: MessageType) -> Self {
        self.entries.remove(&message_type.tag());
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}
