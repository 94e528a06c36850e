use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag selecting the payload shape of a `Message`.
///
/// Tags are grouped by event family: `0..` connection lifecycle, `100..`
/// authentication, `200..` global requests, `300..` channel lifecycle and
/// `400..` channel requests. The numeric value is what goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum MessageType {
    Connect = 0,
    Disconnect = 1,

    AuthPassword = 100,
    AuthPasswordSuccessful = 101,
    AuthPasswordFailed = 102,
    AuthPasswordBackendError = 103,
    AuthPubKey = 104,
    AuthPubKeySuccessful = 105,
    AuthPubKeyFailed = 106,
    AuthPubKeyBackendError = 107,

    GlobalRequestUnknown = 200,

    NewChannel = 300,
    NewChannelSuccessful = 301,
    NewChannelFailed = 302,

    ChannelRequestUnknownType = 400,
    ChannelRequestDecodeFailed = 401,
    ChannelRequestSetEnv = 402,
    ChannelRequestExec = 403,
    ChannelRequestPty = 404,
    ChannelRequestShell = 405,
    ChannelRequestSignal = 406,
    ChannelRequestSubsystem = 407,
    ChannelRequestWindow = 408,
}

impl MessageType {
    /// Every known message type, in tag order.
    pub const ALL: [MessageType; 23] = [
        MessageType::Connect,
        MessageType::Disconnect,
        MessageType::AuthPassword,
        MessageType::AuthPasswordSuccessful,
        MessageType::AuthPasswordFailed,
        MessageType::AuthPasswordBackendError,
        MessageType::AuthPubKey,
        MessageType::AuthPubKeySuccessful,
        MessageType::AuthPubKeyFailed,
        MessageType::AuthPubKeyBackendError,
        MessageType::GlobalRequestUnknown,
        MessageType::NewChannel,
        MessageType::NewChannelSuccessful,
        MessageType::NewChannelFailed,
        MessageType::ChannelRequestUnknownType,
        MessageType::ChannelRequestDecodeFailed,
        MessageType::ChannelRequestSetEnv,
        MessageType::ChannelRequestExec,
        MessageType::ChannelRequestPty,
        MessageType::ChannelRequestShell,
        MessageType::ChannelRequestSignal,
        MessageType::ChannelRequestSubsystem,
        MessageType::ChannelRequestWindow,
    ];

    /// The 2-byte wire tag.
    pub fn tag(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageType::Connect => "connect",
            MessageType::Disconnect => "disconnect",
            MessageType::AuthPassword => "auth_password",
            MessageType::AuthPasswordSuccessful => "auth_password_successful",
            MessageType::AuthPasswordFailed => "auth_password_failed",
            MessageType::AuthPasswordBackendError => "auth_password_backend_error",
            MessageType::AuthPubKey => "auth_pub_key",
            MessageType::AuthPubKeySuccessful => "auth_pub_key_successful",
            MessageType::AuthPubKeyFailed => "auth_pub_key_failed",
            MessageType::AuthPubKeyBackendError => "auth_pub_key_backend_error",
            MessageType::GlobalRequestUnknown => "global_request_unknown",
            MessageType::NewChannel => "new_channel",
            MessageType::NewChannelSuccessful => "new_channel_successful",
            MessageType::NewChannelFailed => "new_channel_failed",
            MessageType::ChannelRequestUnknownType => "channel_request_unknown_type",
            MessageType::ChannelRequestDecodeFailed => "channel_request_decode_failed",
            MessageType::ChannelRequestSetEnv => "channel_request_set_env",
            MessageType::ChannelRequestExec => "channel_request_exec",
            MessageType::ChannelRequestPty => "channel_request_pty",
            MessageType::ChannelRequestShell => "channel_request_shell",
            MessageType::ChannelRequestSignal => "channel_request_signal",
            MessageType::ChannelRequestSubsystem => "channel_request_subsystem",
            MessageType::ChannelRequestWindow => "channel_request_window",
        }
    }
}

impl TryFrom<u16> for MessageType {
    type Error = u16;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        MessageType::ALL
            .iter()
            .copied()
            .find(|message_type| message_type.tag() == tag)
            .ok_or(tag)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.tag())
    }
}
