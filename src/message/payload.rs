//! Payload shapes carried by audit messages.
//!
//! Several message types share a shape: the three password authentication
//! outcomes all carry a `PayloadAuthPassword`, for example. `PayloadShape`
//! names the variant without its data and is what the codec registry keys
//! its conversion routines on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadConnect {
    pub remote_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadAuthPassword {
    pub username: String,
    pub password: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadAuthPasswordBackendError {
    pub username: String,
    pub password: Vec<u8>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadAuthPubKey {
    pub username: String,
    pub key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadAuthPubKeyBackendError {
    pub username: String,
    pub key: Vec<u8>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadGlobalRequestUnknown {
    pub request_type: String,
}

/// Shared by `NewChannel` and `NewChannelSuccessful`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadNewChannel {
    pub channel_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadNewChannelFailed {
    pub channel_type: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestUnknownType {
    pub request_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestDecodeFailed {
    pub request_type: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestSetEnv {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestExec {
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestPty {
    pub columns: u32,
    pub rows: u32,
}

/// A shell request has no fields, but its payload is still present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestShell {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestSignal {
    pub signal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestSubsystem {
    pub subsystem: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadChannelRequestWindow {
    pub columns: u32,
    pub rows: u32,
}

/// The payload of a message, one variant per shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Payload {
    Connect(PayloadConnect),
    AuthPassword(PayloadAuthPassword),
    AuthPasswordBackendError(PayloadAuthPasswordBackendError),
    AuthPubKey(PayloadAuthPubKey),
    AuthPubKeyBackendError(PayloadAuthPubKeyBackendError),
    GlobalRequestUnknown(PayloadGlobalRequestUnknown),
    NewChannel(PayloadNewChannel),
    NewChannelFailed(PayloadNewChannelFailed),
    ChannelRequestUnknownType(PayloadChannelRequestUnknownType),
    ChannelRequestDecodeFailed(PayloadChannelRequestDecodeFailed),
    ChannelRequestSetEnv(PayloadChannelRequestSetEnv),
    ChannelRequestExec(PayloadChannelRequestExec),
    ChannelRequestPty(PayloadChannelRequestPty),
    ChannelRequestShell(PayloadChannelRequestShell),
    ChannelRequestSignal(PayloadChannelRequestSignal),
    ChannelRequestSubsystem(PayloadChannelRequestSubsystem),
    ChannelRequestWindow(PayloadChannelRequestWindow),
}

/// The variant of a `Payload`, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    Connect,
    AuthPassword,
    AuthPasswordBackendError,
    AuthPubKey,
    AuthPubKeyBackendError,
    GlobalRequestUnknown,
    NewChannel,
    NewChannelFailed,
    ChannelRequestUnknownType,
    ChannelRequestDecodeFailed,
    ChannelRequestSetEnv,
    ChannelRequestExec,
    ChannelRequestPty,
    ChannelRequestShell,
    ChannelRequestSignal,
    ChannelRequestSubsystem,
    ChannelRequestWindow,
}

impl Payload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Payload::Connect(_) => PayloadShape::Connect,
            Payload::AuthPassword(_) => PayloadShape::AuthPassword,
            Payload::AuthPasswordBackendError(_) => PayloadShape::AuthPasswordBackendError,
            Payload::AuthPubKey(_) => PayloadShape::AuthPubKey,
            Payload::AuthPubKeyBackendError(_) => PayloadShape::AuthPubKeyBackendError,
            Payload::GlobalRequestUnknown(_) => PayloadShape::GlobalRequestUnknown,
            Payload::NewChannel(_) => PayloadShape::NewChannel,
            Payload::NewChannelFailed(_) => PayloadShape::NewChannelFailed,
            Payload::ChannelRequestUnknownType(_) => PayloadShape::ChannelRequestUnknownType,
            Payload::ChannelRequestDecodeFailed(_) => PayloadShape::ChannelRequestDecodeFailed,
            Payload::ChannelRequestSetEnv(_) => PayloadShape::ChannelRequestSetEnv,
            Payload::ChannelRequestExec(_) => PayloadShape::ChannelRequestExec,
            Payload::ChannelRequestPty(_) => PayloadShape::ChannelRequestPty,
            Payload::ChannelRequestShell(_) => PayloadShape::ChannelRequestShell,
            Payload::ChannelRequestSignal(_) => PayloadShape::ChannelRequestSignal,
            Payload::ChannelRequestSubsystem(_) => PayloadShape::ChannelRequestSubsystem,
            Payload::ChannelRequestWindow(_) => PayloadShape::ChannelRequestWindow,
        }
    }
}
