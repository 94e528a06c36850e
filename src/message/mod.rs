//! The `message` module defines the audit event record.
//!
//! A `Message` describes one event of an audited session: a connection being
//! opened, an authentication attempt, a channel request and so on. The
//! `message_type` tag selects which `Payload` shape the record carries.
//!
//! The codec never interprets the fields: timestamps, addresses and usernames
//! are opaque values that must survive an encode/decode cycle unchanged.

pub mod record;
pub mod message_type;
pub mod payload;

pub use record::Message;
pub use message_type::MessageType;
pub use payload::*;

#[cfg(test)]
mod tests;
