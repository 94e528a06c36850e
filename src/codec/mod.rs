//! The `codec` module turns ordered sequences of audit messages into a
//! compact binary stream and back.
//!
//! - `registry`: tag -> payload routine table shared by both directions.
//! - `frame`: the record frame layout and payload field cursors.
//! - `encoder`: writes frames to any `AsyncWrite` sink.
//! - `decoder`: reads frames from any `AsyncRead` source on its own task.
//!
//! The encoder and decoder never talk to each other; they only share the
//! byte format, so one can write into a pipe while the other reads from it.

pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod registry;
mod shapes;

pub use decoder::{DecodeEvent, DecodeOutcome, Decoder, DecoderLimits, Decoding};
pub use encoder::Encoder;
pub use registry::{Registry, RegistryBuilder, RegistryEntry};
