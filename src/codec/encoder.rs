//! Streaming encoder
//!
//! Consumes messages in order and writes one frame per message to a byte
//! sink. The first failure ends the call; frames written before it stay in
//! the sink.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::codec::decoder::DecoderLimits;
use crate::codec::frame;
use crate::codec::registry::Registry;
use crate::message::Message;
use crate::utils::error::EncodeError;

#[derive(Debug, Clone)]
pub struct Encoder {
    registry: Arc<Registry>,
    limits: DecoderLimits,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// An encoder over the standard registry with default limits.
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            limits: DecoderLimits::default(),
        }
    }

    /// Refuses connection ids and payload regions the matching decoder
    /// would reject.
    pub fn with_limits(mut self, limits: DecoderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Encodes every message of `messages` into `sink`.
    ///
    /// Returns once the stream is exhausted (for a channel: once every sender
    /// is dropped) and the sink has been flushed and shut down. The sink is
    /// owned for the duration of the call.
    pub async fn encode<S, W>(&self, mut messages: S, mut sink: W) -> Result<(), EncodeError>
    where
        S: Stream<Item = Message> + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::with_capacity(256);
        let mut record = 0u64;

        while let Some(message) = messages.next().await {
            buf.clear();
            frame::write_record(&self.registry, &self.limits, &message, &mut buf)?;
            sink.write_all(&buf)
                .await
                .map_err(|source| EncodeError::WriteFailure { record, source })?;
            record += 1;
        }

        sink.flush()
            .await
            .map_err(|source| EncodeError::WriteFailure { record, source })?;
        sink.shutdown()
            .await
            .map_err(|source| EncodeError::WriteFailure { record, source })?;

        debug!(records = record, "encoding finished");
        Ok(())
    }
}
