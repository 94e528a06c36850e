//! Concurrent decoder
//!
//! `Decoder::decode` spawns one task per source and returns a `Decoding`
//! handle right away. The task reads frames in order and publishes each as a
//! `DecodeEvent` on a one-slot channel, so it never runs more than one record
//! ahead of the consumer.
//!
//! Event sequence per source:
//! - zero or more `Message`s, in encode order
//! - at most one `Error`, after which nothing more is read
//! - exactly one `Finished`
//!
//! A source ending exactly at a frame boundary is a clean finish. Ending
//! anywhere else is `TruncatedRecord`. There is no resynchronisation after
//! an error.
//!
//! Usage notes:
//! - `decode` must be called from within a tokio runtime.
//! - Dropping the `Decoding` handle stops the task at its next publish.

use std::io;
use std::sync::Arc;

use futures_util::Stream;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::codec::frame::{self, PAYLOAD_ABSENT, PAYLOAD_PRESENT};
use crate::codec::registry::Registry;
use crate::message::Message;
use crate::utils::error::DecodeError;

/// Upper bounds on frame length prefixes.
///
/// The decoder checks them before allocating; the encoder refuses to write
/// anything over them, so both sides agree on what a valid frame is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderLimits {
    pub max_connection_id_len: u32,
    pub max_payload_len: u32,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_connection_id_len: 64 * 1024,
            max_payload_len: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug)]
pub enum DecodeEvent {
    Message(Message),
    Error(DecodeError),
    Finished,
}

/// Everything a finished decode produced.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    pub messages: Vec<Message>,
    pub error: Option<DecodeError>,
}

#[derive(Debug, Clone)]
pub struct Decoder {
    registry: Arc<Registry>,
    limits: DecoderLimits,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// A decoder over the standard registry with default limits.
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            limits: DecoderLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DecoderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Starts decoding `source` on a new task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn decode<R>(&self, source: R) -> Decoding
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let reader = RecordReader::new(source, Arc::clone(&self.registry), self.limits);
        tokio::spawn(run(reader, tx));
        Decoding {
            events: rx,
            finished: false,
        }
    }
}

async fn run<R>(mut reader: RecordReader<R>, events: mpsc::Sender<DecodeEvent>)
where
    R: AsyncRead + Unpin,
{
    loop {
        let event = match reader.next_record().await {
            Ok(Some(message)) => DecodeEvent::Message(message),
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "decoding stopped");
                DecodeEvent::Error(error)
            }
        };

        let terminal = matches!(event, DecodeEvent::Error(_));
        if events.send(event).await.is_err() {
            debug!("decode consumer dropped, stopping");
            return;
        }
        if terminal {
            break;
        }
    }

    debug!(records = reader.record, "decoding finished");
    let _ = events.send(DecodeEvent::Finished).await;
}

/// Consumer side of a running decode.
#[derive(Debug)]
pub struct Decoding {
    events: mpsc::Receiver<DecodeEvent>,
    finished: bool,
}

impl Decoding {
    /// Waits for the next event. Returns `None` once `Finished` has been
    /// delivered, or if the decode task went away without finishing.
    pub async fn next_event(&mut self) -> Option<DecodeEvent> {
        if self.finished {
            return None;
        }
        let event = self.events.recv().await;
        if matches!(event, None | Some(DecodeEvent::Finished)) {
            self.finished = true;
        }
        event
    }

    /// Next message or error; `None` when decoding has finished.
    pub async fn next(&mut self) -> Option<Result<Message, DecodeError>> {
        match self.next_event().await? {
            DecodeEvent::Message(message) => Some(Ok(message)),
            DecodeEvent::Error(error) => Some(Err(error)),
            DecodeEvent::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<Message, DecodeError>> + Send {
        futures_util::stream::unfold(self, |mut decoding| async move {
            let item = decoding.next().await?;
            Some((item, decoding))
        })
    }

    /// Drains the decode, collecting messages and the terminal error if any.
    pub async fn collect(mut self) -> DecodeOutcome {
        let mut outcome = DecodeOutcome::default();
        while let Some(item) = self.next().await {
            match item {
                Ok(message) => outcome.messages.push(message),
                Err(error) => outcome.error = Some(error),
            }
        }
        outcome
    }
}

struct RecordReader<R> {
    source: BufReader<R>,
    registry: Arc<Registry>,
    limits: DecoderLimits,
    record: u64,
}

impl<R> RecordReader<R>
where
    R: AsyncRead + Unpin,
{
    fn new(source: R, registry: Arc<Registry>, limits: DecoderLimits) -> Self {
        Self {
            source: BufReader::new(source),
            registry,
            limits,
            record: 0,
        }
    }

    /// Reads one frame; `Ok(None)` on a clean end of input.
    async fn next_record(&mut self) -> Result<Option<Message>, DecodeError> {
        let record = self.record;
        let io_error = |source: io::Error| match source.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::TruncatedRecord { record },
            _ => DecodeError::ReadFailure { record, source },
        };

        let mut prefix = [0u8; 4];
        if !self.read_frame_start(&mut prefix).await? {
            return Ok(None);
        }
        let id_len = u32::from_be_bytes(prefix);
        self.check_limit("connection_id", id_len, self.limits.max_connection_id_len)?;

        let mut connection_id = vec![0u8; id_len as usize];
        self.source
            .read_exact(&mut connection_id)
            .await
            .map_err(io_error)?;
        let timestamp = self.source.read_i64().await.map_err(io_error)?;
        let tag = self.source.read_u16().await.map_err(io_error)?;

        let entry = *self
            .registry
            .lookup(tag)
            .ok_or(DecodeError::UnknownMessageType { record, tag })?;

        let channel_id = self.source.read_i64().await.map_err(io_error)?;
        let payload = match self.source.read_u8().await.map_err(io_error)? {
            PAYLOAD_ABSENT => None,
            PAYLOAD_PRESENT => {
                let len = self.source.read_u32().await.map_err(io_error)?;
                self.check_limit("payload", len, self.limits.max_payload_len)?;
                let mut region = vec![0u8; len as usize];
                self.source.read_exact(&mut region).await.map_err(io_error)?;
                Some(frame::read_payload(&entry, &region, record)?)
            }
            flag => return Err(DecodeError::InvalidPresenceFlag { record, flag }),
        };

        self.record += 1;
        Ok(Some(Message {
            connection_id,
            timestamp,
            message_type: entry.message_type,
            channel_id,
            payload,
        }))
    }

    /// Fills `buf` with the first bytes of a frame. Returns `false` if the
    /// source is already exhausted, i.e. the stream ended on a frame boundary.
    async fn read_frame_start(&mut self, buf: &mut [u8]) -> Result<bool, DecodeError> {
        let record = self.record;
        let mut filled = 0;
        while filled < buf.len() {
            let n = self
                .source
                .read(&mut buf[filled..])
                .await
                .map_err(|source| DecodeError::ReadFailure { record, source })?;
            if n == 0 {
                return match filled {
                    0 => Ok(false),
                    _ => Err(DecodeError::TruncatedRecord { record }),
                };
            }
            filled += n;
        }
        Ok(true)
    }

    fn check_limit(&self, field: &'static str, len: u32, max: u32) -> Result<(), DecodeError> {
        if len > max {
            return Err(DecodeError::FieldTooLarge {
                record: self.record,
                field,
                len,
                max,
            });
        }
        Ok(())
    }
}
