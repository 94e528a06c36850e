//! The `storage` module provides the byte sinks and sources the codec reads
//! from and writes to.
//!
//! Reading and writing are separate capabilities: a read-only backend only
//! implements `ReadableStorage`. `ReadWriteStorage` is implemented for any
//! type that has both.
//!
//! Writers additionally accept out-of-band metadata used for indexing. It is
//! never part of the encoded byte stream.

pub mod file_store;
pub mod proxy;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::utils::error::StorageError;

pub use file_store::{FileStorage, FileWriter};
pub use proxy::StorageWriterProxy;

/// Indexing data attached to one audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMetadata {
    /// Unix timestamp (seconds) of the connection start.
    pub start_time: i64,
    pub source_ip: String,
    pub username: Option<String>,
}

/// A stored audit log as returned by `ReadableStorage::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub metadata: Option<LogMetadata>,
}

/// A byte sink that also accepts connection metadata.
pub trait StorageWriter: AsyncWrite + Unpin + Send {
    /// Records indexing metadata for this log.
    ///
    /// Called once when the user connects (`username` is `None`) and again
    /// once the user has authenticated. Later calls replace earlier ones.
    fn set_metadata(&mut self, start_time: i64, source_ip: &str, username: Option<&str>);
}

pub trait WritableStorage {
    type Writer: StorageWriter;

    fn open_writer(&self, name: &str) -> Result<Self::Writer, StorageError>;
}

pub trait ReadableStorage {
    type Reader: AsyncRead + Unpin + Send + 'static;

    fn open_reader(&self, name: &str) -> Result<Self::Reader, StorageError>;

    /// Lazily enumerates stored logs.
    fn list(&self) -> Box<dyn Iterator<Item = Result<Entry, StorageError>> + '_>;
}

pub trait ReadWriteStorage: ReadableStorage + WritableStorage {}

impl<T> ReadWriteStorage for T where T: ReadableStorage + WritableStorage {}

#[cfg(test)]
mod tests;
