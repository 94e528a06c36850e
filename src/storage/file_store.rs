//! File storage with a `sled` metadata index
//!
//! Each audit log is one file directly under the storage directory. Metadata
//! passed to `set_metadata` is stored as JSON in a `sled` database kept in
//! the hidden `.index` subdirectory, keyed by log name.
//!
//! Layout:
//! - `<dir>/<name>`: encoded record frames
//! - `<dir>/.index/`: sled database, `name -> LogMetadata`
//!
//! Logs are append-only: opening a writer for an existing name fails.

use std::fs::{self, DirEntry, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use sled::Db;
use tokio::fs::File;
use tokio::io::AsyncWrite;
use tracing::{debug, warn};

use crate::storage::{Entry, LogMetadata, ReadableStorage, StorageWriter, WritableStorage};
use crate::utils::error::StorageError;

const INDEX_DIR: &str = ".index";

#[derive(Clone)]
pub struct FileStorage {
    directory: PathBuf,
    index: Db,
}

impl FileStorage {
    /// Opens or creates a storage rooted at `directory`.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, StorageError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        let index = sled::open(directory.join(INDEX_DIR))?;
        debug!(directory = %directory.display(), "opened file storage");
        Ok(Self { directory, index })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Metadata recorded for `name`, if any.
    pub fn metadata(&self, name: &str) -> Result<Option<LogMetadata>, StorageError> {
        match self.index.get(name.as_bytes())? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let invalid = name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.directory.join(name))
    }

    fn entry_for(&self, item: io::Result<DirEntry>) -> Result<Option<Entry>, StorageError> {
        let item = item?;
        if !item.file_type()?.is_file() {
            return Ok(None);
        }
        let Some(name) = item.file_name().to_str().map(str::to_owned) else {
            return Ok(None);
        };
        if name.starts_with('.') {
            return Ok(None);
        }
        let metadata = self.metadata(&name)?;
        Ok(Some(Entry { name, metadata }))
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("directory", &self.directory)
            .field("index", &"sled::Db")
            .finish()
    }
}

impl WritableStorage for FileStorage {
    type Writer = FileWriter;

    fn open_writer(&self, name: &str) -> Result<FileWriter, StorageError> {
        let path = self.path_for(name)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
                _ => StorageError::Io(e),
            })?;
        Ok(FileWriter {
            name: name.to_string(),
            file: File::from_std(file),
            index: self.index.clone(),
        })
    }
}

impl ReadableStorage for FileStorage {
    type Reader = File;

    fn open_reader(&self, name: &str) -> Result<File, StorageError> {
        let path = self.path_for(name)?;
        let file = fs::File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io(e),
        })?;
        Ok(File::from_std(file))
    }

    fn list(&self) -> Box<dyn Iterator<Item = Result<Entry, StorageError>> + '_> {
        match fs::read_dir(&self.directory) {
            Ok(dir) => Box::new(dir.filter_map(|item| self.entry_for(item).transpose())),
            Err(e) => Box::new(std::iter::once(Err(StorageError::Io(e)))),
        }
    }
}

/// Writer for one log file of a `FileStorage`.
pub struct FileWriter {
    name: String,
    file: File,
    index: Db,
}

impl FileWriter {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("name", &self.name)
            .finish()
    }
}

impl AsyncWrite for FileWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.file).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_shutdown(cx)
    }
}

impl StorageWriter for FileWriter {
    fn set_metadata(&mut self, start_time: i64, source_ip: &str, username: Option<&str>) {
        let metadata = LogMetadata {
            start_time,
            source_ip: source_ip.to_string(),
            username: username.map(str::to_owned),
        };

        let serialized = match serde_json::to_vec(&metadata) {
            Ok(data) => data,
            Err(e) => {
                warn!(name = %self.name, "failed to serialize metadata: {e}");
                return;
            }
        };

        if let Err(e) = self.index.insert(self.name.as_bytes(), serialized) {
            warn!(name = %self.name, "failed to index metadata: {e}");
            return;
        }

        if let Err(e) = self.index.flush() {
            warn!(name = %self.name, "failed to flush metadata index: {e}");
        }
    }
}
