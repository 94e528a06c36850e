use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;
use tracing::trace;

use crate::storage::StorageWriter;

/// Turns any byte sink into a `StorageWriter` whose metadata calls are
/// no-ops. Useful for pipes and other sinks without an index.
#[derive(Debug)]
pub struct StorageWriterProxy<W> {
    inner: W,
}

impl<W> StorageWriterProxy<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W> AsyncWrite for StorageWriterProxy<W>
where
    W: AsyncWrite + Unpin,
{
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

impl<W> StorageWriter for StorageWriterProxy<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn set_metadata(&mut self, start_time: i64, source_ip: &str, username: Option<&str>) {
        trace!(start_time, source_ip, ?username, "metadata ignored by proxy");
    }
}
