//! In-memory connections for exercising the pool and the transport without sockets.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::future::BoxFuture;
use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream, ReadBuf};

use crate::connection::{Connection, Connector};
use crate::protocol::{ConnectionError, ConnectionKey};

type Server = Arc<dyn Fn(DuplexStream) -> BoxFuture<'static, ()> + Send + Sync>;

pin_project! {
    /// The client half of a `tokio::io::duplex` pipe that counts its shutdowns.
    pub(crate) struct FakeConnection {
        #[pin]
        stream: DuplexStream,
        // keeps the pipe open when no server task owns the other half
        peer: Option<DuplexStream>,
        shutdowns: Arc<AtomicUsize>,
        closing: Arc<AtomicBool>,
    }
}

impl FakeConnection {
    /// A connection nobody answers on.
    pub(crate) fn idle(shutdowns: Arc<AtomicUsize>) -> Self {
        let (stream, peer) = tokio::io::duplex(64 * 1024);
        Self { stream, peer: Some(peer), shutdowns, closing: Arc::default() }
    }

    /// A connection that already reports itself as closing.
    pub(crate) fn closed(shutdowns: Arc<AtomicUsize>) -> Self {
        let connection = Self::idle(shutdowns);
        connection.closing.store(true, Ordering::SeqCst);
        connection
    }

    /// Flag that simulates the peer closing the connection while it is parked.
    pub(crate) fn closing_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closing)
    }
}

impl Connection for FakeConnection {
    fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }
}

impl AsyncRead for FakeConnection {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        self.project().stream.poll_read(cx, buf)
    }
}

impl AsyncWrite for FakeConnection {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.project().stream.poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.project().stream.poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        if !this.closing.swap(true, Ordering::SeqCst) {
            this.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
        this.stream.poll_shutdown(cx)
    }
}

/// Hands out [`FakeConnection`]s, each optionally served by its own server task.
#[derive(Clone, Default)]
pub(crate) struct FakeConnector {
    connects: Arc<AtomicUsize>,
    shutdowns: Arc<AtomicUsize>,
    server: Option<Server>,
}

impl FakeConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Runs `server` on the far end of every new connection.
    pub(crate) fn serving<F, Fut>(server: F) -> Self
    where
        F: Fn(DuplexStream) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let server: Server =
            Arc::new(move |stream: DuplexStream| -> BoxFuture<'static, ()> { Box::pin(server(stream)) });
        Self { server: Some(server), ..Self::default() }
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub(crate) fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Conn = FakeConnection;

    async fn connect(&self, _key: &ConnectionKey) -> Result<FakeConnection, ConnectionError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let mut connection = FakeConnection::idle(self.shutdowns.clone());
        if let (Some(server), Some(peer)) = (&self.server, connection.peer.take()) {
            tokio::spawn(server(peer));
        }
        Ok(connection)
    }
}
