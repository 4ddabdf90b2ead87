use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use pin_project_lite::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

/// A byte stream that can be parked in the [`ConnectionPool`](super::ConnectionPool).
pub trait Connection: AsyncRead + AsyncWrite + Unpin + Send + 'static {
    /// Returns true once the stream can't carry another request: it was shut
    /// down, the peer closed it or an I/O error occurred.
    fn is_closing(&self) -> bool;
}

pin_project! {
    #[project = MaybeTlsProj]
    enum MaybeTlsStream {
        Plain { #[pin] stream: TcpStream },
        Tls { #[pin] stream: Box<TlsStream<TcpStream>> },
    }
}

pin_project! {
    /// A plaintext or TLS wrapped TCP stream that tracks whether it is still usable.
    pub struct TransportStream {
        #[pin]
        inner: MaybeTlsStream,
        closing: bool,
    }
}

impl TransportStream {
    pub fn plain(stream: TcpStream) -> Self {
        Self { inner: MaybeTlsStream::Plain { stream }, closing: false }
    }

    pub fn tls(stream: TlsStream<TcpStream>) -> Self {
        Self { inner: MaybeTlsStream::Tls { stream: Box::new(stream) }, closing: false }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self.inner, MaybeTlsStream::Tls { .. })
    }
}

impl Connection for TransportStream {
    fn is_closing(&self) -> bool {
        self.closing
    }
}

impl std::fmt::Debug for TransportStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportStream").field("tls", &self.is_tls()).field("closing", &self.closing).finish()
    }
}

impl AsyncRead for TransportStream {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        let wanted = buf.remaining();
        let filled = buf.filled().len();

        let result = ready!(match this.inner.project() {
            MaybeTlsProj::Plain { stream } => stream.poll_read(cx, buf),
            MaybeTlsProj::Tls { stream } => stream.poll_read(cx, buf),
        });

        // a read that could take bytes but got none is the peer closing
        if result.is_err() || (wanted > 0 && buf.filled().len() == filled) {
            *this.closing = true;
        }
        Poll::Ready(result)
    }
}

impl AsyncWrite for TransportStream {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let this = self.project();
        let result = ready!(match this.inner.project() {
            MaybeTlsProj::Plain { stream } => stream.poll_write(cx, buf),
            MaybeTlsProj::Tls { stream } => stream.poll_write(cx, buf),
        });

        if result.is_err() {
            *this.closing = true;
        }
        Poll::Ready(result)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        let result = ready!(match this.inner.project() {
            MaybeTlsProj::Plain { stream } => stream.poll_flush(cx),
            MaybeTlsProj::Tls { stream } => stream.poll_flush(cx),
        });

        if result.is_err() {
            *this.closing = true;
        }
        Poll::Ready(result)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.project();
        *this.closing = true;
        match this.inner.project() {
            MaybeTlsProj::Plain { stream } => stream.poll_shutdown(cx),
            MaybeTlsProj::Tls { stream } => stream.poll_shutdown(cx),
        }
    }
}
