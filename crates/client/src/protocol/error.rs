use std::io;
use std::str::Utf8Error;
use std::time::Duration;

use thiserror::Error;

/// Top-level error returned by the transport engine and the client facade.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection error: {source}")]
    Connection {
        #[from]
        source: ConnectionError,
    },

    #[error("malformed response: {source}")]
    Response {
        #[from]
        source: ParseError,
    },

    #[error("body error: {source}")]
    Body {
        #[from]
        source: BodyError,
    },

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("can't encode request body: {source}")]
    Encode {
        #[from]
        source: serde_json::Error,
    },
}

impl HttpError {
    pub fn invalid_url<U: ToString, R: ToString>(url: U, reason: R) -> Self {
        Self::InvalidUrl { url: url.to_string(), reason: reason.to_string() }
    }

    /// Returns true if the failure happened at the transport layer.
    pub fn is_connection(&self) -> bool {
        matches!(self, HttpError::Connection { .. })
    }
}

// `tokio_util::codec::Decoder` reports read errors through `From<io::Error>`
impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        ConnectionError::io(e).into()
    }
}

/// The I/O phase a transport failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connect,
    Handshake,
    Write,
    ReadHead,
    ReadBody,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Connect => "connect",
            Phase::Handshake => "tls handshake",
            Phase::Write => "write request",
            Phase::ReadHead => "read response head",
            Phase::ReadBody => "read response body",
        };
        f.write_str(name)
    }
}

/// Failure at the transport layer. Always fatal to the current request, and the
/// connection involved is discarded.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("can't connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("tls handshake failed: {reason}")]
    Tls { reason: String },

    #[error("invalid tls server name: {host}")]
    InvalidServerName { host: String },

    #[error("{phase} timed out after {after:?}")]
    Timeout { phase: Phase, after: Duration },

    #[error("connection closed during {phase}")]
    UnexpectedEof { phase: Phase },

    #[error("response head size too large, current: {size} exceed the limit {max}")]
    HeadTooLarge { size: usize, max: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ConnectionError {
    pub fn connect<A: ToString>(addr: A, source: io::Error) -> Self {
        Self::Connect { addr: addr.to_string(), source }
    }

    pub fn tls<S: ToString>(reason: S) -> Self {
        Self::Tls { reason: reason.to_string() }
    }

    pub fn invalid_server_name<S: ToString>(host: S) -> Self {
        Self::InvalidServerName { host: host.to_string() }
    }

    pub fn timeout(phase: Phase, after: Duration) -> Self {
        Self::Timeout { phase, after }
    }

    pub fn unexpected_eof(phase: Phase) -> Self {
        Self::UnexpectedEof { phase }
    }

    pub fn head_too_large(size: usize, max: usize) -> Self {
        Self::HeadTooLarge { size, max }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// The response bytes can't be decoded into a status line and headers.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid status line: {line:?}")]
    InvalidStatusLine { line: String },

    #[error("invalid status code: {code:?}")]
    InvalidStatusCode { code: String },

    #[error("response head is not valid utf-8")]
    InvalidEncoding,

    #[error("invalid content-length header: {value:?}")]
    InvalidContentLength { value: String },
}

impl ParseError {
    pub fn invalid_status_line<S: ToString>(line: S) -> Self {
        Self::InvalidStatusLine { line: line.to_string() }
    }

    pub fn invalid_status_code<S: ToString>(code: S) -> Self {
        Self::InvalidStatusCode { code: code.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(value: S) -> Self {
        Self::InvalidContentLength { value: value.to_string() }
    }
}

/// The body can't be viewed the way the caller asked for.
///
/// These errors never affect the raw view of the body.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body is not valid utf-8: {source}")]
    Encoding {
        #[from]
        source: Utf8Error,
    },

    #[error("cannot parse json, content-type: {content_type}: {source}")]
    JsonDecode { content_type: String, source: serde_json::Error },
}

impl BodyError {
    pub fn json_decode<S: ToString>(content_type: S, source: serde_json::Error) -> Self {
        Self::JsonDecode { content_type: content_type.to_string(), source }
    }

    /// The declared content type carried by a [`BodyError::JsonDecode`].
    pub fn content_type(&self) -> Option<&str> {
        match self {
            BodyError::JsonDecode { content_type, .. } => Some(content_type),
            BodyError::Encoding { .. } => None,
        }
    }
}
