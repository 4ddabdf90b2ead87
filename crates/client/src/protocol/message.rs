use bytes::Bytes;

use crate::codec;
use crate::protocol::{ParseError, ParsedResponse};

/// One item produced while decoding a response stream: the head first, then
/// payload items until [`PayloadItem::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<T> {
    /// Contains the head of the response
    Header(T),
    /// Contains a chunk of body data or the EOF marker
    Payload(PayloadItem),
}

impl<T> Message<T> {
    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(_))
    }
}

/// An item in the body stream of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    /// A chunk of body data
    Chunk(Bytes),
    /// Marks the end of the body
    Eof,
}

impl PayloadItem {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

/// How the body of a response is delimited, decided from its head.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyFraming {
    /// `Content-Length` declared this many bytes
    Length(u64),
    /// No body can follow, by status code or `Content-Length: 0`
    Empty,
    /// No length was declared; read until the peer stalls or closes
    Drain,
}

impl BodyFraming {
    #[inline]
    pub fn is_drain(&self) -> bool {
        matches!(self, BodyFraming::Drain)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, BodyFraming::Empty)
    }
}

/// Where the body of a response ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyBoundary {
    /// exactly the declared `Content-Length` bytes were read
    Length,
    /// the status code or a zero length ruled out a body
    Empty,
    /// no length was declared and the peer closed the stream
    Eof,
    /// no length was declared and no byte arrived within the drain timeout
    Timeout,
}

impl BodyBoundary {
    /// Returns true if the end of the body was guessed rather than declared.
    ///
    /// An inferred boundary may have cut the body short.
    #[inline]
    pub fn is_inferred(&self) -> bool {
        matches!(self, BodyBoundary::Eof | BodyBoundary::Timeout)
    }
}

/// The undecoded bytes of one response: the head block including its terminating
/// CRLFCRLF, immediately followed by the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHttpMessage {
    bytes: Bytes,
    head_len: usize,
    boundary: BodyBoundary,
}

impl RawHttpMessage {
    pub fn new(bytes: Bytes, head_len: usize, boundary: BodyBoundary) -> Self {
        debug_assert!(head_len <= bytes.len());
        Self { bytes, head_len, boundary }
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn head(&self) -> Bytes {
        self.bytes.slice(..self.head_len)
    }

    pub fn body(&self) -> Bytes {
        self.bytes.slice(self.head_len..)
    }

    pub fn boundary(&self) -> BodyBoundary {
        self.boundary
    }

    /// Decodes the message into status, headers and body.
    pub fn parse(&self) -> Result<ParsedResponse, ParseError> {
        codec::parse(self.bytes.clone())
    }
}
