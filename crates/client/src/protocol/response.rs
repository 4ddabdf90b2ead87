//! Decoded HTTP response.
//!
//! [`ParsedResponse`] is the structured status/headers/body triple produced by
//! [`crate::codec::parse`]. Once parsing succeeded the status code is always present
//! and numeric.

use bytes::Bytes;
use http::header;

use crate::protocol::Headers;

/// A response split into status line, header fields and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    version: String,
    status: u16,
    reason: String,
    headers: Headers,
    body: Bytes,
}

impl ParsedResponse {
    pub fn new(version: String, status: u16, reason: String, headers: Headers, body: Bytes) -> Self {
        Self { version, status, reason, headers, body }
    }

    /// The protocol token of the status line, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// The declared `Content-Type`, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_TYPE.as_str())
    }

    /// The declared `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.headers.get(header::CONTENT_LENGTH.as_str()).and_then(|value| value.trim().parse().ok())
    }
}
