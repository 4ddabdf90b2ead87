//! Outgoing request description.
//!
//! A [`RequestHead`] carries everything the transport engine needs to pick a pooled
//! connection and serialize one HTTP/1.1 request onto it.

use bytes::Bytes;
use http::Method;

use crate::protocol::{ConnectionKey, Headers};

/// A request ready to be written onto a connection.
#[derive(Debug, Clone)]
pub struct RequestHead {
    key: ConnectionKey,
    method: Method,
    path: String,
    headers: Headers,
    body: Option<Bytes>,
}

impl RequestHead {
    pub fn new<P: Into<String>>(key: ConnectionKey, method: Method, path: P) -> Self {
        Self { key, method, path: path.into(), headers: Headers::new(), body: None }
    }

    pub fn get<P: Into<String>>(key: ConnectionKey, path: P) -> Self {
        Self::new(key, Method::GET, path)
    }

    pub fn post<P: Into<String>>(key: ConnectionKey, path: P) -> Self {
        Self::new(key, Method::POST, path)
    }

    /// Adds a caller header. Values are written as given, neither validated nor
    /// deduplicated.
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the caller headers. Fields go on the wire in the order of `headers`.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn key(&self) -> &ConnectionKey {
        &self.key
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn header_fields(&self) -> &Headers {
        &self.headers
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
