//! The response handed back by [`Client`](crate::client::Client).

use std::fmt;

use bytes::Bytes;
use http::Method;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;

use crate::protocol::{BodyBoundary, BodyError, Headers, ParsedResponse};

/// A parsed response together with the method of the request that produced it.
///
/// `text()` never replaces invalid UTF-8 and `json()` reports the declared
/// `Content-Type` when decoding fails.
#[derive(Debug)]
pub struct Response {
    method: Method,
    inner: ParsedResponse,
    boundary: BodyBoundary,
    json_value: OnceCell<serde_json::Value>,
}

impl Response {
    pub fn new(method: Method, inner: ParsedResponse, boundary: BodyBoundary) -> Self {
        Self { method, inner, boundary, json_value: OnceCell::new() }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    pub fn reason(&self) -> &str {
        self.inner.reason()
    }

    pub fn headers(&self) -> &Headers {
        self.inner.headers()
    }

    /// How the end of the body was found; an inferred boundary may have cut it short.
    pub fn boundary(&self) -> BodyBoundary {
        self.boundary
    }

    pub fn bytes(&self) -> &Bytes {
        self.inner.body()
    }

    /// The body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::Encoding`] if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, BodyError> {
        Ok(std::str::from_utf8(self.inner.body())?)
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::JsonDecode`] naming the declared content type, or
    /// `unknown` if there is none.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        serde_json::from_slice(self.inner.body()).map_err(|e| self.json_error(e))
    }

    /// Decodes the body into a [`serde_json::Value`] once and returns the cached value
    /// on later calls.
    pub fn json_value(&self) -> Result<&serde_json::Value, BodyError> {
        self.json_value.get_or_try_init(|| self.json())
    }

    fn json_error(&self, source: serde_json::Error) -> BodyError {
        BodyError::json_decode(self.inner.content_type().unwrap_or("unknown"), source)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status())
    }
}
