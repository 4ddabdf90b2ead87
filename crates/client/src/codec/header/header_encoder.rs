//! HTTP request head encoder.
//!
//! Serializes the request line and header fields of a [`RequestHead`] into raw bytes.
//! Fields are written in a fixed order:
//!
//! 1. `Host`, `Connection: keep-alive`, `User-Agent`, `Accept: */*`
//! 2. caller supplied fields, in caller order, as given
//! 3. when a body is present: `Content-Type` (only if the caller didn't set one)
//!    and `Content-Length`
//!
//! Caller fields are neither validated nor deduplicated against the defaults; on the
//! wire the last field with a given name wins.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::{Method, header};
use mime::Mime;
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::protocol::{ConnectionError, RequestHead};

/// Initial buffer size allocated for head serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for the head of an HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct HeaderEncoder {
    user_agent: String,
}

impl HeaderEncoder {
    pub fn new<S: Into<String>>(user_agent: S) -> Self {
        Self { user_agent: user_agent.into() }
    }
}

impl Encoder<&RequestHead> for HeaderEncoder {
    type Error = ConnectionError;

    fn encode(&mut self, request: &RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE);

        write!(FastWrite(dst), "{} {} HTTP/1.1\r\n", request.method(), request.path())?;

        write_field(dst, "Host", &request.key().host_header());
        write_field(dst, "Connection", "keep-alive");
        write_field(dst, "User-Agent", &self.user_agent);
        write_field(dst, "Accept", mime::STAR_STAR.as_ref());

        let fields = request.header_fields();
        for (name, value) in fields.iter() {
            write_field(dst, name, value);
        }

        if let Some(body) = request.body_bytes() {
            if !fields.contains(header::CONTENT_TYPE.as_str()) {
                let content_type = default_content_type(request.method());
                trace!(%content_type, "inject default content-type");
                write_field(dst, "Content-Type", content_type.as_ref());
            }
            write!(FastWrite(dst), "Content-Length: {}\r\n", body.len())?;
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// The `Content-Type` sent with a body when the caller didn't declare one.
fn default_content_type(method: &Method) -> Mime {
    if *method == Method::POST { mime::APPLICATION_JSON } else { mime::STAR_STAR }
}

#[inline]
fn write_field(dst: &mut BytesMut, name: &str, value: &str) {
    dst.put_slice(name.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}

/// Writer over `BytesMut`, so `write!` formats straight into the buffer.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
