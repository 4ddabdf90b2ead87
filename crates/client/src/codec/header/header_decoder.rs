//! HTTP response head decoder.
//!
//! Finds the end of the response head (the first CRLFCRLF) in the read buffer,
//! splits the head off and decides how the body that follows is delimited.
//!
//! # Body framing
//!
//! The framing is picked from the head, in this order:
//!
//! 1. status `1xx`, `204` and `304` never carry a body, nor does any response to `HEAD`
//! 2. `Transfer-Encoding: chunked` is not decoded; the raw chunk stream is drained
//! 3. `Content-Length: 0` means no body, any other value a body of exactly that size
//! 4. without a length the body is drained until the peer stalls or closes
//!
//! Header names are matched ASCII case-insensitively.
//!
//! # Limits
//!
//! - Maximum head size: 64KB

use bytes::{Bytes, BytesMut};
use http::Method;
use tokio_util::codec::Decoder;
use tracing::{trace, warn};

use crate::codec::parser::parse_status_line;
use crate::ensure;
use crate::protocol::{BodyFraming, ConnectionError, HttpError, ParseError};

/// Maximum size in bytes allowed for the response head
pub(crate) const MAX_HEAD_BYTES: usize = 64 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Decoder for HTTP response heads implementing the [`Decoder`] trait.
///
/// Yields the head bytes, terminator included, and the [`BodyFraming`] of the body.
#[derive(Debug, Default)]
pub struct HeaderDecoder {
    /// bytes of the buffer already searched for the terminator
    searched: usize,
    head_request: bool,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method of the request whose response is decoded next.
    pub fn set_request_method(&mut self, method: &Method) {
        self.head_request = *method == Method::HEAD;
    }
}

impl Decoder for HeaderDecoder {
    type Item = (Bytes, BodyFraming);
    type Error = HttpError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // resume a few bytes back, the terminator may straddle two reads
        let from = self.searched.saturating_sub(HEAD_TERMINATOR.len() - 1);
        match find(&src[from..], HEAD_TERMINATOR) {
            Some(offset) => {
                let head_len = from + offset + HEAD_TERMINATOR.len();
                ensure!(head_len <= MAX_HEAD_BYTES, ConnectionError::head_too_large(head_len, MAX_HEAD_BYTES).into());

                self.searched = 0;
                let head = src.split_to(head_len).freeze();
                let framing = body_framing(&head, self.head_request)?;
                trace!(head_size = head_len, ?framing, "decoded response head");
                Ok(Some((head, framing)))
            }
            None => {
                ensure!(src.len() <= MAX_HEAD_BYTES, ConnectionError::head_too_large(src.len(), MAX_HEAD_BYTES).into());
                self.searched = src.len();
                Ok(None)
            }
        }
    }
}

/// Returns true if the connection may carry another request after this response.
///
/// `Connection: close` always ends the connection; an HTTP/1.0 response keeps it
/// only with an explicit `Connection: keep-alive`. After `101 Switching Protocols`
/// the stream no longer speaks HTTP/1.1.
pub(crate) fn is_keep_alive(head: &[u8]) -> bool {
    let mut lines = head_lines(head);
    let status_line = lines.next().unwrap_or_default();
    if status_code(status_line) == Some(101) {
        return false;
    }
    let http_10 = status_line.starts_with(b"HTTP/1.0");

    let connection = lines.filter_map(split_field).find(|(name, _)| name.eq_ignore_ascii_case(b"connection"));
    match connection {
        Some((_, value)) if has_token(value, b"close") => false,
        Some((_, value)) if has_token(value, b"keep-alive") => true,
        _ => !http_10,
    }
}

/// Returns true for an interim `1xx` head that is followed by the final response.
///
/// `101 Switching Protocols` is final.
pub(crate) fn is_interim(head: &[u8]) -> bool {
    head_lines(head).next().and_then(status_code).is_some_and(|status| (100..200).contains(&status) && status != 101)
}

/// Determines how the body following `head` is delimited.
///
/// # Errors
///
/// Returns [`ParseError`] if the status line is malformed or the `Content-Length`
/// value isn't a non-negative integer.
pub(crate) fn body_framing(head: &[u8], head_request: bool) -> Result<BodyFraming, ParseError> {
    let mut lines = head_lines(head);

    let status_line = lines.next().unwrap_or_default();
    let status_line = std::str::from_utf8(status_line).map_err(|_e| ParseError::InvalidEncoding)?;
    let (_, status, _) = parse_status_line(status_line)?;
    if (100..200).contains(&status) || status == 204 || status == 304 || head_request {
        return Ok(BodyFraming::Empty);
    }

    let mut content_length = None;
    for (name, value) in lines.filter_map(split_field) {
        if name.eq_ignore_ascii_case(b"transfer-encoding") && is_chunked(value) {
            warn!("chunked transfer-encoding is not supported, draining the raw body");
            return Ok(BodyFraming::Drain);
        }

        if name.eq_ignore_ascii_case(b"content-length") {
            content_length = Some(parse_content_length(value)?);
        }
    }

    Ok(match content_length {
        Some(0) => BodyFraming::Empty,
        Some(length) => BodyFraming::Length(length),
        None => BodyFraming::Drain,
    })
}

fn head_lines(head: &[u8]) -> impl Iterator<Item = &[u8]> {
    head.split(|b| *b == b'\n').map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Splits a header line on its first colon, trimming the value.
fn split_field(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let colon = line.iter().position(|b| *b == b':')?;
    Some((&line[..colon], line[colon + 1..].trim_ascii()))
}

fn has_token(value: &[u8], token: &[u8]) -> bool {
    value.split(|b| *b == b',').any(|item| item.trim_ascii().eq_ignore_ascii_case(token))
}

fn parse_content_length(value: &[u8]) -> Result<u64, ParseError> {
    let invalid = || ParseError::invalid_content_length(String::from_utf8_lossy(value));
    ensure!(!value.is_empty() && value.iter().all(u8::is_ascii_digit), invalid());
    std::str::from_utf8(value).ok().and_then(|s| s.parse::<u64>().ok()).ok_or_else(invalid)
}

/// Reads the status code from a status line, `None` if it can't be found.
fn status_code(line: &[u8]) -> Option<u16> {
    let code = line.split(|b| *b == b' ').nth(1)?;
    std::str::from_utf8(code).ok()?.parse().ok()
}

/// Checks if the Transfer-Encoding value ends with the chunked coding.
fn is_chunked(value: &[u8]) -> bool {
    value.rsplit(|b| *b == b',').next().is_some_and(|last| last.trim_ascii().eq_ignore_ascii_case(b"chunked"))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
