//! HTTP response decoder module
//!
//! Decodes a response stream in two phases, the head first and then the body, in
//! the same state machine style as a request decoder on the server side.
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::codec::ResponseDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = ResponseDecoder::new();
//! let mut buffer = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok"[..]);
//! let head = decoder.decode(&mut buffer);
//! let body = decoder.decode(&mut buffer);
//! ```

use bytes::{Bytes, BytesMut};
use http::Method;
use tokio_util::codec::Decoder;

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{BodyFraming, HttpError, Message, PayloadItem};

/// A decoder for HTTP responses that handles both head and body
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` field:
/// - `None`: Currently looking for the end of the head
/// - `Some(PayloadDecoder)`: Currently reading the body
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Tells the decoder which request the next response answers; a response to
    /// `HEAD` never carries a body whatever its head declares.
    pub fn set_request_method(&mut self, method: &Method) {
        self.header_decoder.set_request_method(method);
    }

    /// Returns true while a body is being decoded.
    pub fn in_body(&self) -> bool {
        self.payload_decoder.is_some()
    }

    fn decode_payload(
        &mut self,
        src: &mut BytesMut,
        eof: bool,
    ) -> Result<Option<Message<(Bytes, BodyFraming)>>, HttpError> {
        let Some(payload_decoder) = &mut self.payload_decoder else {
            return Ok(None);
        };

        let item = if eof { payload_decoder.decode_eof(src)? } else { payload_decoder.decode(src)? };
        let message = match item {
            Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
            Some(item @ PayloadItem::Eof) => {
                // the body is complete, the next bytes belong to another response
                self.payload_decoder.take();
                Some(Message::Payload(item))
            }
            None => None,
        };

        Ok(message)
    }
}

impl Decoder for ResponseDecoder {
    type Item = Message<(Bytes, BodyFraming)>;
    type Error = HttpError;

    /// Attempts to decode the next part of a response from the buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: the complete head and the framing of its body
    /// - `Ok(Some(Message::Payload(_)))`: a body chunk, or `Eof` once the body is complete
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: the head is too large or declares an invalid length
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.payload_decoder.is_some() {
            return self.decode_payload(src, false);
        }

        let message = match self.header_decoder.decode(src)? {
            Some((head, framing)) => {
                self.payload_decoder = Some(framing.into());
                Some(Message::Header((head, framing)))
            }
            None => None,
        };

        Ok(message)
    }

    /// Called once the peer closed the stream.
    ///
    /// A partial head yields nothing; the reader reports the stream as closed early.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.payload_decoder.is_some() {
            return self.decode_payload(src, true);
        }

        self.decode(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_then_body_then_eof() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello, lingering"[..]);

        let head = decoder.decode(&mut buf).unwrap().unwrap();
        assert!(matches!(head, Message::Header((_, BodyFraming::Length(5)))));
        assert!(decoder.in_body());

        let body = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(body, Message::Payload(PayloadItem::Chunk("hello".into())));

        let eof = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(eof, Message::Payload(PayloadItem::Eof));
        assert!(!decoder.in_body());

        assert_eq!(&buf[..], b", lingering");
    }

    #[test]
    fn empty_body_ends_immediately() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 204 No Content\r\n\r\n"[..]);

        assert!(decoder.decode(&mut buf).unwrap().unwrap().is_header());
        assert_eq!(decoder.decode(&mut buf).unwrap(), Some(Message::Payload(PayloadItem::Eof)));
    }

    #[test]
    fn drained_body_ends_at_eof() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.0 200 OK\r\n\r\nuntil close"[..]);

        assert!(matches!(decoder.decode(&mut buf).unwrap(), Some(Message::Header((_, BodyFraming::Drain)))));
        assert_eq!(decoder.decode(&mut buf).unwrap(), Some(Message::Payload(PayloadItem::Chunk("until close".into()))));
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
        assert_eq!(decoder.decode_eof(&mut buf).unwrap(), Some(Message::Payload(PayloadItem::Eof)));
        assert_eq!(decoder.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn head_request_skips_declared_body() {
        let mut decoder = ResponseDecoder::new();
        decoder.set_request_method(&Method::HEAD);
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n"[..]);

        assert!(matches!(decoder.decode(&mut buf).unwrap(), Some(Message::Header((_, BodyFraming::Empty)))));
        assert_eq!(decoder.decode(&mut buf).unwrap(), Some(Message::Payload(PayloadItem::Eof)));
        assert!(!decoder.in_body());
    }

    #[test]
    fn partial_head_at_eof() {
        let mut decoder = ResponseDecoder::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-"[..]);

        assert_eq!(decoder.decode_eof(&mut buf).unwrap(), None);
    }
}
