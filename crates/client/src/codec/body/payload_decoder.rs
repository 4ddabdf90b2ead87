//! Decoder implementation for response bodies.
//!
//! Dispatches to the strategy chosen from the response head:
//! - Content-Length delimited bodies
//! - bodies drained until the peer stalls or closes
//! - no body at all

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::body::drain_decoder::DrainDecoder;
use crate::codec::body::length_decoder::LengthDecoder;
use crate::protocol::{BodyFraming, HttpError, PayloadItem};

/// A unified decoder for response bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode a body with a fixed content length
    Length(LengthDecoder),

    /// Hand out bytes until the reader decides the body is over
    Drain(DrainDecoder),

    /// Responses that can't carry a body
    NoBody,
}

impl PayloadDecoder {
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    pub fn drain() -> Self {
        Self { kind: Kind::Drain(DrainDecoder::new()) }
    }

    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthDecoder::new(size)) }
    }
}

impl From<BodyFraming> for PayloadDecoder {
    fn from(framing: BodyFraming) -> Self {
        match framing {
            BodyFraming::Length(length) => PayloadDecoder::fix_length(length),
            BodyFraming::Drain => PayloadDecoder::drain(),
            BodyFraming::Empty => PayloadDecoder::empty(),
        }
    }
}

impl Decoder for PayloadDecoder {
    type Item = PayloadItem;
    type Error = HttpError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(src),
            Kind::Drain(drain_decoder) => drain_decoder.decode(src),
            Kind::NoBody => Ok(Some(PayloadItem::Eof)),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode_eof(src),
            Kind::Drain(drain_decoder) => drain_decoder.decode_eof(src),
            Kind::NoBody => Ok(Some(PayloadItem::Eof)),
        }
    }
}
