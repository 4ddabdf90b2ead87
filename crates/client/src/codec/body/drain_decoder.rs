//! Decoder for response bodies without a declared length.
//!
//! Such a body is either close-delimited or simply never announced its size. The
//! decoder hands out whatever bytes are buffered; deciding when no more bytes are
//! coming is up to the reader, which bounds every read with the drain timeout. This
//! is a best-effort boundary, not a chunked transfer-coding decoder.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::protocol::{HttpError, PayloadItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainDecoder {
    drained: u64,
}

impl DrainDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes handed out so far.
    pub fn drained(&self) -> u64 {
        self.drained
    }
}

impl Decoder for DrainDecoder {
    type Item = PayloadItem;
    type Error = HttpError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let bytes = src.split().freeze();
        self.drained += bytes.len() as u64;
        Ok(Some(PayloadItem::Chunk(bytes)))
    }

    /// The peer closed the stream: flush what is left, then mark the end of the body.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => Ok(Some(PayloadItem::Eof)),
        }
    }
}
