use std::io;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{trace, warn};

use crate::codec::{RequestEncoder, ResponseDecoder, is_interim, is_keep_alive};
use crate::config::ClientConfig;
use crate::protocol::{
    BodyBoundary, BodyFraming, ConnectionError, HttpError, Message, PayloadItem, Phase, RawHttpMessage, RequestHead,
};

/// One request/response exchange over an established connection.
///
/// The request is written in full, then the response head is read, then the body
/// until its boundary. Every read and write is bounded by the matching timeout of
/// the [`ClientConfig`].
///
/// # Type Parameters
///
/// * `R`: The async readable half of the connection
/// * `W`: The async writable half of the connection
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, ResponseDecoder>,
    framed_write: FramedWrite<W, RequestEncoder>,
}

/// The outcome of a successful exchange.
#[derive(Debug)]
pub struct Exchange {
    pub message: RawHttpMessage,
    /// true if the connection ended at a clean boundary and may carry another request
    pub reusable: bool,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, user_agent: &str) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, ResponseDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, RequestEncoder::new(user_agent)),
        }
    }

    pub async fn exchange(mut self, request: &RequestHead, config: &ClientConfig) -> Result<Exchange, HttpError> {
        self.framed_read.decoder_mut().set_request_method(request.method());
        self.send_request(request, config.write_timeout).await?;

        let (head, framing) = loop {
            let (head, framing) = self.read_head(config.read_timeout).await?;
            if !is_interim(&head) {
                break (head, framing);
            }
            trace!(head_size = head.len(), "skip interim response head");
            self.read_body(&mut BytesMut::new(), framing, config.read_timeout).await?;
        };
        let keep_alive = is_keep_alive(&head);

        let mut raw = BytesMut::from(&head[..]);
        let boundary = match framing {
            BodyFraming::Drain => {
                warn!(key = %request.key(), "response has no content-length, draining body until the peer stalls");
                self.read_body(&mut raw, framing, config.drain_timeout).await?
            }
            _ => self.read_body(&mut raw, framing, config.read_timeout).await?,
        };

        let surplus = self.framed_read.read_buffer().len();
        if surplus > 0 {
            trace!(surplus, "bytes buffered past the end of the response");
        }

        let reusable = keep_alive && surplus == 0 && !boundary.is_inferred();
        let message = RawHttpMessage::new(raw.freeze(), head.len(), boundary);
        Ok(Exchange { message, reusable })
    }

    async fn send_request(&mut self, request: &RequestHead, write_timeout: Duration) -> Result<(), HttpError> {
        timeout(write_timeout, self.framed_write.send(request))
            .await
            .map_err(|_e| ConnectionError::timeout(Phase::Write, write_timeout))??;
        Ok(())
    }

    async fn read_head(&mut self, read_timeout: Duration) -> Result<(Bytes, BodyFraming), HttpError> {
        match timeout(read_timeout, self.framed_read.next()).await {
            Err(_) => Err(ConnectionError::timeout(Phase::ReadHead, read_timeout).into()),
            Ok(None) => Err(ConnectionError::unexpected_eof(Phase::ReadHead).into()),
            Ok(Some(Err(e))) => Err(e),
            Ok(Some(Ok(Message::Header(head)))) => Ok(head),
            Ok(Some(Ok(Message::Payload(_)))) => Err(out_of_order("body before response head")),
        }
    }

    /// Appends the body to `raw` and reports where it ended.
    ///
    /// For a drained body an expired `per_read` timeout ends the body, for any other
    /// framing it is an error.
    async fn read_body(
        &mut self,
        raw: &mut BytesMut,
        framing: BodyFraming,
        per_read: Duration,
    ) -> Result<BodyBoundary, HttpError> {
        loop {
            match timeout(per_read, self.framed_read.next()).await {
                Err(_) if framing.is_drain() => {
                    trace!(body_size = raw.len(), "no body bytes within the drain timeout");
                    return Ok(BodyBoundary::Timeout);
                }
                Err(_) => return Err(ConnectionError::timeout(Phase::ReadBody, per_read).into()),
                Ok(Some(Ok(Message::Payload(PayloadItem::Chunk(bytes))))) => raw.extend_from_slice(&bytes),
                Ok(Some(Ok(Message::Payload(PayloadItem::Eof)))) => {
                    return Ok(match framing {
                        BodyFraming::Length(_) => BodyBoundary::Length,
                        BodyFraming::Empty => BodyBoundary::Empty,
                        BodyFraming::Drain => BodyBoundary::Eof,
                    });
                }
                Ok(Some(Ok(Message::Header(_)))) => return Err(out_of_order("second response head inside a body")),
                Ok(Some(Err(e))) => return Err(e),
                Ok(None) if framing.is_drain() => return Ok(BodyBoundary::Eof),
                Ok(None) => return Err(ConnectionError::unexpected_eof(Phase::ReadBody).into()),
            }
        }
    }
}

fn out_of_order(reason: &str) -> HttpError {
    ConnectionError::io(io::Error::new(io::ErrorKind::InvalidData, reason.to_string())).into()
}
