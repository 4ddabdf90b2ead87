use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::codec::header::HeaderEncoder;
use crate::protocol::{ConnectionError, RequestHead};

/// Encodes a whole request: the head, then the body bytes if there are any.
///
/// The body is written exactly as given, its length matching the `Content-Length`
/// written by the [`HeaderEncoder`].
#[derive(Debug, Clone)]
pub struct RequestEncoder {
    header_encoder: HeaderEncoder,
}

impl RequestEncoder {
    pub fn new<S: Into<String>>(user_agent: S) -> Self {
        Self { header_encoder: HeaderEncoder::new(user_agent) }
    }
}

impl Encoder<&RequestHead> for RequestEncoder {
    type Error = ConnectionError;

    fn encode(&mut self, request: &RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.header_encoder.encode(request, dst)?;
        if let Some(body) = request.body_bytes() {
            dst.extend_from_slice(body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ConnectionKey;

    #[test]
    fn body_follows_head_immediately() {
        let request =
            RequestHead::post(ConnectionKey::with_default_port("example.com", false), "/").body(r#"{"test":123}"#);

        let mut dst = BytesMut::new();
        RequestEncoder::new("ua").encode(&request, &mut dst).unwrap();

        let wire = std::str::from_utf8(&dst).unwrap();
        assert!(wire.contains("Content-Type: application/json\r\n"));
        assert!(wire.ends_with("Content-Length: 12\r\n\r\n{\"test\":123}"));
    }
}
