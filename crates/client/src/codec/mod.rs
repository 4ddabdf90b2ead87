//! HTTP/1.1 client codec for encoding requests and decoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestEncoder`]: Encodes an outgoing request, head and body
//!   - Head encoding via the `header` module
//!
//! - Response handling:
//!   - [`ResponseDecoder`]: Decodes the head and then the body of a response
//!   - Body framing via the `body` module
//!   - [`parse`]: Turns the collected raw bytes into a structured response
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::codec::{ResponseDecoder, RequestEncoder};
//! use micro_http_client::protocol::{ConnectionKey, RequestHead};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Encode outgoing request
//! let request = RequestHead::get(ConnectionKey::with_default_port("example.com", true), "/");
//! let mut encoder = RequestEncoder::new("micro-http-client");
//! let mut request_buffer = BytesMut::new();
//! encoder.encode(&request, &mut request_buffer).unwrap();
//!
//! // Decode incoming response
//! let mut decoder = ResponseDecoder::new();
//! let mut response_buffer = BytesMut::new();
//! let head = decoder.decode(&mut response_buffer);
//! ```
//!
//! # Limitations
//!
//! - Chunked transfer-coding is not decoded; such bodies are drained as raw bytes
//! - Maximum response head size: 64KB

mod body;
mod header;
mod parser;
mod request_encoder;
mod response_decoder;

pub use parser::parse;
pub use request_encoder::RequestEncoder;
pub use response_decoder::ResponseDecoder;

pub(crate) use header::{is_interim, is_keep_alive};
