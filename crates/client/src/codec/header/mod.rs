//! HTTP head processing for the client side of a connection.
//!
//! # Components
//!
//! - [`HeaderEncoder`]: Encodes the request line and header fields of a request
//!   - Writes the default `Host`, `Connection`, `User-Agent` and `Accept` fields
//!   - Injects `Content-Type` and `Content-Length` when a body is present
//!
//! - [`HeaderDecoder`]: Splits the response head off the read buffer
//!   - Finds the CRLFCRLF head terminator across partial reads
//!   - Enforces the head size limit and rejects malformed status lines
//!   - Decides the body framing from status code and length headers

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub(crate) use header_decoder::{is_interim, is_keep_alive};
pub use header_encoder::HeaderEncoder;
