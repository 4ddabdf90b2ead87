//! Response body decoding.
//!
//! # Components
//!
//! - [`LengthDecoder`](length_decoder::LengthDecoder): exact reads for `Content-Length` bodies
//! - [`DrainDecoder`](drain_decoder::DrainDecoder): best-effort reads for bodies without a length
//! - [`PayloadDecoder`]: picks one of the above from the [`BodyFraming`](crate::protocol::BodyFraming)
//!
//! Chunked transfer-coding is not decoded.

mod drain_decoder;
mod length_decoder;
mod payload_decoder;

pub use payload_decoder::PayloadDecoder;
