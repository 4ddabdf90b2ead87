//! Core HTTP/1.1 client protocol types.
//!
//! This module holds the values that flow between the connection pool, the codec
//! and the transport engine. None of them perform I/O.
//!
//! # Components
//!
//! - **Pool identity** (`key`): [`ConnectionKey`], the `(host, port, use_tls)` triple
//! - **Headers** (`header`): [`Headers`], case-preserving fields with case-insensitive lookup
//! - **Requests** (`request`): [`RequestHead`], an outgoing request and its target
//! - **Raw messages** (`message`): [`RawHttpMessage`] together with the
//!   [`BodyFraming`] decided from the head and the [`BodyBoundary`] actually observed
//! - **Responses** (`response`): [`ParsedResponse`], status line, headers and body
//! - **Errors** (`error`): [`HttpError`] and the per-layer errors it wraps

mod key;
pub use key::ConnectionKey;
pub use key::HTTP_PORT;
pub use key::HTTPS_PORT;
pub use key::default_port;

mod header;
pub use header::Headers;

mod request;
pub use request::RequestHead;

mod message;
pub use message::BodyBoundary;
pub use message::BodyFraming;
pub use message::Message;
pub use message::PayloadItem;
pub use message::RawHttpMessage;

mod response;
pub use response::ParsedResponse;

mod error;
pub use error::BodyError;
pub use error::ConnectionError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::Phase;
