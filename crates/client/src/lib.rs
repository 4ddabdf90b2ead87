//! An asynchronous micro HTTP/1.1 client implementation
//!
//! This crate provides a small HTTP/1.1 client built on top of tokio. It writes
//! requests straight onto plaintext or TLS connections, decides deterministically
//! where each response ends and keeps finished connections in a keyed pool for
//! the next request to the same origin.
//!
//! # Features
//!
//! - Keep-alive connections pooled per `(host, port, use_tls)`
//! - TLS through rustls, trusting the webpki root certificates by default
//! - `Content-Length` framing with a bounded best-effort drain when it is missing
//! - Per step timeouts for connect, handshake, write and every read
//! - Lenient response parsing with case-insensitive header lookup
//! - JSON request and response bodies through serde
//!
//! # Example
//!
//! ```no_run
//! use micro_http_client::Client;
//! use micro_http_client::protocol::Headers;
//! use serde_json::json;
//! use tracing::{error, info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let client = Client::new();
//!
//!     match client.get("https://httpbin.org/ip", Headers::new()).await {
//!         Ok(response) => info!(%response, body = response.text().unwrap_or_default(), "received"),
//!         Err(e) => error!(cause = %e, "request failed"),
//!     }
//!
//!     let payload = json!({"test": 123});
//!     match client.post("https://httpbin.org/post", &payload, Headers::new()).await {
//!         Ok(response) => info!(status = response.status(), "posted"),
//!         Err(e) => error!(cause = %e, "request failed"),
//!     }
//!
//!     client.close().await;
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: Protocol types and errors, no I/O
//! - [`codec`]: Request encoding, response framing and the response parser
//! - [`connection`]: Connections, the pool and the transport engine
//! - [`client`] and [`response`]: The facade most callers use
//! - [`config`]: Timeouts, pool capacity, user agent and TLS settings
//!
//! # Core Components
//!
//! ## Transport
//!
//! [`connection::HttpTransport::fetch`] takes a [`protocol::RequestHead`], acquires a
//! connection from the pool, writes the request and reads the response up to its
//! boundary. The result is a [`protocol::RawHttpMessage`]: the raw bytes plus how the
//! end of the body was found.
//!
//! ## Message boundaries
//!
//! - status `1xx`, `204`, `304` and `Content-Length: 0`: no body
//! - `Content-Length: n`: exactly `n` bytes, anything after them stays unread
//! - otherwise: bytes are drained until the peer closes or stays silent for the
//!   drain timeout; such a boundary is inferred and the connection is not reused
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ConnectionError`]: Connect, TLS, timeout and I/O failures
//! - [`protocol::ParseError`]: Malformed response heads
//! - [`protocol::BodyError`]: Body decoding failures
//!
//! # Limitations
//!
//! - HTTP/1.1 only (currently HTTP/2 or HTTP/3 is not supported)
//! - Chunked transfer-coding is not decoded, such bodies are drained raw
//! - No redirects, cookies, proxies or compression
//! - Maximum response head size: 64KB

pub mod client;
pub mod codec;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod response;

pub use client::Client;
pub use config::ClientConfig;
pub use response::Response;

mod utils;
pub(crate) use utils::ensure;
