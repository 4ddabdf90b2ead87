//! Connection management and the transport engine
//!
//! This module owns everything that performs network I/O: opening plaintext and
//! TLS connections, keeping idle ones for reuse and running one request/response
//! exchange over a connection.
//!
//! # Components
//!
//! - [`Connection`]: A stream the pool can hold, reporting whether it still is usable
//! - [`TransportStream`]: TCP or TLS over TCP, the connection used in production
//! - [`Connector`]: Opens connections; [`TcpConnector`] uses tokio and rustls
//! - [`ConnectionPool`]: Idle connections keyed by `(host, port, use_tls)`:
//!   - Bounded queue per key, oldest connections reused first
//!   - Connections closed by the peer are skipped
//!   - Excess connections are shut down on release
//! - [`HttpConnection`]: Writes one request and reads its response to the boundary
//! - [`HttpTransport`]: Ties the pool and the exchange together:
//!   - Releases connections that ended at a clean boundary
//!   - Shuts down connections after failures or inferred boundaries
//!
//! # Timeouts
//!
//! Connect, handshake, write and each read are bounded by the timeouts of the
//! [`ClientConfig`](crate::config::ClientConfig). For a body without a declared
//! length the drain timeout ends the body instead of failing the request.

mod connector;
mod http_connection;
mod pool;
mod stream;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use connector::Connector;
pub use connector::TcpConnector;
pub use http_connection::Exchange;
pub use http_connection::HttpConnection;
pub use pool::ConnectionPool;
pub use stream::Connection;
pub use stream::TransportStream;
pub use transport::HttpTransport;
