//! Client configuration.
//!
//! Every suspension point of a request (connect, tls handshake, write, head read,
//! body read) has its own timeout here; nothing is baked into the transport.

use std::sync::Arc;
use std::time::Duration;

/// Default number of idle connections kept per [`ConnectionKey`](crate::protocol::ConnectionKey)
pub const DEFAULT_POOL_CAPACITY: usize = 10;

/// Default `User-Agent` sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("micro-http-client/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the pool, the connector and the transport engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub pool_capacity: usize,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    /// bound on each read of the head or of a body with a declared length
    pub read_timeout: Duration,
    /// bound on each read of a body without a declared length; expiring ends the body
    pub drain_timeout: Duration,
    pub user_agent: String,
    /// TLS settings, `None` trusts the webpki root certificates
    pub tls_config: Option<Arc<rustls::ClientConfig>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            connect_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            drain_timeout: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls_config: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_tls_config(mut self, tls_config: Arc<rustls::ClientConfig>) -> Self {
        self.tls_config = Some(tls_config);
        self
    }
}
