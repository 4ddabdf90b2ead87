use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::connection::{ConnectionPool, Connector, HttpConnection, TcpConnector};
use crate::protocol::{HttpError, RawHttpMessage, RequestHead};

/// Sends requests over pooled connections and returns the raw responses.
///
/// Each `fetch` owns its connection from acquire to release: dropping the future
/// mid-request drops, and so closes, the connection instead of returning it to the
/// pool in an unknown state.
pub struct HttpTransport<C: Connector = TcpConnector> {
    pool: ConnectionPool<C>,
    config: ClientConfig,
}

impl<C: Connector> std::fmt::Debug for HttpTransport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").field("pool", &self.pool).field("config", &self.config).finish()
    }
}

impl HttpTransport<TcpConnector> {
    pub fn new(config: ClientConfig) -> Self {
        let connector = TcpConnector::new(&config);
        Self::with_connector(connector, config)
    }
}

impl<C: Connector> HttpTransport<C> {
    pub fn with_connector(connector: C, config: ClientConfig) -> Self {
        Self { pool: ConnectionPool::new(connector, config.pool_capacity), config }
    }

    /// Sends `request` and reads its response up to the body boundary.
    ///
    /// On success the connection goes back to the pool if it ended at a clean
    /// boundary, otherwise it is shut down. On failure it is always shut down.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] for connect, handshake, timeout and I/O
    /// failures and [`HttpError::Response`] for an unusable response head.
    pub async fn fetch(&self, request: &RequestHead) -> Result<RawHttpMessage, HttpError> {
        let key = request.key();
        let mut connection = self.pool.acquire(key).await?;

        let result = {
            let (reader, writer) = tokio::io::split(&mut connection);
            HttpConnection::new(reader, writer, &self.config.user_agent).exchange(request, &self.config).await
        };

        match result {
            Ok(exchange) if exchange.reusable => {
                self.pool.release(key, connection).await;
                Ok(exchange.message)
            }
            Ok(exchange) => {
                debug!(%key, boundary = ?exchange.message.boundary(), "connection not at a clean boundary, close it");
                self.pool.discard(connection).await;
                Ok(exchange.message)
            }
            Err(e) => {
                warn!(%key, cause = %e, "request failed, close connection");
                self.pool.discard(connection).await;
                Err(e)
            }
        }
    }

    /// Closes every idle connection. Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close_all().await;
    }

    pub fn pool(&self) -> &ConnectionPool<C> {
        &self.pool
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
