use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rustls::RootCertStore;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tracing::{info, trace};

use crate::config::ClientConfig;
use crate::connection::{Connection, TransportStream};
use crate::protocol::{ConnectionError, ConnectionKey, Phase};

/// Opens new connections for the [`ConnectionPool`](super::ConnectionPool).
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Conn: Connection;

    /// Opens a connection to `key`, wrapped in TLS when the key asks for it.
    ///
    /// Failures are returned as is, the pool never retries.
    async fn connect(&self, key: &ConnectionKey) -> Result<Self::Conn, ConnectionError>;
}

/// Connects over TCP, with TLS through rustls for `https` keys.
#[derive(Clone)]
pub struct TcpConnector {
    connect_timeout: Duration,
    tls: TlsConnector,
}

impl TcpConnector {
    pub fn new(config: &ClientConfig) -> Self {
        let tls_config = config.tls_config.clone().unwrap_or_else(default_tls_config);
        Self { connect_timeout: config.connect_timeout, tls: TlsConnector::from(tls_config) }
    }
}

impl std::fmt::Debug for TcpConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpConnector").field("connect_timeout", &self.connect_timeout).finish_non_exhaustive()
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Conn = TransportStream;

    async fn connect(&self, key: &ConnectionKey) -> Result<TransportStream, ConnectionError> {
        let server_name = key
            .use_tls()
            .then(|| ServerName::try_from(key.host().to_string()))
            .transpose()
            .map_err(|_e| ConnectionError::invalid_server_name(key.host()))?;

        let addr = key.addr();
        let stream = timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_e| ConnectionError::timeout(Phase::Connect, self.connect_timeout))?
            .map_err(|e| ConnectionError::connect(&addr, e))?;

        if let Err(e) = stream.set_nodelay(true) {
            trace!(cause = %e, "can't set TCP_NODELAY");
        }

        let Some(server_name) = server_name else {
            info!(%key, "opened new connection");
            return Ok(TransportStream::plain(stream));
        };

        let stream = timeout(self.connect_timeout, self.tls.connect(server_name, stream))
            .await
            .map_err(|_e| ConnectionError::timeout(Phase::Handshake, self.connect_timeout))?
            .map_err(ConnectionError::tls)?;

        info!(%key, "opened new tls connection");
        Ok(TransportStream::tls(stream))
    }
}

/// Trusts the Mozilla root certificates bundled by `webpki-roots`.
fn default_tls_config() -> Arc<rustls::ClientConfig> {
    let root_store = RootCertStore { roots: webpki_roots::TLS_SERVER_ROOTS.to_vec() };
    Arc::new(rustls::ClientConfig::builder().with_root_certificates(root_store).with_no_client_auth())
}
