//! Thin request facade over [`HttpTransport`].
//!
//! Decomposes URLs, encodes JSON bodies and parses the raw response; all protocol
//! work happens in the transport.

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Uri};
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::connection::{Connector, HttpTransport, TcpConnector};
use crate::protocol::{ConnectionKey, Headers, HttpError, RequestHead, default_port};
use crate::response::Response;

/// Where a URL points: the pool key and the request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub key: ConnectionKey,
    /// path and query, always starting with `/`
    pub path: String,
}

/// Splits an absolute `http` or `https` URL into connection key and path.
///
/// The port defaults to 80 or 443 by scheme, the path to `/`.
///
/// # Errors
///
/// Returns [`HttpError::InvalidUrl`] for unparsable URLs, other schemes and URLs
/// without a host.
pub fn parse_url(url: &str) -> Result<RequestTarget, HttpError> {
    let uri: Uri = url.parse().map_err(|e| HttpError::invalid_url(url, e))?;

    let use_tls = match uri.scheme_str() {
        Some(scheme) if scheme.eq_ignore_ascii_case("https") => true,
        Some(scheme) if scheme.eq_ignore_ascii_case("http") => false,
        Some(scheme) => return Err(HttpError::invalid_url(url, format!("unsupported scheme {scheme}"))),
        None => return Err(HttpError::invalid_url(url, "missing scheme")),
    };

    let host = uri.host().filter(|host| !host.is_empty()).ok_or_else(|| HttpError::invalid_url(url, "missing host"))?;
    let port = uri.port_u16().unwrap_or_else(|| default_port(use_tls));

    let path = match uri.path_and_query().map(|path| path.as_str()) {
        Some(path) if path.starts_with('/') => path.to_string(),
        Some(path) if !path.is_empty() => format!("/{path}"),
        _ => "/".to_string(),
    };

    Ok(RequestTarget { key: ConnectionKey::new(host, port, use_tls), path })
}

/// An HTTP/1.1 client with its own connection pool.
///
/// Cloning is cheap and clones share the pool. Independent clients never share
/// connections.
///
/// # Example
///
/// ```no_run
/// use micro_http_client::Client;
/// use micro_http_client::protocol::Headers;
///
/// # async fn run() -> Result<(), micro_http_client::protocol::HttpError> {
/// let client = Client::new();
/// let response = client.get("https://httpbin.org/ip", Headers::new()).await?;
/// println!("{response}: {}", response.text()?);
/// client.close().await;
/// # Ok(())
/// # }
/// ```
pub struct Client<C: Connector = TcpConnector> {
    transport: Arc<HttpTransport<C>>,
}

impl Client<TcpConnector> {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(HttpTransport::new(config))
    }
}

impl Default for Client<TcpConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<C: Connector> std::fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("transport", &self.transport).finish()
    }
}

impl<C: Connector> Client<C> {
    pub fn with_transport(transport: HttpTransport<C>) -> Self {
        Self { transport: Arc::new(transport) }
    }

    pub async fn get(&self, url: &str, headers: Headers) -> Result<Response, HttpError> {
        self.request(Method::GET, url, None, headers).await
    }

    /// Sends `data` encoded as JSON.
    ///
    /// `Content-Type: application/json` is added unless `headers` declares a content type.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
        headers: Headers,
    ) -> Result<Response, HttpError> {
        let body = serde_json::to_vec(data)?;
        self.request(Method::POST, url, Some(Bytes::from(body)), headers).await
    }

    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        headers: Headers,
    ) -> Result<Response, HttpError> {
        let RequestTarget { key, path } = parse_url(url)?;
        debug!(%method, %key, path = %path, "send request");

        let mut request = RequestHead::new(key, method.clone(), path).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let raw = self.transport.fetch(&request).await?;
        let parsed = raw.parse()?;
        Ok(Response::new(method, parsed, raw.boundary()))
    }

    /// Closes every idle connection of the pool. Safe to call more than once.
    pub async fn close(&self) {
        self.transport.close().await;
    }

    pub fn transport(&self) -> &HttpTransport<C> {
        &self.transport
    }
}
