use std::fmt;

/// Default port for plaintext `http`.
pub const HTTP_PORT: u16 = 80;

/// Default port for `https`.
pub const HTTPS_PORT: u16 = 443;

/// Identity of a pool partition.
///
/// Two requests with the same key may share a connection, requests with different
/// keys never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    host: String,
    port: u16,
    use_tls: bool,
}

impl ConnectionKey {
    pub fn new<H: Into<String>>(host: H, port: u16, use_tls: bool) -> Self {
        Self { host: host.into(), port, use_tls }
    }

    /// Builds a key on the scheme's default port.
    pub fn with_default_port<H: Into<String>>(host: H, use_tls: bool) -> Self {
        Self::new(host, default_port(use_tls), use_tls)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    /// The `host:port` pair handed to the resolver.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The value of the `Host` request header, which omits the default port.
    pub fn host_header(&self) -> String {
        if self.port == default_port(self.use_tls) { self.host.clone() } else { self.addr() }
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.use_tls { "https" } else { "http" };
        write!(f, "{scheme}://{}:{}", self.host, self.port)
    }
}

pub fn default_port(use_tls: bool) -> u16 {
    if use_tls { HTTPS_PORT } else { HTTP_PORT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_header_omits_default_port() {
        assert_eq!(ConnectionKey::with_default_port("example.com", true).host_header(), "example.com");
        assert_eq!(ConnectionKey::new("example.com", 80, false).host_header(), "example.com");
        assert_eq!(ConnectionKey::new("127.0.0.1", 8080, false).host_header(), "127.0.0.1:8080");
        assert_eq!(ConnectionKey::new("example.com", 80, true).host_header(), "example.com:80");
    }

    #[test]
    fn keys_differ_by_tls() {
        assert_ne!(ConnectionKey::new("example.com", 443, true), ConnectionKey::new("example.com", 443, false));
        assert_eq!(ConnectionKey::with_default_port("a", false).to_string(), "http://a:80");
    }
}
