// ── Runtime session configuration ──
//
// Describes *how* to reach the catalog service. No file I/O here;
// marquee-config translates profiles into a `SessionConfig`.

use std::path::PathBuf;
use std::time::Duration;

use marquee_api::{TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Trust an additional CA certificate file.
    CustomCa(PathBuf),
}

/// Configuration for a signed-in session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Service root, e.g. `https://catalog.example.com`.
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Drop fetch responses that were overtaken by a newer fetch of the
    /// same collection. Off means the last response to arrive wins.
    pub discard_stale_fetches: bool,
}

impl SessionConfig {
    /// Defaults: system TLS, 30s timeout, last response wins.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            discard_stale_fetches: false,
        }
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        };
        TransportConfig {
            tls,
            ..TransportConfig::default()
        }
        .with_timeout(self.timeout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig::new(Url::parse("https://catalog.example.com").unwrap())
    }

    #[test]
    fn defaults_keep_last_response_wins() {
        let config = config();
        assert!(!config.discard_stale_fetches);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn transport_carries_timeout_and_ca() {
        let mut config = config();
        config.timeout = Duration::from_secs(5);
        config.tls = TlsVerification::CustomCa("/tmp/ca.pem".into());

        let transport = config.transport();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(matches!(transport.tls, TlsMode::CustomCa(ref p) if p.as_os_str() == "/tmp/ca.pem"));
    }
}
