// ── Core error types ──
//
// User-facing errors from marquee-core. Consumers see two outcomes for
// any operation: no credential, or the request failed. The
// `From<marquee_api::Error>` impl folds transport, status, and body
// failures into `RequestFailed`.

use thiserror::Error;
use tracing::debug;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// No credential was available; nothing was sent.
    #[error("No authentication token found")]
    Unauthenticated,

    /// Transport failure or non-success response.
    ///
    /// `message` is the server-provided explanation when the error body
    /// had one; `status` is absent when no response arrived.
    #[error("Request failed{}", describe(.message.as_deref(), *.status))]
    RequestFailed {
        message: Option<String>,
        status: Option<u16>,
    },

    /// The session could not be built from its configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn describe(message: Option<&str>, status: Option<u16>) -> String {
    match (message, status) {
        (Some(m), _) => format!(": {m}"),
        (None, Some(s)) => format!(" (HTTP {s})"),
        (None, None) => String::new(),
    }
}

impl CoreError {
    /// The message to show for this failure, falling back to `fallback`
    /// when the server gave none.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::RequestFailed {
                message: Some(m), ..
            } => m.clone(),
            Self::RequestFailed { message: None, .. } => fallback.to_owned(),
            Self::Unauthenticated | Self::Config { .. } => self.to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<marquee_api::Error> for CoreError {
    fn from(err: marquee_api::Error) -> Self {
        match err {
            marquee_api::Error::Unauthenticated => CoreError::Unauthenticated,
            marquee_api::Error::Api { status, message } => CoreError::RequestFailed {
                message,
                status: Some(status),
            },
            marquee_api::Error::Transport(ref e) => {
                debug!(error = %e, "transport failure");
                CoreError::RequestFailed {
                    message: None,
                    status: e.status().map(|s| s.as_u16()),
                }
            }
            marquee_api::Error::Deserialization { message, body: _ } => {
                debug!(%message, "unreadable response body");
                CoreError::RequestFailed {
                    message: None,
                    status: None,
                }
            }
            marquee_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            marquee_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot be used for API requests: {url}"),
            },
            marquee_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}
