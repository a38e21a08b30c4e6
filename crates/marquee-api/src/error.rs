use thiserror::Error;

/// Top-level error type for the `marquee-api` crate.
///
/// Covers every failure mode of the user-content endpoints: missing
/// credentials, transport, non-success responses, and malformed bodies.
/// `marquee-core` folds these into its two-variant taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// No bearer token was available. Raised before any request is sent.
    #[error("No authentication token found")]
    Unauthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// The server answered with a non-success status.
    ///
    /// `message` is the `message` field of the JSON error body, when the
    /// body had one.
    #[error("Server returned HTTP {status}{}", message_suffix(.message))]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[allow(clippy::ref_option)]
fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl Error {
    /// Returns `true` if the request was never sent for lack of a token.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The human-readable message the server attached to its error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_server_message() {
        let err = Error::Api {
            status: 500,
            message: Some("db down".into()),
        };
        assert_eq!(err.to_string(), "Server returned HTTP 500: db down");
        assert_eq!(err.server_message(), Some("db down"));
    }

    #[test]
    fn api_error_display_without_message() {
        let err = Error::Api {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Server returned HTTP 502");
        assert!(err.server_message().is_none());
    }

    #[test]
    fn not_found_detection() {
        let err = Error::Api {
            status: 404,
            message: None,
        };
        assert!(err.is_not_found());
        assert!(!Error::Unauthenticated.is_not_found());
        assert!(Error::Unauthenticated.is_unauthenticated());
    }
}
